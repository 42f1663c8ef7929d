//! Camera state: translation, scale and canvas size.

use sylva_core::ExplorerConfig;
use sylva_core::geom::{Point, Rect, Size, Vector, ViewTransform, point, rect, size};

pub const DEFAULT_MIN_SCALE: f64 = 0.05;
pub const DEFAULT_MAX_SCALE: f64 = 5.0;

fn valid_limits(min_scale: f64, max_scale: f64) -> (f64, f64) {
    if min_scale.is_finite()
        && max_scale.is_finite()
        && 0.0 < min_scale
        && min_scale <= max_scale
    {
        (min_scale, max_scale)
    } else {
        (DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE)
    }
}

fn config_limits(cfg: &ExplorerConfig) -> (f64, f64) {
    (
        cfg.get_f64("viewport.minScale").unwrap_or(DEFAULT_MIN_SCALE),
        cfg.get_f64("viewport.maxScale").unwrap_or(DEFAULT_MAX_SCALE),
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    transform: ViewTransform,
    size: Size,
    min_scale: f64,
    max_scale: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(size(0.0, 0.0))
    }
}

impl Viewport {
    pub fn new(size: Size) -> Self {
        Self::with_scale_limits(size, DEFAULT_MIN_SCALE, DEFAULT_MAX_SCALE)
    }

    /// Limits that are non-finite, non-positive or inverted fall back to the defaults.
    pub fn with_scale_limits(size: Size, min_scale: f64, max_scale: f64) -> Self {
        let (min_scale, max_scale) = valid_limits(min_scale, max_scale);
        Self {
            transform: ViewTransform::IDENTITY,
            size,
            min_scale,
            max_scale,
        }
    }

    pub fn from_config(cfg: &ExplorerConfig, size: Size) -> Self {
        let (min_scale, max_scale) = config_limits(cfg);
        Self::with_scale_limits(size, min_scale, max_scale)
    }

    /// Replaces the clamp range and re-clamps the current scale.
    pub fn set_scale_limits(&mut self, min_scale: f64, max_scale: f64) {
        (self.min_scale, self.max_scale) = valid_limits(min_scale, max_scale);
        self.transform.k = self.clamp_scale(self.transform.k);
    }

    pub fn apply_config(&mut self, cfg: &ExplorerConfig) {
        let (min_scale, max_scale) = config_limits(cfg);
        self.set_scale_limits(min_scale, max_scale);
    }

    pub fn transform(&self) -> ViewTransform {
        self.transform
    }

    pub fn translation(&self) -> Vector {
        self.transform.translation()
    }

    pub fn scale(&self) -> f64 {
        self.transform.k
    }

    pub fn scale_limits(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn clamp_scale(&self, k: f64) -> f64 {
        k.clamp(self.min_scale, self.max_scale)
    }

    /// Non-finite components are ignored; the scale is always clamped.
    pub fn set_transform(&mut self, t: ViewTransform) {
        if t.x.is_finite() {
            self.transform.x = t.x;
        }
        if t.y.is_finite() {
            self.transform.y = t.y;
        }
        if t.k.is_finite() {
            self.transform.k = self.clamp_scale(t.k);
        }
    }

    pub fn set_translation(&mut self, t: Point) {
        self.set_transform(ViewTransform::new(t.x, t.y, self.transform.k));
    }

    pub fn to_screen(&self, scene: Point) -> Point {
        self.transform.apply(scene)
    }

    pub fn to_scene(&self, screen: Point) -> Point {
        self.transform.invert(screen)
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        let t = self.transform;
        self.set_transform(ViewTransform::new(t.x + dx, t.y + dy, t.k));
    }

    /// Scales by `factor` about the screen point `pointer`, which stays fixed on screen.
    /// Returns whether the transform changed.
    pub fn zoom_at(&mut self, pointer: Point, factor: f64) -> bool {
        if !factor.is_finite() || factor <= 0.0 || !pointer.x.is_finite() || !pointer.y.is_finite()
        {
            return false;
        }
        let old = self.transform;
        let k = self.clamp_scale(old.k * factor);
        let ratio = k / old.k;
        self.set_transform(ViewTransform::new(
            pointer.x - (pointer.x - old.x) * ratio,
            pointer.y - (pointer.y - old.y) * ratio,
            k,
        ));
        self.transform != old
    }

    /// Moves the camera so the scene point lands at the canvas center, raising the scale to at
    /// least `min_scale`.
    pub fn center_on(&mut self, scene: Point, min_scale: f64) {
        let k = self.clamp_scale(self.transform.k.max(min_scale));
        self.set_transform(ViewTransform::new(
            self.size.width / 2.0 - scene.x * k,
            self.size.height / 2.0 - scene.y * k,
            k,
        ));
    }

    pub fn reset(&mut self) {
        self.transform = ViewTransform::new(0.0, 0.0, self.clamp_scale(1.0));
    }

    /// The region of the scene currently on screen.
    pub fn visible_scene_rect(&self) -> Rect {
        let t = self.transform;
        rect(
            -t.x / t.k,
            -t.y / t.k,
            self.size.width / t.k,
            self.size.height / t.k,
        )
    }

    pub fn center(&self) -> Point {
        point(self.size.width / 2.0, self.size.height / 2.0)
    }
}
