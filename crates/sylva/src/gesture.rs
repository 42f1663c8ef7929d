//! Pan and pinch trackers.
//!
//! Trackers only hold the baseline needed to turn the next event into a transform update; the
//! viewport itself is owned by the explorer and passed in.

use crate::viewport::Viewport;
use sylva_core::geom::{Point, Vector, point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub position: Point,
}

impl TouchPoint {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self {
            id,
            position: point(x, y),
        }
    }
}

/// Mouse drag-to-pan.
#[derive(Debug, Clone, Default)]
pub struct MouseDrag {
    /// Pointer position minus the translation at drag start.
    origin: Option<Vector>,
}

impl MouseDrag {
    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    pub fn begin(&mut self, p: Point, viewport: &Viewport) {
        self.origin = Some(p.to_vector() - viewport.translation());
    }

    /// Returns whether the viewport moved.
    pub fn update(&mut self, p: Point, viewport: &mut Viewport) -> bool {
        let Some(origin) = self.origin else {
            return false;
        };
        viewport.set_translation(p - origin);
        let t = viewport.translation();
        tracing::trace!(x = t.x, y = t.y, "drag");
        true
    }

    pub fn end(&mut self) {
        self.origin = None;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum TouchMode {
    #[default]
    Idle,
    Pan {
        origin: Vector,
    },
    Pinch {
        distance: f64,
    },
}

/// One-finger pan and two-finger pinch-zoom.
///
/// Pinch scale is incremental: each move multiplies the scale by `new_distance / last_distance`
/// about the current midpoint, then the new distance becomes the baseline.
#[derive(Debug, Clone, Default)]
pub struct TouchGesture {
    mode: TouchMode,
}

fn distance(a: Point, b: Point) -> f64 {
    (a - b).length()
}

fn midpoint(a: Point, b: Point) -> Point {
    a.lerp(b, 0.5)
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

impl TouchGesture {
    pub fn is_active(&self) -> bool {
        self.mode != TouchMode::Idle
    }

    pub fn is_pinching(&self) -> bool {
        matches!(self.mode, TouchMode::Pinch { .. })
    }

    pub fn start(&mut self, touches: &[TouchPoint], viewport: &Viewport) {
        match touches {
            [one] => {
                self.mode = TouchMode::Pan {
                    origin: one.position.to_vector() - viewport.translation(),
                };
            }
            [a, b, ..] => {
                self.mode = TouchMode::Pinch {
                    distance: distance(a.position, b.position),
                };
            }
            [] => {}
        }
    }

    /// Returns whether the viewport changed.
    pub fn update(&mut self, touches: &[TouchPoint], viewport: &mut Viewport) -> bool {
        match (touches, self.mode) {
            ([one], TouchMode::Pan { origin }) => {
                viewport.set_translation(one.position - origin);
                let t = viewport.translation();
                tracing::trace!(x = t.x, y = t.y, "touch pan");
                true
            }
            ([a, b, ..], TouchMode::Pinch { distance: last, .. }) => {
                let next = distance(a.position, b.position);
                let mid = midpoint(a.position, b.position);
                if !positive(next) {
                    return false;
                }
                if !positive(last) {
                    self.mode = TouchMode::Pinch { distance: next };
                    return false;
                }
                let changed = viewport.zoom_at(mid, next / last);
                self.mode = TouchMode::Pinch { distance: next };
                tracing::trace!(scale = viewport.scale(), "pinch");
                changed
            }
            ([a, b, ..], TouchMode::Idle | TouchMode::Pan { .. }) => {
                // Second finger landed mid-gesture.
                self.mode = TouchMode::Pinch {
                    distance: distance(a.position, b.position),
                };
                false
            }
            _ => false,
        }
    }

    pub fn end(&mut self) {
        self.mode = TouchMode::Idle;
    }
}
