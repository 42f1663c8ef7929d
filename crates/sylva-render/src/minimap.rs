//! Minimap: a fixed-size overview of the visible set plus the main viewport rectangle.

use crate::scene::{HIGHLIGHT_COLOR, Scene};
use crate::svg::{escape_attr, fmt};
use std::fmt::Write as _;
use sylva_core::geom::{Point, Rect, Size, ViewTransform, point, rect, size};
use sylva_core::ExplorerConfig;

const DOT_FALLBACK_COLOR: &str = "#94a3b8";
/// Vertical slack around each node center when computing bounds.
const NODE_HALF_SPAN: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl Default for MinimapSettings {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 140.0,
            padding: 10.0,
        }
    }
}

impl MinimapSettings {
    pub fn from_config(cfg: &ExplorerConfig) -> Self {
        let d = Self::default();
        Self {
            width: cfg.get_f64("minimap.width").filter(|v| *v > 0.0).unwrap_or(d.width),
            height: cfg
                .get_f64("minimap.height")
                .filter(|v| *v > 0.0)
                .unwrap_or(d.height),
            padding: cfg
                .get_f64("minimap.padding")
                .filter(|v| *v >= 0.0)
                .unwrap_or(d.padding),
        }
    }

    pub fn size(&self) -> Size {
        size(self.width, self.height)
    }
}

/// Uniform scene-to-minimap mapping, centered in the padded area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimapProjection {
    pub min: Point,
    pub scale: f64,
    pub offset: Point,
}

impl MinimapProjection {
    /// `None` for an empty scene.
    pub fn fit(scene: &Scene, settings: &MinimapSettings) -> Option<Self> {
        let first = scene.nodes.first()?;
        let (mut mn_x, mut mx_x) = (first.rect.min_x(), first.rect.max_x());
        let (mut mn_y, mut mx_y) = (f64::INFINITY, f64::NEG_INFINITY);
        for n in &scene.nodes {
            let cy = n.rect.center().y;
            mn_x = mn_x.min(n.rect.min_x());
            mx_x = mx_x.max(n.rect.max_x());
            mn_y = mn_y.min(cy - NODE_HALF_SPAN);
            mx_y = mx_y.max(cy + NODE_HALF_SPAN);
        }

        let pad = settings.padding;
        let inner_w = settings.width - pad * 2.0;
        let inner_h = settings.height - pad * 2.0;
        let range_x = nonzero(mx_x - mn_x);
        let range_y = nonzero(mx_y - mn_y);
        let scale = (inner_w / range_x).min(inner_h / range_y);
        Some(Self {
            min: point(mn_x, mn_y),
            scale,
            offset: point(
                pad + (inner_w - range_x * scale) / 2.0,
                pad + (inner_h - range_y * scale) / 2.0,
            ),
        })
    }

    pub fn project(&self, scene: Point) -> Point {
        point(
            self.offset.x + (scene.x - self.min.x) * self.scale,
            self.offset.y + (scene.y - self.min.y) * self.scale,
        )
    }

    pub fn unproject(&self, minimap: Point) -> Point {
        point(
            self.min.x + (minimap.x - self.offset.x) / self.scale,
            self.min.y + (minimap.y - self.offset.y) / self.scale,
        )
    }
}

fn nonzero(range: f64) -> f64 {
    if range == 0.0 || !range.is_finite() {
        1.0
    } else {
        range
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinimapDot {
    pub center: Point,
    pub radius: f64,
    pub fill: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MinimapScene {
    pub size: Size,
    pub projection: Option<MinimapProjection>,
    pub dots: Vec<MinimapDot>,
    /// Main viewport outline, in minimap space.
    pub viewport: Option<Rect>,
}

impl MinimapScene {
    pub fn to_svg(&self) -> String {
        let mut out = String::with_capacity(128 + self.dots.len() * 80);
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}">"#,
            fmt(self.size.width),
            fmt(self.size.height)
        );
        for dot in &self.dots {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}" fill="{}" fill-opacity="{}"/>"#,
                fmt(dot.center.x),
                fmt(dot.center.y),
                fmt(dot.radius),
                escape_attr(&dot.fill),
                fmt(dot.opacity)
            );
        }
        if let Some(v) = self.viewport {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="rgba(255,255,255,0.6)" stroke-width="1.5"/>"#,
                fmt(v.min_x()),
                fmt(v.min_y()),
                fmt(v.width()),
                fmt(v.height())
            );
        }
        out.push_str("</svg>");
        out
    }
}

/// Projects the visible set and the region of the scene currently on screen.
///
/// `viewport_size` is the main canvas size in pixels.
pub fn build_minimap(
    scene: &Scene,
    transform: ViewTransform,
    viewport_size: Size,
    settings: &MinimapSettings,
) -> MinimapScene {
    let Some(projection) = MinimapProjection::fit(scene, settings) else {
        return MinimapScene {
            size: settings.size(),
            projection: None,
            dots: Vec::new(),
            viewport: None,
        };
    };

    let dots = scene
        .nodes
        .iter()
        .map(|n| MinimapDot {
            center: projection.project(point(n.rect.min_x(), n.rect.center().y)),
            radius: match n.depth {
                0 => 4.0,
                1 => 2.5,
                _ => 1.5,
            },
            fill: if n.highlighted {
                HIGHLIGHT_COLOR.to_string()
            } else if n.stroke.is_empty() {
                DOT_FALLBACK_COLOR.to_string()
            } else {
                n.stroke.clone()
            },
            opacity: if n.depth <= 1 { 0.9 } else { 0.5 },
        })
        .collect();

    let k = transform.k;
    let top_left = projection.project(point(-transform.x / k, -transform.y / k));
    let viewport = rect(
        top_left.x,
        top_left.y,
        viewport_size.width / k * projection.scale,
        viewport_size.height / k * projection.scale,
    );

    MinimapScene {
        size: settings.size(),
        projection: Some(projection),
        dots,
        viewport: Some(viewport),
    }
}

/// Translation that centers the main view on the scene point under `minimap_point`, keeping
/// the current scale.
pub fn navigate_transform(
    projection: &MinimapProjection,
    minimap_point: Point,
    transform: ViewTransform,
    viewport_size: Size,
) -> ViewTransform {
    let target = projection.unproject(minimap_point);
    ViewTransform::new(
        viewport_size.width / 2.0 - target.x * transform.k,
        viewport_size.height / 2.0 - target.y * transform.k,
        transform.k,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{LayoutSettings, layout_tree};
    use crate::scene::build_scene;
    use crate::text::CachedTextMeasurer;
    use sylva_core::{CrossRefIndex, NodeData, Tree};

    fn scene() -> Scene {
        let mut tree = Tree::initialize(NodeData::leaf("root", "#ffffff").with_children(vec![
            NodeData::leaf("a", "#3b82f6")
                .with_children(vec![NodeData::leaf("a1", "#3b82f6")]),
            NodeData::leaf("b", "").with_children(vec![NodeData::leaf("b1", "#ef4444")]),
        ]));
        tree.expand_all();
        let root = tree.root();
        tree.set_highlight(tree.node(root).children()[0], true);
        let settings = LayoutSettings::default();
        let layout = layout_tree(&tree, &CachedTextMeasurer::deterministic(None), &settings);
        build_scene(
            &tree,
            &CrossRefIndex::build(&tree),
            &layout,
            settings.origin_x,
            size(1000.0, 700.0),
            ViewTransform::IDENTITY,
        )
    }

    #[test]
    fn projection_fits_inside_padding() {
        let scene = scene();
        let settings = MinimapSettings::default();
        let mm = build_minimap(&scene, ViewTransform::IDENTITY, scene.size, &settings);
        assert_eq!(mm.dots.len(), 5);
        for dot in &mm.dots {
            assert!(dot.center.x >= 10.0 - 1e-9 && dot.center.x <= 190.0 + 1e-9);
            assert!(dot.center.y >= 10.0 - 1e-9 && dot.center.y <= 130.0 + 1e-9);
        }
    }

    #[test]
    fn unproject_inverts_project() {
        let scene = scene();
        let p = MinimapProjection::fit(&scene, &MinimapSettings::default()).expect("non-empty");
        let s = point(321.0, 77.0);
        let back = p.unproject(p.project(s));
        assert!((back.x - s.x).abs() < 1e-9 && (back.y - s.y).abs() < 1e-9);
    }

    #[test]
    fn dot_styling_by_depth_and_highlight() {
        let scene = scene();
        let mm = build_minimap(
            &scene,
            ViewTransform::IDENTITY,
            scene.size,
            &MinimapSettings::default(),
        );
        let radii: Vec<f64> = mm.dots.iter().map(|d| d.radius).collect();
        assert_eq!(radii, vec![4.0, 2.5, 1.5, 2.5, 1.5]);
        assert_eq!(mm.dots[1].fill, HIGHLIGHT_COLOR);
        assert_eq!(mm.dots[3].fill, DOT_FALLBACK_COLOR);
        assert_eq!(mm.dots[0].opacity, 0.9);
        assert_eq!(mm.dots[2].opacity, 0.5);
    }

    #[test]
    fn viewport_rect_shrinks_as_scale_grows() {
        let scene = scene();
        let settings = MinimapSettings::default();
        let wide = build_minimap(&scene, ViewTransform::IDENTITY, scene.size, &settings);
        let close = build_minimap(
            &scene,
            ViewTransform::new(0.0, 0.0, 2.0),
            scene.size,
            &settings,
        );
        let (w1, w2) = (
            wide.viewport.expect("viewport").width(),
            close.viewport.expect("viewport").width(),
        );
        assert!((w1 / w2 - 2.0).abs() < 1e-9);
    }

    #[test]
    fn navigate_centers_on_the_picked_scene_point() {
        let scene = scene();
        let p = MinimapProjection::fit(&scene, &MinimapSettings::default()).expect("non-empty");
        let t = ViewTransform::new(5.0, 5.0, 1.25);
        let pick = point(100.0, 70.0);
        let next = navigate_transform(&p, pick, t, scene.size);
        assert_eq!(next.k, 1.25);
        let center = next.invert(point(500.0, 350.0));
        let target = p.unproject(pick);
        assert!((center.x - target.x).abs() < 1e-9);
        assert!((center.y - target.y).abs() < 1e-9);
    }

    #[test]
    fn empty_scene_has_no_projection() {
        let mm = build_minimap(
            &Scene::default(),
            ViewTransform::IDENTITY,
            size(10.0, 10.0),
            &MinimapSettings::default(),
        );
        assert!(mm.projection.is_none());
        assert_eq!(mm.to_svg(), r#"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="140"></svg>"#);
    }
}
