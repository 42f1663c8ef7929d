//! Scene graph generation.
//!
//! The scene is rebuilt from scratch on every call: visible links first, then visible nodes, all
//! in scene space (layout space plus the scene offset). The camera transform is kept separately
//! so it can be swapped without regenerating anything.

use crate::color::darken;
use crate::layout::sizing::DepthTier;
use crate::model::TreeLayout;
use sylva_core::geom::{Point, Rect, Size, Vector, ViewTransform, point};
use sylva_core::{CrossRefIndex, NodeId, Tree};

pub const HIGHLIGHT_COLOR: &str = "#fbbf24";
pub const CROSS_REF_COLOR: &str = "#60a5fa";
pub const CROSS_REF_GLYPH: &str = "\u{1F517}";

#[derive(Debug, Clone, PartialEq)]
pub struct SceneLabel {
    pub lines: Vec<String>,
    pub font_size: f64,
    pub font_weight: u16,
    pub fill: &'static str,
    pub line_pitch: f64,
}

impl SceneLabel {
    /// Vertical center of line `idx`, relative to the box top.
    pub fn line_y(&self, idx: usize, box_height: f64) -> f64 {
        let mid = (self.lines.len().saturating_sub(1)) as f64 / 2.0;
        box_height / 2.0 + (idx as f64 - mid) * self.line_pitch
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub id: NodeId,
    pub depth: usize,
    /// Box in scene space.
    pub rect: Rect,
    pub corner_radius: f64,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub opacity: f64,
    pub highlighted: bool,
    pub label: SceneLabel,
    /// `+N` when collapsed, `−` when expanded; absent for leaves.
    pub collapse_badge: Option<String>,
    pub badge_color: String,
    pub tooltip: Option<String>,
    pub cross_ref_marker: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneLink {
    pub source: NodeId,
    pub target: NodeId,
    /// Midline of the parent's trailing edge.
    pub from: Point,
    /// Midline of the child's leading edge.
    pub to: Point,
    pub stroke: String,
    pub stroke_width: f64,
    pub opacity: f64,
}

impl SceneLink {
    /// Horizontal-tangent cubic from `from` to `to`.
    pub fn path_data(&self) -> String {
        let mx = (self.from.x + self.to.x) / 2.0;
        format!(
            "M{},{} C{},{} {},{} {},{}",
            crate::svg::fmt(self.from.x),
            crate::svg::fmt(self.from.y),
            crate::svg::fmt(mx),
            crate::svg::fmt(self.from.y),
            crate::svg::fmt(mx),
            crate::svg::fmt(self.to.y),
            crate::svg::fmt(self.to.x),
            crate::svg::fmt(self.to.y)
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub size: Size,
    /// Layout space to scene space.
    pub offset: Vector,
    pub transform: ViewTransform,
    pub links: Vec<SceneLink>,
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Replaces the camera transform only; the scene content is untouched.
    pub fn set_transform(&mut self, transform: ViewTransform) {
        self.transform = transform;
    }

    pub fn to_scene(&self, screen: Point) -> Point {
        self.transform.invert(screen)
    }

    /// Topmost node whose box contains the screen point.
    pub fn hit_test(&self, screen: Point) -> Option<NodeId> {
        let p = self.to_scene(screen);
        self.nodes
            .iter()
            .rev()
            .find(|n| {
                let r = n.rect;
                p.x >= r.min_x() && p.x <= r.max_x() && p.y >= r.min_y() && p.y <= r.max_y()
            })
            .map(|n| n.id)
    }

    pub fn to_svg(&self) -> String {
        crate::svg::render_scene_svg(self, &crate::svg::SvgRenderOptions::default())
    }
}

pub fn build_scene(
    tree: &Tree,
    xref: &CrossRefIndex,
    layout: &TreeLayout,
    origin_x: f64,
    size: Size,
    transform: ViewTransform,
) -> Scene {
    let offset = layout.scene_offset(origin_x, size.height);

    let mut links = Vec::with_capacity(layout.links.len());
    for (source, target) in &layout.links {
        let (Some(s), Some(t)) = (layout.get(*source), layout.get(*target)) else {
            continue;
        };
        let child = tree.node(*target);
        let faint = child.depth() >= 3;
        links.push(SceneLink {
            source: *source,
            target: *target,
            from: point(s.x + s.width, s.y) + offset,
            to: point(t.x, t.y) + offset,
            stroke: child.color().to_string(),
            stroke_width: if faint { 0.7 } else { 1.2 },
            opacity: if faint { 0.18 } else { 0.32 },
        });
    }

    let mut nodes = Vec::with_capacity(layout.len());
    for b in layout.boxes() {
        let node = tree.node(b.id);
        let tier = DepthTier::of(node.depth());
        let highlighted = node.is_highlighted();
        let mut rect = b.rect();
        rect.origin += offset;

        let collapse_badge = node.has_children().then(|| {
            if node.is_collapsed() {
                format!("+{}", node.children().len())
            } else {
                "\u{2212}".to_string()
            }
        });
        let tooltip = node
            .desc()
            .map(|desc| format!("{}: {}", node.normalized_name(), desc));

        nodes.push(SceneNode {
            id: b.id,
            depth: node.depth(),
            rect,
            corner_radius: tier.corner_radius(),
            fill: darken(node.color(), if highlighted { 80 } else { 120 }),
            stroke: node.color().to_string(),
            stroke_width: match (tier, highlighted) {
                (DepthTier::Root, _) => 2.2,
                (_, true) => 1.8,
                _ => 1.0,
            },
            opacity: match tier {
                DepthTier::Root => 1.0,
                DepthTier::Category => 0.85,
                DepthTier::Term => 0.7,
            },
            highlighted,
            label: SceneLabel {
                lines: node.label_lines().into_iter().map(str::to_string).collect(),
                font_size: tier.font_size(),
                font_weight: if node.depth() <= 1 { 700 } else { 500 },
                fill: if tier == DepthTier::Root {
                    "#111"
                } else {
                    "#f1f5f9"
                },
                line_pitch: tier.line_pitch(),
            },
            collapse_badge,
            badge_color: node.color().to_string(),
            tooltip,
            cross_ref_marker: node.depth() >= 2 && xref.has_cross_refs(b.id),
        });
    }

    Scene {
        size,
        offset,
        transform,
        links,
        nodes,
    }
}
