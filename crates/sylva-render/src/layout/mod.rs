//! Indented left-to-right tree layout.
//!
//! Two passes over the visible subtree:
//! 1. post-order extent pass: a leaf reserves one unit, an internal node the sum of its visible
//!    children's extents plus one sibling gap per boundary;
//! 2. pre-order position pass: children stack downwards from the parent's band start, and a parent
//!    sits at the midpoint of its first and last child.
//!
//! Below the root, extents are additionally floored by the node's own box height (in units), and
//! children are shifted down when the parent's box would otherwise poke out of its band. Boxes
//! shorter than a unit never trigger either adjustment, so single-line labels get the classic
//! layout; taller multi-line boxes keep sibling spans disjoint. Collapsed subtrees count as leaves.

pub mod sizing;


use crate::model::{NodeBox, TreeLayout};
use crate::text::CachedTextMeasurer;
use sizing::{node_height, node_width};
use sylva_core::{ExplorerConfig, NodeId, Tree};

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    /// Horizontal parent-to-child spacing indexed by the child's depth; the last entry applies
    /// to every deeper level.
    pub level_gap: Vec<f64>,
    /// Added to a parent's width when that exceeds the level gap.
    pub link_gap: f64,
    /// Vertical gap between sibling bands, in layout units.
    pub sibling_gap: f64,
    /// Pixels per layout unit.
    pub unit_px: f64,
    /// Left inset of the scene.
    pub origin_x: f64,
    pub font_family: Option<String>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self::from_config(&ExplorerConfig::default())
    }
}

impl LayoutSettings {
    pub fn from_config(cfg: &ExplorerConfig) -> Self {
        Self {
            level_gap: cfg
                .get_f64_list("layout.levelGap")
                .unwrap_or_else(|| vec![0.0, 180.0, 145.0, 125.0, 110.0]),
            link_gap: cfg.get_f64("layout.linkGap").unwrap_or(18.0),
            sibling_gap: cfg.get_f64("layout.siblingGap").unwrap_or(0.08).max(0.0),
            unit_px: cfg
                .get_f64("layout.unitPx")
                .filter(|v| *v > 0.0)
                .unwrap_or(28.0),
            origin_x: cfg.get_f64("scene.originX").unwrap_or(60.0),
            font_family: cfg.get_str("fontFamily").map(str::to_string),
        }
    }

    pub fn level_gap_for(&self, depth: usize) -> f64 {
        match self.level_gap.len() {
            0 => 0.0,
            n => self.level_gap[depth.min(n - 1)],
        }
    }
}

/// Band geometry of one subtree, in layout units relative to the band start.
#[derive(Debug, Clone, Copy, Default)]
struct Span {
    extent: f64,
    /// Offset of the first child's band.
    lead: f64,
    /// Offset of the node's own center.
    anchor: f64,
}

struct LayoutPass<'a> {
    tree: &'a Tree,
    settings: &'a LayoutSettings,
    boxes: Vec<Option<NodeBox>>,
    spans: Vec<Span>,
}

impl<'a> LayoutPass<'a> {
    fn measure_extent(&mut self, id: NodeId) -> f64 {
        let tree: &'a Tree = self.tree;
        let gap = self.settings.sibling_gap;
        // The root has no neighbouring bands, so its own height never widens its extent.
        let half = if id == tree.root() {
            0.0
        } else {
            self.boxes[id.index()].map_or(0.0, |b| b.height) / self.settings.unit_px / 2.0
        };
        let children = tree.visible_children(id);

        let span = if children.is_empty() {
            let extent = (2.0 * half).max(1.0);
            Span {
                extent,
                lead: 0.0,
                anchor: extent / 2.0,
            }
        } else {
            let mut offset = 0.0;
            let mut first_anchor = None;
            let mut last_anchor = 0.0;
            for (idx, child) in children.iter().enumerate() {
                if idx > 0 {
                    offset += gap;
                }
                let extent = self.measure_extent(*child);
                let anchor = offset + self.spans[child.index()].anchor;
                first_anchor.get_or_insert(anchor);
                last_anchor = anchor;
                offset += extent;
            }
            let mid = (first_anchor.unwrap_or(0.0) + last_anchor) / 2.0;
            let lead = (half - mid).max(0.0);
            Span {
                extent: (lead + offset).max(lead + mid + half),
                lead,
                anchor: lead + mid,
            }
        };

        self.spans[id.index()] = span;
        if let Some(b) = self.boxes[id.index()].as_mut() {
            b.extent = span.extent;
        }
        span.extent
    }

    fn place(&mut self, id: NodeId, x: f64, top: f64) {
        let tree: &'a Tree = self.tree;
        let span = self.spans[id.index()];
        let width = match self.boxes[id.index()].as_mut() {
            Some(b) => {
                b.x = x;
                b.y = top + span.anchor;
                b.width
            }
            None => return,
        };

        let children = tree.visible_children(id);
        if children.is_empty() {
            return;
        }
        let depth = tree.node(id).depth();
        let child_x = x + self
            .settings
            .level_gap_for(depth + 1)
            .max(width + self.settings.link_gap);
        let mut offset = top + span.lead;
        for child in children {
            self.place(*child, child_x, offset);
            offset += self.spans[child.index()].extent + self.settings.sibling_gap;
        }
    }
}

/// Lays out every node visible from the root. Re-run in full after any visibility change.
pub fn layout_tree(
    tree: &Tree,
    measurer: &CachedTextMeasurer,
    settings: &LayoutSettings,
) -> TreeLayout {
    let order = tree.collect_visible(tree.root());
    let links = tree.collect_visible_links(tree.root());

    let mut boxes: Vec<Option<NodeBox>> = vec![None; tree.len()];
    for id in &order {
        let node = tree.node(*id);
        boxes[id.index()] = Some(NodeBox {
            id: *id,
            x: 0.0,
            y: 0.0,
            width: node_width(node, measurer),
            height: node_height(node),
            extent: 0.0,
        });
    }

    let mut pass = LayoutPass {
        tree,
        settings,
        boxes,
        spans: vec![Span::default(); tree.len()],
    };
    if !order.is_empty() {
        pass.measure_extent(tree.root());
        pass.place(tree.root(), 0.0, 0.0);
    }

    let mut boxes = pass.boxes;
    for b in boxes.iter_mut().flatten() {
        b.y *= settings.unit_px;
    }

    let layout = TreeLayout::new(boxes, order, links);
    tracing::debug!(
        visible = layout.len(),
        root_extent = layout.root_extent(),
        "tree laid out"
    );
    layout
}
