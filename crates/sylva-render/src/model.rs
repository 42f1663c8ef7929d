use serde::{Deserialize, Serialize};
use sylva_core::NodeId;
use sylva_core::geom::{Point, Rect, Vector, point, rect, vector};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let mut it = points.into_iter();
        let (x0, y0) = it.next()?;
        let mut b = Self {
            min_x: x0,
            min_y: y0,
            max_x: x0,
            max_y: y0,
        };
        for (x, y) in it {
            b.min_x = b.min_x.min(x);
            b.min_y = b.min_y.min(y);
            b.max_x = b.max_x.max(x);
            b.max_y = b.max_y.max(y);
        }
        Some(b)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Position and size of one visible node in layout space.
///
/// `x` is the box's left edge, `y` its vertical center.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NodeBox {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Vertical space reserved for the subtree, in layout units.
    pub extent: f64,
}

impl NodeBox {
    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height / 2.0
    }

    pub fn center(&self) -> Point {
        point(self.x + self.width / 2.0, self.y)
    }

    pub fn rect(&self) -> Rect {
        rect(self.x, self.top(), self.width, self.height)
    }
}

/// Result of one full layout pass over the visible set.
#[derive(Debug, Clone, Default)]
pub struct TreeLayout {
    boxes: Vec<Option<NodeBox>>,
    /// Visible nodes in pre-order.
    pub order: Vec<NodeId>,
    /// Visible `(parent, child)` edges.
    pub links: Vec<(NodeId, NodeId)>,
}

impl TreeLayout {
    pub(crate) fn new(
        boxes: Vec<Option<NodeBox>>,
        order: Vec<NodeId>,
        links: Vec<(NodeId, NodeId)>,
    ) -> Self {
        Self {
            boxes,
            order,
            links,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeBox> {
        self.boxes.get(id.index())?.as_ref()
    }

    pub fn is_visible(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Visible boxes in pre-order.
    pub fn boxes(&self) -> impl Iterator<Item = &NodeBox> {
        self.order.iter().filter_map(|id| self.get(*id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn root_extent(&self) -> f64 {
        self.order
            .first()
            .and_then(|id| self.get(*id))
            .map_or(0.0, |b| b.extent)
    }

    /// Smallest and largest node-center `y`.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let b = Bounds::from_points(self.boxes().map(|b| (0.0, b.y)))?;
        Some((b.min_y, b.max_y))
    }

    /// Offset from layout space to scene space: a fixed left inset, and the visible set
    /// vertically centered in a canvas of `canvas_height` pixels.
    pub fn scene_offset(&self, origin_x: f64, canvas_height: f64) -> Vector {
        let (min_y, max_y) = self.y_range().unwrap_or((0.0, 0.0));
        vector(origin_x, canvas_height / 2.0 - (min_y + max_y) / 2.0)
    }
}
