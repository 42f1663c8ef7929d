use crate::utils::{label_lines, normalize_name};
use serde::{Deserialize, Serialize};

/// Stable node identity; equal to the node's pre-order index in the tree arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub(super) id: NodeId,
    pub(super) name: String,
    pub(super) desc: Option<String>,
    pub(super) color: String,
    pub(super) children: Vec<NodeId>,
    pub(super) parent: Option<NodeId>,
    pub(super) depth: usize,
    pub(super) collapsed: bool,
    pub(super) highlight: bool,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Display name; may contain `\n` line-break markers.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label_lines(&self) -> Vec<&str> {
        label_lines(&self.name)
    }

    pub fn line_count(&self) -> usize {
        self.name.split('\n').count()
    }

    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    pub fn desc(&self) -> Option<&str> {
        self.desc.as_deref().filter(|d| !d.is_empty())
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight
    }
}
