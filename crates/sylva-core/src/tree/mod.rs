//! Arena-backed tree model.
//!
//! Nodes are stored in a flat `Vec` indexed by [`NodeId`]. Identities are assigned once, in a
//! single pre-order pass, and the topology never changes afterwards: only the collapsed and
//! highlight flags are mutable.

mod node;

#[cfg(test)]
mod tests;

pub use node::{Node, NodeId};

use crate::data::NodeData;

/// Nodes at this depth or deeper start collapsed.
pub const DEFAULT_COLLAPSE_DEPTH: usize = 2;

#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    /// Builds the arena from startup data using the default collapse policy.
    pub fn initialize(root: NodeData) -> Self {
        Self::initialize_with_collapse_depth(root, DEFAULT_COLLAPSE_DEPTH)
    }

    pub fn initialize_with_collapse_depth(root: NodeData, collapse_depth: usize) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(root.count()),
            root: NodeId::new(0),
        };
        tree.insert(root, None, 0, collapse_depth);
        tracing::debug!(nodes = tree.nodes.len(), "tree initialized");
        tree
    }

    fn insert(
        &mut self,
        data: NodeData,
        parent: Option<NodeId>,
        depth: usize,
        collapse_depth: usize,
    ) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.nodes.push(Node {
            id,
            name: data.name,
            desc: data.desc,
            color: data.color,
            children: Vec::new(),
            parent,
            depth,
            collapsed: depth >= collapse_depth,
            highlight: false,
        });
        let children = data.children.unwrap_or_default();
        let mut ids = Vec::with_capacity(children.len());
        for child in children {
            ids.push(self.insert(child, Some(id), depth + 1, collapse_depth));
        }
        self.nodes[id.index()].children = ids;
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Panics if `id` does not belong to this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// Every node in pre-order, regardless of collapse state.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn flatten(&self) -> Vec<NodeId> {
        self.nodes.iter().map(Node::id).collect()
    }

    /// Children of `id` unless it is collapsed.
    pub fn visible_children(&self, id: NodeId) -> &[NodeId] {
        match self.get(id) {
            Some(n) if !n.collapsed => &n.children,
            _ => &[],
        }
    }

    /// Pre-order traversal from `from` following only visible children; `from` is always included.
    pub fn collect_visible(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(from) {
            return out;
        }
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.visible_children(id).iter().rev().copied());
        }
        out
    }

    /// One `(parent, child)` pair per visible edge, in the order the children are visited by
    /// [`Tree::collect_visible`].
    pub fn collect_visible_links(&self, from: NodeId) -> Vec<(NodeId, NodeId)> {
        self.collect_visible(from)
            .into_iter()
            .skip(1)
            .filter_map(|child| self.node(child).parent.map(|p| (p, child)))
            .collect()
    }

    /// Parent of `target` within the subtree rooted at `root`.
    ///
    /// `None` when `target` is `root` itself or lies outside that subtree.
    pub fn find_parent(&self, root: NodeId, target: NodeId) -> Option<NodeId> {
        if target == root || !self.contains(target) {
            return None;
        }
        let parent = self.node(target).parent?;
        self.is_ancestor_or_self(root, parent).then_some(parent)
    }

    /// Nodes from `root` to `target` inclusive; empty when `target` is not reachable from `root`.
    pub fn find_path(&self, root: NodeId, target: NodeId) -> Vec<NodeId> {
        if !self.contains(root) || !self.contains(target) {
            return Vec::new();
        }
        let mut path = vec![target];
        let mut cur = target;
        while cur != root {
            match self.node(cur).parent {
                Some(p) => {
                    path.push(p);
                    cur = p;
                }
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }

    pub fn path_to(&self, target: NodeId) -> Vec<NodeId> {
        self.find_path(self.root, target)
    }

    /// Strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.get(id).and_then(|n| n.parent), |p| self.node(*p).parent)
    }

    fn is_ancestor_or_self(&self, ancestor: NodeId, id: NodeId) -> bool {
        id == ancestor || self.ancestors(id).any(|a| a == ancestor)
    }

    /// The depth-1 ancestor's normalized name (the node's own name at depth <= 1).
    pub fn category(&self, id: NodeId) -> Option<String> {
        let node = self.get(id)?;
        if node.depth <= 1 {
            return Some(node.normalized_name());
        }
        self.ancestors(id)
            .find(|a| self.node(*a).depth == 1)
            .map(|a| self.node(a).normalized_name())
    }

    /// Flips the collapsed flag of a node with children. Returns whether anything changed.
    pub fn toggle_collapsed(&mut self, id: NodeId) -> bool {
        match self.nodes.get_mut(id.index()) {
            Some(n) if n.has_children() => {
                n.collapsed = !n.collapsed;
                true
            }
            _ => false,
        }
    }

    pub fn set_collapsed(&mut self, id: NodeId, collapsed: bool) {
        if let Some(n) = self.nodes.get_mut(id.index()) {
            n.collapsed = collapsed;
        }
    }

    pub fn set_highlight(&mut self, id: NodeId, highlight: bool) {
        if let Some(n) = self.nodes.get_mut(id.index()) {
            n.highlight = highlight;
        }
    }

    pub fn clear_highlights(&mut self) {
        for n in &mut self.nodes {
            n.highlight = false;
        }
    }

    pub fn highlighted(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().filter(|n| n.highlight).map(Node::id)
    }

    /// Every node becomes `collapsed = depth >= max_depth`.
    pub fn collapse_to_depth(&mut self, max_depth: usize) {
        for n in &mut self.nodes {
            n.collapsed = n.depth >= max_depth;
        }
    }

    pub fn expand_all(&mut self) {
        for n in &mut self.nodes {
            n.collapsed = false;
        }
    }

    /// Clears `collapsed` on every strict ancestor of `id`. Returns how many flags changed.
    pub fn expand_ancestors(&mut self, id: NodeId) -> usize {
        let ancestors: Vec<NodeId> = self.ancestors(id).collect();
        let mut changed = 0;
        for a in ancestors {
            let n = &mut self.nodes[a.index()];
            if n.collapsed {
                n.collapsed = false;
                changed += 1;
            }
        }
        changed
    }
}
