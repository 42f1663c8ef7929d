//! "Same name elsewhere" index.
//!
//! Groups nodes by normalized display name (exact match after joining label lines). Distinct
//! concepts that share a label end up in the same group; nothing more semantic is attempted.

use crate::tree::{NodeId, Tree};
use indexmap::IndexMap;

#[derive(Debug, Clone, Default)]
pub struct CrossRefIndex {
    groups: IndexMap<String, Vec<NodeId>>,
    /// Group slot per node, indexed by `NodeId::index()`.
    slots: Vec<usize>,
}

impl CrossRefIndex {
    pub fn build(tree: &Tree) -> Self {
        let mut groups: IndexMap<String, Vec<NodeId>> = IndexMap::new();
        let mut slots = Vec::with_capacity(tree.len());
        for n in tree.nodes() {
            let entry = groups.entry(n.normalized_name());
            let slot = entry.index();
            entry.or_default().push(n.id());
            slots.push(slot);
        }
        let shared = groups.values().filter(|g| g.len() > 1).count();
        tracing::debug!(groups = groups.len(), shared, "cross-reference index built");
        Self { groups, slots }
    }

    /// All nodes sharing `normalized_name`, in pre-order.
    pub fn group(&self, normalized_name: &str) -> &[NodeId] {
        self.groups
            .get(normalized_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The group `id` belongs to (including `id`).
    pub fn group_of(&self, id: NodeId) -> &[NodeId] {
        self.slots
            .get(id.index())
            .and_then(|slot| self.groups.get_index(*slot))
            .map(|(_, g)| g.as_slice())
            .unwrap_or(&[])
    }

    /// Other nodes with the same normalized name; never contains `id`.
    pub fn others(&self, id: NodeId) -> Vec<NodeId> {
        self.group_of(id)
            .iter()
            .copied()
            .filter(|other| *other != id)
            .collect()
    }

    pub fn has_cross_refs(&self, id: NodeId) -> bool {
        self.group_of(id).len() > 1
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Groups with more than one member.
    pub fn shared_groups(&self) -> impl Iterator<Item = (&str, &[NodeId])> {
        self.groups
            .iter()
            .filter(|(_, g)| g.len() > 1)
            .map(|(k, g)| (k.as_str(), g.as_slice()))
    }
}
