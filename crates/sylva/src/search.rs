//! Substring search over node names.

use sylva_core::{NodeId, Tree};

/// Trimmed, lowercased form of a search query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Nodes whose lowercased normalized name contains the normalized query, in pre-order.
/// An empty query matches nothing.
pub fn find_matches(tree: &Tree, query: &str) -> Vec<NodeId> {
    let q = normalize_query(query);
    if q.is_empty() {
        return Vec::new();
    }
    tree.nodes()
        .iter()
        .filter(|n| n.normalized_name().to_lowercase().contains(&q))
        .map(|n| n.id())
        .collect()
}

/// Replaces the highlight set with the matches of `query` and expands their ancestors.
/// Returns the match count; the caller re-renders.
pub fn apply_search(tree: &mut Tree, query: &str) -> usize {
    tree.clear_highlights();
    let matches = find_matches(tree, query);
    for id in &matches {
        tree.set_highlight(*id, true);
        tree.expand_ancestors(*id);
    }
    tracing::debug!(query, matches = matches.len(), "search applied");
    matches.len()
}
