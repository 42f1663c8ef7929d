use super::*;

fn leaf(name: &str) -> NodeData {
    NodeData::leaf(name, "#3b82f6")
}

/// root -> { A -> { a1 -> { deep }, a2 }, B -> { b1, b2, b3 } }
fn sample() -> Tree {
    Tree::initialize(
        NodeData::leaf("root", "#ffffff").with_children(vec![
            leaf("A").with_children(vec![leaf("a1").with_children(vec![leaf("deep")]), leaf("a2")]),
            leaf("B").with_children(vec![leaf("b1"), leaf("b2"), leaf("b3")]),
        ]),
    )
}

fn names(tree: &Tree, ids: &[NodeId]) -> Vec<String> {
    ids.iter().map(|id| tree.node(*id).name().to_string()).collect()
}

fn id_of(tree: &Tree, name: &str) -> NodeId {
    tree.nodes()
        .iter()
        .find(|n| n.name() == name)
        .map(Node::id)
        .expect("node exists")
}

#[test]
fn identities_follow_pre_order() {
    let tree = sample();
    assert_eq!(
        names(&tree, &tree.flatten()),
        ["root", "A", "a1", "deep", "a2", "B", "b1", "b2", "b3"]
    );
    for (idx, n) in tree.nodes().iter().enumerate() {
        assert_eq!(n.id().index(), idx);
    }
}

#[test]
fn default_policy_collapses_depth_two_and_below() {
    let tree = sample();
    for n in tree.nodes() {
        assert_eq!(n.is_collapsed(), n.depth() >= 2, "node {}", n.name());
        assert!(!n.is_highlighted());
    }
}

#[test]
fn collect_visible_stops_at_collapsed_nodes() {
    let tree = sample();
    let visible = tree.collect_visible(tree.root());
    assert_eq!(
        names(&tree, &visible),
        ["root", "A", "a1", "a2", "B", "b1", "b2", "b3"]
    );
}

#[test]
fn collect_visible_links_parallel_visible_set() {
    let tree = sample();
    let visible = tree.collect_visible(tree.root());
    let links = tree.collect_visible_links(tree.root());
    assert_eq!(links.len(), visible.len() - 1);
    for ((parent, child), expected_child) in links.iter().zip(visible.iter().skip(1)) {
        assert_eq!(child, expected_child);
        assert_eq!(tree.node(*child).parent(), Some(*parent));
    }
}

#[test]
fn visible_children_of_collapsed_node_is_empty() {
    let tree = sample();
    let a1 = id_of(&tree, "a1");
    assert!(tree.node(a1).has_children());
    assert!(tree.visible_children(a1).is_empty());
}

#[test]
fn find_parent_and_path_by_identity() {
    let tree = sample();
    let deep = id_of(&tree, "deep");
    let a1 = id_of(&tree, "a1");
    let a = id_of(&tree, "A");
    assert_eq!(tree.find_parent(tree.root(), deep), Some(a1));
    assert_eq!(
        names(&tree, &tree.find_path(tree.root(), deep)),
        ["root", "A", "a1", "deep"]
    );
    assert_eq!(names(&tree, &tree.find_path(a, deep)), ["A", "a1", "deep"]);
}

#[test]
fn lookup_misses_are_empty_not_errors() {
    let tree = sample();
    let b = id_of(&tree, "B");
    let deep = id_of(&tree, "deep");
    assert_eq!(tree.find_parent(tree.root(), tree.root()), None);
    assert_eq!(tree.find_parent(b, deep), None, "deep is outside B's subtree");
    assert!(tree.find_path(b, deep).is_empty());
    let bogus = NodeId::new(999);
    assert_eq!(tree.find_parent(tree.root(), bogus), None);
    assert!(tree.find_path(tree.root(), bogus).is_empty());
    assert!(tree.collect_visible(bogus).is_empty());
}

#[test]
fn toggle_twice_restores_visible_set() {
    let mut tree = sample();
    let before = tree.collect_visible(tree.root());
    for id in tree.flatten() {
        let changed = tree.toggle_collapsed(id);
        assert_eq!(changed, tree.node(id).has_children());
        tree.toggle_collapsed(id);
        assert_eq!(tree.collect_visible(tree.root()), before, "node {id}");
    }
}

#[test]
fn depth_is_parent_depth_plus_one_under_any_collapse_state() {
    let mut tree = sample();
    let check = |tree: &Tree| {
        for n in tree.nodes() {
            if let Some(p) = n.parent() {
                assert_eq!(n.depth(), tree.node(p).depth() + 1);
            } else {
                assert_eq!(n.depth(), 0);
            }
        }
    };
    check(&tree);
    tree.expand_all();
    check(&tree);
    tree.collapse_to_depth(1);
    check(&tree);
    tree.toggle_collapsed(id_of(&tree, "A"));
    check(&tree);
}

#[test]
fn expand_ancestors_opens_every_collapsed_ancestor() {
    let mut tree = sample();
    tree.collapse_to_depth(0);
    let deep = id_of(&tree, "deep");
    assert_eq!(tree.expand_ancestors(deep), 3);
    assert!(tree.collect_visible(tree.root()).contains(&deep));
    assert!(tree.node(deep).is_collapsed(), "the target itself is left alone");
    assert_eq!(tree.expand_ancestors(deep), 0);
}

#[test]
fn collapse_to_depth_and_expand_all() {
    let mut tree = sample();
    tree.collapse_to_depth(1);
    assert_eq!(names(&tree, &tree.collect_visible(tree.root())), ["root", "A", "B"]);
    tree.expand_all();
    assert_eq!(tree.collect_visible(tree.root()).len(), tree.len());
}

#[test]
fn category_is_depth_one_ancestor() {
    let tree = sample();
    assert_eq!(tree.category(id_of(&tree, "deep")).as_deref(), Some("A"));
    assert_eq!(tree.category(id_of(&tree, "B")).as_deref(), Some("B"));
    assert_eq!(tree.category(tree.root()).as_deref(), Some("root"));
}

#[test]
fn highlight_flags_are_independent_of_structure() {
    let mut tree = sample();
    let b2 = id_of(&tree, "b2");
    tree.set_highlight(b2, true);
    assert_eq!(tree.highlighted().collect::<Vec<_>>(), vec![b2]);
    tree.clear_highlights();
    assert_eq!(tree.highlighted().count(), 0);
}
