use sylva_core::geom::{ViewTransform, point, size};
use sylva_core::{CrossRefIndex, NodeData, Tree};
use sylva_render::layout::{LayoutSettings, layout_tree};
use sylva_render::scene::build_scene;
use sylva_render::text::CachedTextMeasurer;
use sylva_render::{LayoutOptions, render_svg};

fn wide_tree(fanout: usize, depth: usize) -> NodeData {
    fn build(prefix: &str, fanout: usize, depth: usize) -> NodeData {
        let node = NodeData::leaf(prefix, "#3b82f6");
        if depth == 0 {
            return node;
        }
        node.with_children(
            (0..fanout)
                .map(|i| build(&format!("{prefix}.{i}"), fanout, depth - 1))
                .collect(),
        )
    }
    build("n", fanout, depth)
}

#[test]
fn every_visible_node_has_a_box_and_nothing_else_does() {
    let mut tree = Tree::initialize(wide_tree(3, 4));
    tree.collapse_to_depth(2);
    let settings = LayoutSettings::default();
    let layout = layout_tree(&tree, &CachedTextMeasurer::deterministic(None), &settings);

    let visible = tree.collect_visible(tree.root());
    assert_eq!(layout.len(), visible.len());
    for id in tree.flatten() {
        assert_eq!(
            layout.is_visible(id),
            visible.contains(&id),
            "visibility mismatch for node {id}"
        );
    }
    for (parent, child) in &layout.links {
        assert!(layout.is_visible(*parent) && layout.is_visible(*child));
        assert_eq!(tree.node(*child).parent(), Some(*parent));
    }
}

#[test]
fn children_sit_right_of_their_parent() {
    let mut tree = Tree::initialize(wide_tree(2, 5));
    tree.expand_all();
    let layout = layout_tree(
        &tree,
        &CachedTextMeasurer::deterministic(None),
        &LayoutSettings::default(),
    );
    for (parent, child) in &layout.links {
        let p = layout.get(*parent).expect("parent box");
        let c = layout.get(*child).expect("child box");
        assert!(c.x > p.x + p.width, "child {} overlaps parent {} horizontally", c.id, p.id);
    }
}

#[test]
fn hit_test_follows_the_camera() {
    let mut tree = Tree::initialize(wide_tree(2, 2));
    tree.expand_all();
    let xref = CrossRefIndex::build(&tree);
    let settings = LayoutSettings::default();
    let layout = layout_tree(&tree, &CachedTextMeasurer::deterministic(None), &settings);
    let mut scene = build_scene(
        &tree,
        &xref,
        &layout,
        settings.origin_x,
        size(900.0, 600.0),
        ViewTransform::IDENTITY,
    );

    let target = scene.nodes[3].clone();
    let center = target.rect.center();
    assert_eq!(scene.hit_test(center), Some(target.id));

    let camera = ViewTransform::new(-120.0, 40.0, 2.0);
    scene.set_transform(camera);
    assert_eq!(scene.hit_test(camera.apply(center)), Some(target.id));
    assert_eq!(scene.hit_test(point(-10_000.0, -10_000.0)), None);
}

#[test]
fn visible_set_is_vertically_centered() {
    let mut tree = Tree::initialize(wide_tree(3, 2));
    tree.expand_all();
    let scene = sylva_render::render_scene(&tree, &LayoutOptions::default(), size(800.0, 500.0));
    let ys: Vec<f64> = scene.nodes.iter().map(|n| n.rect.center().y).collect();
    let min = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let max = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    assert!(((min + max) / 2.0 - 250.0).abs() < 1e-9);
    assert_eq!(scene.nodes[0].rect.min_x(), 60.0);
}

#[test]
fn svg_output_is_deterministic() {
    let tree = Tree::initialize(wide_tree(3, 3));
    let options = LayoutOptions::default();
    let a = render_svg(&tree, &options, size(640.0, 480.0));
    let b = render_svg(&tree, &options, size(640.0, 480.0));
    assert_eq!(a, b);
    assert!(a.contains(r#"scale(1)"#));
}

#[test]
fn layout_boxes_serialize_with_stable_field_names() {
    let tree = Tree::initialize(NodeData::leaf("root", "#fff").with_children(vec![
        NodeData::leaf("only\nchild", "#3b82f6"),
    ]));
    let layout = layout_tree(
        &tree,
        &CachedTextMeasurer::deterministic(None),
        &LayoutSettings::default(),
    );
    let boxes: Vec<_> = layout.boxes().collect();
    let json = serde_json::to_value(&boxes).expect("layout serializes");
    let arr = json.as_array().expect("array");
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["id"], 0);
    assert_eq!(arr[1]["id"], 1);
    assert_eq!(arr[0]["x"], 0.0);
    for key in ["x", "y", "width", "height", "extent"] {
        assert!(arr[1][key].is_f64(), "missing {key}");
    }
}
