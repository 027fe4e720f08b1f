//! Tests for placement, connector lines and canvas centering

use rstest::rstest;

use treelayout::application::Visualizer;
use treelayout::domain::{
    parse_input, BoundsNormalizer, EdgeProjector, LayoutEngine, LayoutParams, TreeBuilder,
};
use treelayout::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

const EPS: f64 = 1e-9;

#[test]
fn given_scenario_map_when_laying_out_then_parent_is_midpoint_of_children() {
    // Arrange
    let adjacency = parse_input(r#"{"A":["B","C"],"B":[],"C":["D"]}"#).unwrap();
    let (mut forest, _) = TreeBuilder::new().build(&adjacency).unwrap();

    // Act
    LayoutEngine::new(&LayoutParams::default()).layout(&mut forest);

    // Assert: pre-centering coordinates
    let at = |name: &str| {
        let n = forest.node_by_name(name).unwrap();
        (n.x, n.y)
    };
    assert_eq!(at("B"), (50.0, 170.0));
    assert_eq!(at("D"), (230.0, 290.0));
    assert_eq!(at("C"), (230.0, 170.0));
    assert_eq!(at("A"), ((50.0 + 230.0) / 2.0, 50.0));

    let edges: Vec<(&str, &str)> = forest
        .edges()
        .map(|(p, c)| (p.name.as_str(), c.name.as_str()))
        .collect();
    assert_eq!(edges, vec![("A", "B"), ("A", "C"), ("C", "D")]);
}

#[rstest]
#[case(2)]
#[case(5)]
#[case(9)]
fn given_root_with_leaf_children_when_laying_out_then_leaves_one_spacing_apart(
    #[case] leaves: usize,
) {
    // Arrange
    let children: Vec<String> = (0..leaves).map(|i| format!("\"L{}\"", i)).collect();
    let json = format!("{{\"R\": [{}]}}", children.join(","));
    let adjacency = parse_input(&json).unwrap();
    let (mut forest, _) = TreeBuilder::new().build(&adjacency).unwrap();
    let params = LayoutParams::default();

    // Act
    LayoutEngine::new(&params).layout(&mut forest);

    // Assert
    let xs: Vec<f64> = (0..leaves)
        .map(|i| forest.node_by_name(&format!("L{}", i)).unwrap().x)
        .collect();
    for pair in xs.windows(2) {
        assert_eq!(pair[1] - pair[0], params.horizontal_spacing);
    }
}

#[test]
fn given_parent_with_uneven_subtrees_when_laying_out_then_centers_on_extremes_not_mean() {
    // Arrange: B has three leaves, C is a single leaf
    let adjacency = parse_input(r#"{"A":["B","C"],"B":["x","y","z"]}"#).unwrap();
    let (mut forest, _) = TreeBuilder::new().build(&adjacency).unwrap();

    // Act
    LayoutEngine::new(&LayoutParams::default()).layout(&mut forest);

    // Assert
    let x = |name: &str| forest.node_by_name(name).unwrap().x;
    assert_eq!(x("B"), 230.0);
    assert_eq!(x("C"), 590.0);
    assert_eq!(x("A"), (230.0 + 590.0) / 2.0);
}

#[rstest]
#[case(r#"{"A": []}"#)]
#[case(r#"{"A":["B","C"],"B":[],"C":["D"]}"#)]
#[case(r#"{"R":["A","B","C","D","E","F","G"]}"#)]
#[case(r#"{"A":["B"],"B":["C"],"C":["D"],"D":["E"],"E":["F"],"F":["G"]}"#)]
#[case(r#"{"P":["Q"],"X":["Y","Z"],"K":[]}"#)]
#[case(r#"{"R":["A","B"],"A":["S"],"B":["S"],"S":["T","U"]}"#)]
fn given_any_forest_when_normalized_then_box_center_is_canvas_center(#[case] json: &str) {
    // Act
    let vis = Visualizer::default().visualize(json).unwrap();

    // Assert: the clamped box, including the translated origin anchor
    let r = LayoutParams::default().node_radius;
    let layout = &vis.layout;
    let xs = layout.nodes.iter().map(|n| n.x).chain([layout.offset.dx]);
    let ys = layout.nodes.iter().map(|n| n.y).chain([layout.offset.dy]);
    let (min_x, max_x) = xs.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let (min_y, max_y) = ys.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let center_x = (min_x - r + max_x + r) / 2.0;
    let center_y = (min_y - r + max_y + r) / 2.0;
    assert!((center_x - layout.canvas.width / 2.0).abs() < EPS);
    assert!((center_y - layout.canvas.height / 2.0).abs() < EPS);
    assert!(layout.canvas.width >= 800.0);
    assert!(layout.canvas.height >= 600.0);
}

#[test]
fn given_translation_when_normalizing_then_lines_move_with_nodes() {
    // Arrange
    let params = LayoutParams::default();
    let adjacency = parse_input(r#"{"A":["B"]}"#).unwrap();
    let (mut forest, _) = TreeBuilder::new().build(&adjacency).unwrap();
    LayoutEngine::new(&params).layout(&mut forest);
    let mut lines = EdgeProjector::new(&params).project(&forest);

    // Act
    let (_, offset) = BoundsNormalizer::new(&params).normalize(&mut forest, &mut lines);

    // Assert
    let a = forest.node_by_name("A").unwrap();
    let b = forest.node_by_name("B").unwrap();
    assert_eq!(a.x, 50.0 + offset.dx);
    assert_eq!(lines[0].x1, a.x);
    assert_eq!(lines[0].y1, a.y + params.node_radius);
    assert_eq!(lines[0].x2, b.x);
    assert_eq!(lines[0].y2, b.y - params.node_radius);
}

#[test]
fn given_shared_node_when_laying_out_then_exposes_level_and_layout_depth() {
    // Arrange: S first built under R (level 1), last placed under A (depth 2)
    let vis = Visualizer::default()
        .visualize(r#"{"R":["S","A"],"A":["S"]}"#)
        .unwrap();

    // Assert
    let s = vis.forest.node_by_name("S").unwrap();
    assert_eq!(s.level, 1);
    assert_eq!(s.depth, 2);
    assert_eq!(vis.layout.nodes.len(), 3);
    assert_eq!(vis.layout.lines.len(), 3);
}

#[test]
fn given_custom_params_when_laying_out_then_spacing_follows_params() {
    // Arrange
    let params = LayoutParams {
        horizontal_spacing: 10.0,
        vertical_spacing: 20.0,
        padding: 0.0,
        ..LayoutParams::default()
    };
    let adjacency = parse_input(r#"{"A":["B","C"]}"#).unwrap();
    let (mut forest, _) = TreeBuilder::new().build(&adjacency).unwrap();

    // Act
    LayoutEngine::new(&params).layout(&mut forest);

    // Assert
    let at = |name: &str| {
        let n = forest.node_by_name(name).unwrap();
        (n.x, n.y)
    };
    assert_eq!(at("B"), (0.0, 20.0));
    assert_eq!(at("C"), (10.0, 20.0));
    assert_eq!(at("A"), (5.0, 0.0));
}
