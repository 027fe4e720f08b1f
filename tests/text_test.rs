//! Tests for the nested text view

use rstest::rstest;

use treelayout::application::Visualizer;
use treelayout::domain::TextFormat;
use treelayout::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

#[test]
fn given_scenario_map_when_rendering_bullets_then_d_nested_under_c() {
    let vis = Visualizer::default()
        .visualize(r#"{"A":["B","C"],"B":[],"C":["D"]}"#)
        .unwrap();

    assert_eq!(vis.text(TextFormat::Bullets), "- A\n  - B\n  - C\n    - D\n");
}

#[test]
fn given_empty_map_when_rendering_then_empty_string() {
    let vis = Visualizer::default().visualize("{}").unwrap();

    assert!(vis.layout.nodes.is_empty());
    assert!(vis.layout.lines.is_empty());
    assert_eq!(vis.text(TextFormat::Bullets), "");
    assert_eq!(vis.text(TextFormat::Html), "");
}

#[rstest]
#[case(r#"{"A":["B","C"],"B":[],"C":["D"]}"#, 4)]
#[case(r#"{"R":["A","B"],"A":["S"],"B":["S"]}"#, 5)]
#[case(r#"{"R":["A","B"],"A":["S"],"B":["S"],"S":["T","U"]}"#, 9)]
#[case(r#"{"A":["B","B","B"]}"#, 4)]
#[case(r#"{"P":[],"Q":["R"]}"#, 3)]
fn given_forest_when_rendering_bullets_then_one_bullet_per_occurrence(
    #[case] json: &str,
    #[case] occurrences: usize,
) {
    let vis = Visualizer::default().visualize(json).unwrap();
    let text = vis.text(TextFormat::Bullets);

    let bullets = text.lines().filter(|l| l.trim_start().starts_with("- ")).count();

    assert_eq!(bullets, occurrences);
    assert_eq!(vis.forest.iter().count(), occurrences);
    assert_eq!(vis.structure.occurrence_count(), occurrences);
}

#[test]
fn given_html_format_when_rendering_then_one_list_item_per_occurrence() {
    let vis = Visualizer::default()
        .visualize(r#"{"R":["A","B"],"A":["S"],"B":["S"]}"#)
        .unwrap();

    let html = vis.text(TextFormat::Html);

    assert_eq!(html.matches("<li").count(), 5);
    assert_eq!(html.matches("<ul>").count(), html.matches("</ul>").count());
    assert!(html.starts_with("<ul><li class=\"pl-6\">- R"));
}

#[test]
fn given_two_roots_when_rendering_tree_then_each_root_starts_a_tree() {
    let vis = Visualizer::default()
        .visualize(r#"{"P":["Q"],"X":[]}"#)
        .unwrap();

    let text = vis.text(TextFormat::Tree);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "P");
    assert!(lines[1].ends_with("Q"));
    assert_eq!(lines[2], "X");
}

#[test]
fn given_structure_when_layout_mutates_coordinates_then_text_view_unchanged() {
    let vis = Visualizer::default()
        .visualize(r#"{"A":["B"]}"#)
        .unwrap();
    let before = vis.text(TextFormat::Bullets);

    let mut forest = vis.forest;
    forest.translate(1000.0, 1000.0);

    assert_eq!(
        treelayout::domain::TextRenderer::default().render(&vis.structure),
        before
    );
}

fn chain(depth: usize) -> String {
    let mut json = String::from("{");
    for i in 0..depth - 1 {
        if i > 0 {
            json.push(',');
        }
        json.push_str(&format!("\"n{}\":[\"n{}\"]", i, i + 1));
    }
    json.push('}');
    json
}

#[test]
fn given_very_deep_chain_when_rendering_html_then_every_level_nested() {
    // Arrange
    let depth = 50_000;
    let vis = Visualizer::default().visualize(&chain(depth)).unwrap();

    // Act
    let html = vis.text(TextFormat::Html);

    // Assert
    assert_eq!(html.matches("<li").count(), depth);
    assert_eq!(html.matches("<ul>").count(), depth);
    assert_eq!(html.matches("</ul>").count(), depth);
    assert!(html.ends_with(&format!("- n{}</li>{}", depth - 1, "</ul></li>".repeat(depth - 1) + "</ul>")));
}

#[rstest]
#[case(TextFormat::Bullets)]
#[case(TextFormat::Html)]
#[case(TextFormat::Tree)]
fn given_deep_chain_when_rendering_then_one_line_or_item_per_level(#[case] format: TextFormat) {
    // Arrange: deep enough to leave termtree's recursive construction behind
    let depth = 3_000;
    let vis = Visualizer::default().visualize(&chain(depth)).unwrap();

    // Act
    let text = vis.text(format);

    // Assert
    let last = format!("n{}", depth - 1);
    match format {
        TextFormat::Html => assert_eq!(text.matches("<li").count(), depth),
        _ => {
            assert_eq!(text.lines().count(), depth);
            assert!(text.lines().last().unwrap().ends_with(&last));
        }
    }
    assert!(text.contains(&last));
}
