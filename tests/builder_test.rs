//! Tests for TreeBuilder: root detection, sharing and cycle handling

use rstest::rstest;

use treelayout::domain::{parse_input, DomainError, Forest, StructuralCopy, TreeBuilder};
use treelayout::util::testing;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn build(json: &str) -> Result<(Forest, StructuralCopy), DomainError> {
    let adjacency = parse_input(json).expect("valid input");
    TreeBuilder::new().build(&adjacency)
}

#[rstest]
#[case(r#"{"A": ["X"], "B": ["Y"], "C": []}"#, &["A", "B", "C"])]
#[case(r#"{"C": [], "A": ["Z"], "B": []}"#, &["C", "A", "B"])]
#[case(r#"{"solo": []}"#, &["solo"])]
fn given_no_key_used_as_child_when_building_then_every_key_is_root_in_order(
    #[case] json: &str,
    #[case] expected: &[&str],
) {
    // Act
    let (forest, _) = build(json).unwrap();

    // Assert
    assert_eq!(forest.root_names(), expected);
}

#[test]
fn given_scenario_map_when_building_then_single_root_with_expected_children() {
    // Act
    let (forest, copy) = build(r#"{"A":["B","C"],"B":[],"C":["D"]}"#).unwrap();

    // Assert
    assert_eq!(forest.root_names(), vec!["A"]);
    let names: Vec<&str> = forest.nodes().map(|(_, n)| n.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C", "D"]);
    let levels: Vec<usize> = forest.nodes().map(|(_, n)| n.level).collect();
    assert_eq!(levels, vec![0, 1, 1, 2]);
    assert_eq!(copy.occurrence_count(), 4);
}

#[test]
fn given_empty_map_when_building_then_empty_forest() {
    // Act
    let (forest, copy) = build("{}").unwrap();

    // Assert
    assert!(forest.is_empty());
    assert!(forest.roots().is_empty());
    assert!(copy.is_empty());
}

#[test]
fn given_mutual_reference_when_building_then_cycle_detected_at_first_key() {
    // Arrange: every key is someone's child, so "X" is the fallback root
    // and "Y" leads straight back to it.

    // Act
    let result = build(r#"{"X":["Y"],"Y":["X"]}"#);

    // Assert
    assert_eq!(result.err(), Some(DomainError::CycleDetected("X".to_string())));
}

#[test]
fn given_every_key_referenced_without_reachable_cycle_when_building_then_first_key_is_only_root() {
    // Arrange: "B" references itself, but "A" (first key) never reaches it.

    // Act
    let (forest, _) = build(r#"{"A":["C"],"B":["A","B"]}"#).unwrap();

    // Assert
    assert_eq!(forest.root_names(), vec!["A"]);
    assert!(forest.lookup("B").is_none(), "B is unreachable from the fallback root");
    assert_eq!(forest.len(), 2);
}

#[test]
fn given_deep_cycle_when_building_then_names_the_revisited_ancestor() {
    // Act
    let result = build(r#"{"R":["A"],"A":["B"],"B":["C"],"C":["A"]}"#);

    // Assert
    assert_eq!(result.err(), Some(DomainError::CycleDetected("A".to_string())));
}

#[test]
fn given_diamond_when_building_then_shared_node_but_copy_duplicates_it() {
    // Act
    let (forest, copy) = build(r#"{"R":["A","B"],"A":["S"],"B":["S"],"S":["T"]}"#).unwrap();

    // Assert
    assert_eq!(forest.len(), 5);
    let s = forest.lookup("S").unwrap();
    assert_eq!(forest.node_by_name("A").unwrap().children, vec![s]);
    assert_eq!(forest.node_by_name("B").unwrap().children, vec![s]);

    let names: Vec<&str> = copy.iter().map(|(_, n)| n.name.as_str()).collect();
    assert_eq!(names, vec!["R", "A", "S", "T", "B", "S", "T"]);
}

#[test]
fn given_deep_chain_when_building_then_no_stack_exhaustion() {
    // Arrange: n0 -> n1 -> ... -> n9999
    let depth = 10_000;
    let mut json = String::from("{");
    for i in 0..depth - 1 {
        if i > 0 {
            json.push(',');
        }
        json.push_str(&format!("\"n{}\":[\"n{}\"]", i, i + 1));
    }
    json.push('}');

    // Act
    let (forest, copy) = build(&json).unwrap();

    // Assert
    assert_eq!(forest.len(), depth);
    assert_eq!(forest.node_by_name(&format!("n{}", depth - 1)).unwrap().level, depth - 1);
    assert_eq!(copy.occurrence_count(), depth);
}
