//! Integration tests for the diff module.
//!
//! Tests the complete diff workflow from wire profiles to a decoded
//! diff tree.

use super::*;
use crate::codec::Bar;
use crate::parser::schema::{Flamebearer, Format, Metadata, Profile};
use crate::tree::builder::{build_diff_tree, build_tree};
use crate::tree::node::{DiffNode, Side};
use crate::utils::error::FlamebearerError;
use pretty_assertions::assert_eq;

/// Helper function to create a single-format test profile
fn create_test_profile(names: &[&str], levels: Vec<Vec<i64>>, num_ticks: u64, max_self: u64) -> Profile {
    Profile {
        version: 1,
        flamebearer: Flamebearer {
            names: names.iter().map(|s| s.to_string()).collect(),
            levels,
            num_ticks,
            max_self,
            format: None,
        },
        metadata: Metadata {
            units: Some("samples".to_string()),
            sample_rate: Some(100),
            spy_name: Some("gospy".to_string()),
            ..Metadata::default()
        },
        left_ticks: None,
        right_ticks: None,
    }
}

/// total(3) -> a(3) -> b(1), c(2)
fn create_base_profile() -> Profile {
    create_test_profile(
        &["total", "a", "b", "c"],
        vec![
            vec![0, 3, 0, 0],
            vec![0, 3, 0, 1],
            vec![0, 1, 1, 2, 0, 2, 2, 3],
        ],
        3,
        2,
    )
}

/// total(5) -> a(2), d(3)
fn create_target_profile() -> Profile {
    create_test_profile(
        &["total", "a", "d"],
        vec![vec![0, 5, 0, 0], vec![0, 2, 2, 1, 0, 3, 3, 2]],
        5,
        3,
    )
}

#[test]
fn test_identical_profiles_have_equal_sides() {
    let base = create_base_profile();
    let outcome = diff_profiles(&base, &base).unwrap();
    assert!(outcome.is_clean());

    let tree = build_diff_tree(&outcome.value.flamebearer).unwrap().value;
    let mut visited = 0;
    tree.walk(&mut |node, _| {
        visited += 1;
        assert_eq!(node.total_left(), node.total_right(), "{}", node.name);
        assert_eq!(node.self_left(), node.self_right(), "{}", node.name);
    });
    assert_eq!(visited, 4);
}

#[test]
fn test_projection_reproduces_inputs() {
    let base = create_base_profile();
    let target = create_target_profile();

    let left = build_tree(&base.flamebearer).unwrap().value;
    let right = build_tree(&target.flamebearer).unwrap().value;
    let tree = diff_trees(&left, &right);

    assert_eq!(tree.project(Side::Left), Some(left));
    assert_eq!(tree.project(Side::Right), Some(right));
}

#[test]
fn test_one_sided_nodes() {
    let left = build_tree(&create_base_profile().flamebearer).unwrap().value;
    let right = build_tree(&create_target_profile().flamebearer).unwrap().value;
    let tree = diff_trees(&left, &right);

    let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "d"]);

    let d = tree.find(&["d"]).unwrap();
    assert_eq!(d.left, None);
    assert_eq!(d.right, Some(Bar::new(2, 3, 3)));

    let b = tree.find(&["a", "b"]).unwrap();
    assert_eq!(b.left, Some(Bar::new(0, 1, 1)));
    assert_eq!(b.right, None);
}

#[test]
fn test_diff_profile_round_trips_through_wire() {
    let base = create_base_profile();
    let target = create_target_profile();
    let outcome = diff_profiles(&base, &target).unwrap();
    let profile = outcome.value;

    assert_eq!(profile.format().unwrap(), Format::Double);
    assert_eq!(profile.flamebearer.num_ticks, 5);
    assert_eq!(profile.flamebearer.max_self, 3);
    assert_eq!(profile.left_ticks, Some(3));
    assert_eq!(profile.right_ticks, Some(5));
    assert_eq!(profile.metadata.units.as_deref(), Some("samples"));

    let left = build_tree(&base.flamebearer).unwrap().value;
    let right = build_tree(&target.flamebearer).unwrap().value;
    let decoded = build_diff_tree(&profile.flamebearer).unwrap();
    assert!(decoded.is_clean());
    assert_eq!(decoded.value, diff_trees(&left, &right));
}

#[test]
fn test_diff_is_deterministic() {
    let base = create_base_profile();
    let target = create_target_profile();
    let first = diff_profiles(&base, &target).unwrap().value;
    let second = diff_profiles(&base, &target).unwrap().value;
    assert_eq!(first, second);
}

#[test]
fn test_duplicate_siblings_match_by_ordinal() {
    // left: total -> x(1), x(2) ; right: total -> x(3)
    let left = create_test_profile(
        &["total", "x"],
        vec![vec![0, 3, 0, 0], vec![0, 1, 1, 1, 0, 2, 2, 1]],
        3,
        2,
    );
    let right = create_test_profile(&["total", "x"], vec![vec![0, 3, 0, 0], vec![0, 3, 3, 1]], 3, 3);

    let l = build_tree(&left.flamebearer).unwrap().value;
    let r = build_tree(&right.flamebearer).unwrap().value;
    let tree = diff_trees(&l, &r);

    assert_eq!(tree.children.len(), 2);
    assert_eq!(tree.children[0].left, Some(Bar::new(0, 1, 1)));
    assert_eq!(tree.children[0].right, Some(Bar::new(0, 3, 3)));
    assert_eq!(tree.children[1].left, Some(Bar::new(1, 2, 2)));
    assert_eq!(tree.children[1].right, None);
}

#[test]
fn test_metadata_comes_from_non_empty_side() {
    let mut empty = create_test_profile(&["total"], vec![], 0, 0);
    empty.metadata.units = None;
    empty.metadata.app_name = Some("empty.cpu".to_string());
    let mut target = create_target_profile();
    target.metadata.app_name = Some("app.cpu".to_string());

    let profile = diff_profiles(&empty, &target).unwrap().value;
    assert_eq!(profile.metadata.app_name.as_deref(), Some("app.cpu"));
    assert_eq!(profile.metadata.format, "double");

    let tree = build_diff_tree(&profile.flamebearer).unwrap().value;
    assert_eq!(tree.total_left(), 0);
    assert_eq!(tree.total_right(), 5);
    assert!(tree.children.iter().all(|c| c.left.is_none()));
}

#[test]
fn test_double_input_is_rejected() {
    let mut double = create_base_profile();
    double.metadata.format = "double".to_string();
    double.flamebearer.levels = vec![vec![0, 3, 0, 0, 3, 0, 0]];

    assert_eq!(
        diff_profiles(&double, &create_base_profile()).unwrap_err(),
        FlamebearerError::FormatMismatch {
            expected: "single".to_string(),
            actual: "double".to_string()
        }
    );
}

#[test]
fn test_input_diagnostics_are_carried() {
    let mut broken = create_base_profile();
    broken.flamebearer.num_ticks = 4;
    let outcome = diff_profiles(&broken, &create_target_profile()).unwrap();
    assert!(!outcome.is_clean());
}

#[test]
fn test_function_table_over_diff() {
    let left = build_tree(&create_base_profile().flamebearer).unwrap().value;
    let right = build_tree(&create_target_profile().flamebearer).unwrap().value;
    let tree: DiffNode = diff_trees(&left, &right);

    let table = crate::tree::table::diff_function_table(&tree, 3, 5);
    let d = table.iter().find(|r| r.name == "d").unwrap();
    assert_eq!((d.total_left, d.total_right), (0, 3));
    assert_eq!(d.diff_percent, 0.0);
}

#[test]
fn test_projection_keeps_gaps_between_children() {
    // a at [0, 4), two ticks of root self, b at [6, 10)
    let gapped = create_test_profile(
        &["total", "a", "b"],
        vec![vec![0, 10, 2, 0], vec![0, 4, 4, 1, 2, 4, 4, 2]],
        10,
        4,
    );
    let input = build_tree(&gapped.flamebearer).unwrap().value;
    assert_eq!(input.find(&["b"]).map(|n| n.offset), Some(6));

    let outcome = diff_profiles(&gapped, &gapped).unwrap();
    assert!(outcome.is_clean());
    let decoded = build_diff_tree(&outcome.value.flamebearer).unwrap();
    assert!(decoded.is_clean());

    assert_eq!(decoded.value.project(Side::Left), Some(input.clone()));
    assert_eq!(decoded.value.project(Side::Right), Some(input));
}

#[test]
fn test_crossing_side_is_repacked() {
    // left: a [0, 4), b [6, 10) ; right: b [0, 4), a [4, 10)
    let left = create_test_profile(
        &["total", "a", "b"],
        vec![vec![0, 10, 2, 0], vec![0, 4, 4, 1, 2, 4, 4, 2]],
        10,
        4,
    );
    let right = create_test_profile(
        &["total", "b", "a"],
        vec![vec![0, 10, 0, 0], vec![0, 4, 4, 1, 0, 6, 6, 2]],
        10,
        6,
    );
    let l = build_tree(&left.flamebearer).unwrap().value;
    let r = build_tree(&right.flamebearer).unwrap().value;
    let tree = diff_trees(&l, &r);

    let names: Vec<_> = tree.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
    assert_eq!(tree.children[0].left, Some(Bar::new(0, 4, 4)));
    assert_eq!(tree.children[1].left, Some(Bar::new(6, 4, 4)));
    assert_eq!(tree.children[0].right, Some(Bar::new(0, 6, 6)));
    assert_eq!(tree.children[1].right, Some(Bar::new(6, 4, 4)));

    let decoded = build_diff_tree(&diff_profiles(&left, &right).unwrap().value.flamebearer).unwrap();
    assert!(decoded.is_clean());
    assert_eq!(decoded.value, tree);
    assert_eq!(decoded.value.project(Side::Left), Some(l));
}

#[test]
fn test_zero_total_children_are_left_out() {
    // z sits on a's closing edge with no samples
    let with_empty_leaf = create_test_profile(
        &["total", "a", "z"],
        vec![vec![0, 3, 0, 0], vec![0, 3, 3, 1], vec![3, 0, 0, 2]],
        3,
        3,
    );
    let input = build_tree(&with_empty_leaf.flamebearer).unwrap().value;
    assert!(input.find(&["a", "z"]).is_some());

    let tree = diff_trees(&input, &input);
    assert!(tree.find(&["a", "z"]).is_none());

    let decoded = build_diff_tree(&diff_profiles(&with_empty_leaf, &with_empty_leaf).unwrap().value.flamebearer)
        .unwrap();
    assert!(decoded.is_clean());
    assert_eq!(decoded.value, tree);

    let mut expected = input;
    expected.children[0].children.clear();
    assert_eq!(decoded.value.project(Side::Left), Some(expected));
}
