//! Snapshot undo semantics

use rstest::rstest;

use avltrace::domain::AvlTree;
use avltrace::util::testing::{init_test_setup, tree_from};

#[rstest]
#[case::no_rotation(&[10, 5], 15)]
#[case::single_rotation(&[10, 20], 30)]
#[case::double_rotation(&[30, 10], 20)]
#[case::root_change(&[4, 2, 6, 1, 3], 0)]
fn given_tree_when_undoing_last_insert_then_previous_shape_restored(
    #[case] prefix: &[i32],
    #[case] last: i32,
) {
    // Arrange
    init_test_setup();
    let mut tree = tree_from(prefix.iter().copied());
    tree.clear_new_flags();
    let before = tree.view();

    // Act
    tree.insert_value(last);
    let undone = tree.undo();

    // Assert
    assert!(undone);
    assert_eq!(tree.view(), before);
    assert_eq!(tree.history_len(), prefix.len());
}

#[test]
fn given_three_inserts_when_undoing_four_times_then_last_reports_false() {
    init_test_setup();
    let mut tree = tree_from([1, 2, 3]);

    assert!(tree.undo());
    assert!(tree.undo());
    assert!(tree.undo());
    assert!(tree.is_empty());

    assert!(!tree.undo());
    assert!(tree.is_empty());
    assert_eq!(tree.history_len(), 0);
}

#[test]
fn given_undos_then_states_are_restored_newest_first() {
    let mut tree = tree_from([1, 2, 3]);

    tree.undo();
    let keys: Vec<i32> = tree.iter().map(|n| *n.value()).collect();
    assert_eq!(keys, vec![1, 2]);

    tree.undo();
    let keys: Vec<i32> = tree.iter().map(|n| *n.value()).collect();
    assert_eq!(keys, vec![1]);
}

#[test]
fn given_duplicate_insert_when_undoing_then_identical_tree_restored() {
    let mut tree = tree_from([10, 20, 30]);
    tree.clear_new_flags();
    let before = tree.view();

    assert!(tree.insert_value(20).is_empty());
    assert!(tree.undo());

    assert_eq!(tree.view(), before);
    assert_eq!(tree.history_len(), 3);
}

#[test]
fn given_undo_then_restored_nodes_are_not_new() {
    let mut tree = tree_from([1, 2]);
    tree.insert_value(3);

    tree.undo();

    assert!(tree.iter().all(|n| !n.is_new()));
}

#[test]
fn given_clear_then_tree_empty_and_undo_fails() {
    let mut tree = tree_from([5, 3, 8]);

    tree.clear();

    assert!(tree.is_empty());
    assert_eq!(tree.history_len(), 0);
    assert!(!tree.undo());
}

#[test]
fn given_cleared_tree_when_inserting_then_history_starts_over() {
    let mut tree = tree_from([5, 3, 8]);
    tree.clear();

    tree.insert_value(1);

    assert_eq!(tree.history_len(), 1);
    assert!(tree.undo());
    assert!(tree.is_empty());
    assert!(!tree.undo());
}

#[test]
fn given_empty_tree_when_undo_then_false_and_unchanged() {
    let mut tree: AvlTree<u8> = AvlTree::new();
    assert!(!tree.undo());
    assert!(tree.view().is_none());
}
