use std::sync::Arc;

use core_dict::{IndexOptions, SuggestionIndex};
use core_state::{Document, UNDO_HISTORY_MAX};
use proptest::prelude::*;

fn doc(text: &str) -> Document {
    Document::new(
        "test",
        text,
        Arc::new(SuggestionIndex::new(IndexOptions::default())),
    )
}

// Every undo walks back exactly one edit and redo walks forward again.
#[test]
fn chain_of_edits_unwinds_exactly() {
    let mut d = doc("v0");
    let versions: Vec<String> = (0..=UNDO_HISTORY_MAX).map(|i| format!("v{i}")).collect();
    for v in &versions[1..] {
        assert!(d.apply_edit(v).unwrap());
    }
    assert_eq!(d.history().undo_depth(), UNDO_HISTORY_MAX);
    for expected in versions[..UNDO_HISTORY_MAX].iter().rev() {
        assert_eq!(&d.undo(), expected);
    }
    assert_eq!(d.text(), "v0");
    for expected in &versions[1..] {
        assert_eq!(&d.redo(), expected);
    }
    assert_eq!(d.text(), format!("v{UNDO_HISTORY_MAX}"));
}

// The 51st distinct edit evicts the oldest snapshot.
#[test]
fn edit_past_bound_evicts_oldest() {
    let mut d = doc("v0");
    for i in 1..=UNDO_HISTORY_MAX + 1 {
        d.apply_edit(&format!("v{i}")).unwrap();
    }
    assert_eq!(d.history().undo_depth(), UNDO_HISTORY_MAX);
    let mut last = String::new();
    for _ in 0..UNDO_HISTORY_MAX {
        last = d.undo();
    }
    assert_eq!(last, "v1");
    // Nothing older than v1 remains.
    assert_eq!(d.undo(), "v1");
}

#[test]
fn new_edit_after_undo_discards_redo_branch() {
    let mut d = doc("one");
    d.apply_edit("two").unwrap();
    d.undo();
    assert!(d.history().can_redo());
    d.apply_edit("three").unwrap();
    assert!(!d.history().can_redo());
    assert_eq!(d.redo(), "three");
}

proptest! {
    #[test]
    fn identical_edit_keeps_depths(texts in prop::collection::vec("[a-c]{0,6}", 1..20), undos in 0usize..5) {
        let mut d = doc("");
        for t in &texts {
            d.apply_edit(t).unwrap();
        }
        for _ in 0..undos {
            d.undo();
        }
        let before = (d.history().undo_depth(), d.history().redo_depth());
        let current = d.text();
        prop_assert!(!d.apply_edit(&current).unwrap());
        prop_assert_eq!(before, (d.history().undo_depth(), d.history().redo_depth()));
    }

    #[test]
    fn undo_all_returns_to_start(start in "[a-z ]{0,40}", texts in prop::collection::vec("[a-z ]{0,40}", 0..30)) {
        let mut d = doc(&start);
        for t in &texts {
            d.apply_edit(t).unwrap();
        }
        for _ in 0..texts.len() {
            d.undo();
        }
        prop_assert_eq!(d.text(), start);
    }

    #[test]
    fn apply_edit_keeps_tree_consistent(start in "[a-zé ]{0,200}", texts in prop::collection::vec("[a-zé ]{0,200}", 1..10)) {
        let mut d = doc(&start);
        for t in &texts {
            d.apply_edit(t).unwrap();
            prop_assert_eq!(&d.text(), t);
            prop_assert!(d.buffer().check_invariants().is_ok());
        }
    }
}
