//! Property tests: every edit must match the plain string splice and leave the
//! tree's cached weights consistent.

use core_text::Buffer;
use proptest::prelude::*;

fn splice(text: &str, start: usize, end: usize, fragment: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out: String = chars[..start].iter().collect();
    out.push_str(fragment);
    out.extend(chars[end..].iter());
    out
}

#[derive(Debug, Clone)]
enum Edit {
    Insert { at: usize, fragment: String },
    Delete { from: usize, to: usize },
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (any::<usize>(), "[a-zé😀 ]{0,150}")
            .prop_map(|(at, fragment)| Edit::Insert { at, fragment }),
        (any::<usize>(), any::<usize>()).prop_map(|(from, to)| Edit::Delete { from, to }),
    ]
}

proptest! {
    #[test]
    fn insert_matches_string_splice(initial in "[a-z ]{0,300}", at in any::<usize>(), fragment in "[a-zß ]{0,200}") {
        let mut b = Buffer::new(&initial);
        let offset = at % (initial.chars().count() + 1);
        let text = b.insert(offset, &fragment).unwrap();
        prop_assert_eq!(&text, &splice(&initial, offset, offset, &fragment));
        prop_assert!(b.check_invariants().is_ok());
    }

    #[test]
    fn delete_matches_string_splice(initial in "[a-z😀 ]{0,300}", a in any::<usize>(), c in any::<usize>()) {
        let mut b = Buffer::new(&initial);
        let len = initial.chars().count();
        let x = a % (len + 1);
        let y = c % (len + 1);
        let (start, end) = (x.min(y), x.max(y));
        let text = b.delete(start, end).unwrap();
        prop_assert_eq!(&text, &splice(&initial, start, end, ""));
        prop_assert!(b.check_invariants().is_ok());
    }

    #[test]
    fn edit_sequences_track_reference(initial in "[a-z]{0,120}", edits in prop::collection::vec(edit_strategy(), 1..40)) {
        let mut b = Buffer::new(&initial);
        let mut reference = initial.clone();
        for edit in edits {
            let len = reference.chars().count();
            match edit {
                Edit::Insert { at, fragment } => {
                    let at = at % (len + 1);
                    b.insert(at, &fragment).unwrap();
                    reference = splice(&reference, at, at, &fragment);
                }
                Edit::Delete { from, to } => {
                    let x = from % (len + 1);
                    let y = to % (len + 1);
                    let (start, end) = (x.min(y), x.max(y));
                    b.delete(start, end).unwrap();
                    reference = splice(&reference, start, end, "");
                }
            }
            prop_assert_eq!(b.len_chars(), reference.chars().count());
        }
        prop_assert_eq!(b.to_text(), reference);
        prop_assert!(b.check_invariants().is_ok());
    }

    #[test]
    fn slice_matches_char_range(initial in "[a-zñ]{0,400}", a in any::<usize>(), c in any::<usize>()) {
        let b = Buffer::new(&initial);
        let len = initial.chars().count();
        let x = a % (len + 1);
        let y = c % (len + 1);
        let (start, end) = (x.min(y), x.max(y));
        let expected: String = initial.chars().skip(start).take(end - start).collect();
        prop_assert_eq!(b.slice(start, end).unwrap(), expected);
    }

    #[test]
    fn out_of_range_edits_fail_without_mutation(initial in "[a-z]{0,50}", extra in 1usize..10) {
        let mut b = Buffer::new(&initial);
        let len = initial.chars().count();
        prop_assert!(b.insert(len + extra, "x").is_err());
        prop_assert!(b.delete(0, len + extra).is_err());
        prop_assert_eq!(b.to_text(), initial);
    }
}
