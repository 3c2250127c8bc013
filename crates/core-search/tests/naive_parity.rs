//! Boyer–Moore results must equal a brute-force scan.

use core_search::{Pattern, search};
use proptest::prelude::*;

fn naive(text: &str, pattern: &str) -> Vec<usize> {
    let t: Vec<char> = text.chars().collect();
    let p: Vec<char> = pattern.chars().collect();
    if p.is_empty() || p.len() > t.len() {
        return Vec::new();
    }
    (0..=t.len() - p.len())
        .filter(|&i| t[i..i + p.len()] == p[..])
        .collect()
}

proptest! {
    // Small alphabets force many partial matches and repeated characters.
    #[test]
    fn matches_naive_small_alphabet(text in "[ab]{0,200}", pattern in "[ab]{0,6}") {
        prop_assert_eq!(search(&text, &pattern), naive(&text, &pattern));
    }

    #[test]
    fn matches_naive_mixed_text(text in "[a-dé😀 ]{0,300}", pattern in "[a-dé😀 ]{1,8}") {
        prop_assert_eq!(search(&text, &pattern), naive(&text, &pattern));
    }

    #[test]
    fn offsets_strictly_increasing(text in "[abc]{0,200}", pattern in "[abc]{1,4}") {
        let hits = Pattern::new(&pattern).find_all(&text);
        prop_assert!(hits.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn pattern_taken_from_text_is_found(text in "[a-z]{1,200}", a in any::<usize>(), len in 1usize..10) {
        let chars: Vec<char> = text.chars().collect();
        let start = a % chars.len();
        let end = (start + len).min(chars.len());
        let pattern: String = chars[start..end].iter().collect();
        prop_assert!(search(&text, &pattern).contains(&start));
    }
}

#[test]
fn inputs_are_not_mutated() {
    let text = String::from("abcabcabc");
    let pattern = String::from("abc");
    let _ = search(&text, &pattern);
    assert_eq!(text, "abcabcabc");
    assert_eq!(pattern, "abc");
}
