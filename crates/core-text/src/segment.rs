//! Word extraction for vocabulary learning and spell checking.
//!
//! - [`learnable_words`] splits on any run of characters that are neither
//!   letters nor decimal digits (whitespace, punctuation, apostrophes,
//!   underscores) and lowercases, feeding the suggestion vocabulary.
//! - [`spell_tokens`] picks runs of alphabetic characters only, keeping the
//!   original spelling so reports can echo what the user typed.
//!
//! For letter-only text both produce the same words, so anything learned from
//! a text spell-checks clean against that same text.
//!
//! Neither function logs its input.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static ALPHA_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{Alphabetic}+").expect("static alphabetic pattern compiles"));

static WORD_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Alphabetic}\p{Nd}]+").expect("static word pattern compiles")
});

/// Lowercased words of at least `min_len` chars, in order of appearance.
pub fn learnable_words(text: &str, min_len: usize) -> impl Iterator<Item = String> + '_ {
    WORD_RUN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(move |w| w.chars().count() >= min_len)
        .map(str::to_lowercase)
}

/// Lowercased words present in `new` but absent from `old`, each reported once.
pub fn new_words(old: &str, new: &str, min_len: usize) -> Vec<String> {
    let known: HashSet<String> = learnable_words(old, min_len).collect();
    let mut seen = HashSet::new();
    learnable_words(new, min_len)
        .filter(|w| !known.contains(w) && seen.insert(w.clone()))
        .collect()
}

/// Alphabetic runs of at least `min_len` chars, original case preserved.
pub fn spell_tokens(text: &str, min_len: usize) -> impl Iterator<Item = &str> {
    ALPHA_RUN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(move |w| w.chars().count() >= min_len)
}
