//! Shared suggestion vocabulary: autocomplete and spell checking.
//!
//! One `SuggestionIndex` is shared by every document (`Arc<SuggestionIndex>`).
//! Edits learn words under the write lock; autocomplete and spell checks take
//! the read lock, so lookups from many callers proceed concurrently. The
//! vocabulary only grows.

use std::collections::HashSet;

use core_text::segment::{learnable_words, spell_tokens};
use parking_lot::RwLock;
use tracing::{debug, trace};

pub mod trie;
pub use trie::{PrefixWords, Trie};

/// Default cap on autocomplete results.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 10;
/// Default minimum length (chars) for learned and spell-checked words.
pub const DEFAULT_MIN_WORD_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    /// Autocomplete truncation; not a ranking.
    pub max_suggestions: usize,
    /// Words shorter than this are not learned from edited text.
    pub min_learn_len: usize,
    /// Alphabetic runs shorter than this are not spell checked.
    pub min_spell_len: usize,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            min_learn_len: DEFAULT_MIN_WORD_LEN,
            min_spell_len: DEFAULT_MIN_WORD_LEN,
        }
    }
}

#[derive(Debug, Default)]
pub struct SuggestionIndex {
    trie: RwLock<Trie>,
    options: IndexOptions,
}

impl SuggestionIndex {
    pub fn new(options: IndexOptions) -> Self {
        Self {
            trie: RwLock::new(Trie::new()),
            options,
        }
    }

    /// Build an index pre-seeded with `words`.
    pub fn with_words<I, S>(options: IndexOptions, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let index = Self::new(options);
        index.learn_words(words);
        index
    }

    pub fn options(&self) -> IndexOptions {
        self.options
    }

    pub fn len(&self) -> usize {
        self.trie.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.read().is_empty()
    }

    /// Add one word. Returns `true` if it was new.
    pub fn learn(&self, word: &str) -> bool {
        self.trie.write().insert(word)
    }

    /// Add many words under a single write lock. Returns how many were new.
    pub fn learn_words<I, S>(&self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = self.trie.write();
        let added = words
            .into_iter()
            .filter(|w| trie.insert(w.as_ref()))
            .count();
        if added > 0 {
            debug!(target: "dict", added, vocabulary = trie.len(), "learn_words");
        }
        added
    }

    /// Learn every whitespace/punctuation delimited word of `text` that is at
    /// least `min_learn_len` chars long.
    pub fn learn_text(&self, text: &str) -> usize {
        self.learn_words(learnable_words(text, self.options.min_learn_len))
    }

    /// Up to `max_suggestions` known words beginning with `prefix`.
    pub fn autocomplete(&self, prefix: &str) -> Vec<String> {
        let found = self
            .trie
            .read()
            .find_prefix(prefix, self.options.max_suggestions);
        trace!(
            target: "dict",
            prefix_len = prefix.chars().count(),
            results = found.len(),
            "autocomplete"
        );
        found
    }

    /// Case-insensitive membership.
    pub fn contains(&self, word: &str) -> bool {
        self.trie.read().contains(word)
    }

    /// Distinct out-of-vocabulary words in `text`, in order of first
    /// appearance. Spelling of the first occurrence is kept; later
    /// occurrences differing only in case are collapsed into it.
    pub fn check_spelling(&self, text: &str) -> Vec<String> {
        let trie = self.trie.read();
        let mut seen = HashSet::new();
        let mut unknown = Vec::new();
        for token in spell_tokens(text, self.options.min_spell_len) {
            let lowered = token.to_lowercase();
            if !trie.contains(&lowered) && seen.insert(lowered) {
                unknown.push(token.to_string());
            }
        }
        trace!(target: "dict", unknown = unknown.len(), "check_spelling");
        unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(words: &[&str]) -> SuggestionIndex {
        SuggestionIndex::with_words(IndexOptions::default(), words.iter().copied())
    }

    #[test]
    fn spelling_reports_unknown_with_original_case() {
        let index = index_of(&["the", "editor", "great"]);
        assert_eq!(index.check_spelling("The edittor is great"), vec!["edittor"]);
    }

    #[test]
    fn spelling_collapses_duplicates() {
        let index = index_of(&["known"]);
        assert_eq!(
            index.check_spelling("Foo bar foo BAR known Known baz"),
            vec!["Foo", "bar", "baz"]
        );
    }

    #[test]
    fn spelling_ignores_short_runs() {
        let index = index_of(&[]);
        assert!(index.check_spelling("a an is of to").is_empty());
    }

    #[test]
    fn learn_text_applies_minimum_length() {
        let index = SuggestionIndex::new(IndexOptions::default());
        let added = index.learn_text("An ox ate the Apples; the apples were red.");
        // ate, the, apples, were, red
        assert_eq!(added, 5);
        assert!(index.contains("apples"));
        assert!(!index.contains("ox"));
    }

    #[test]
    fn autocomplete_honours_cap() {
        let options = IndexOptions {
            max_suggestions: 2,
            ..IndexOptions::default()
        };
        let index = SuggestionIndex::with_words(options, ["cat", "car", "cart", "care"]);
        let hits = index.autocomplete("CA");
        assert_eq!(hits, vec!["car", "care"]);
    }

    #[test]
    fn learning_is_visible_to_spell_check() {
        let index = index_of(&[]);
        assert_eq!(index.check_spelling("quill"), vec!["quill"]);
        index.learn("Quill");
        assert!(index.check_spelling("QUILL").is_empty());
    }
}
