//! Prefix trie over lowercased words.
//!
//! Children are kept in a `BTreeMap<char, _>` so enumeration is lexicographic
//! and independent of insertion history. A node existing only means some word
//! shares the prefix; `end_of_word` decides membership.

use std::collections::BTreeMap;

#[derive(Debug, Default, Clone)]
pub struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    end_of_word: bool,
}

impl TrieNode {
    pub fn is_word(&self) -> bool {
        self.end_of_word
    }

    pub fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }
}

#[derive(Debug, Default, Clone)]
pub struct Trie {
    root: TrieNode,
    words: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Insert `word` (lowercased). Returns `true` if it was not already present.
    /// Empty input is ignored.
    pub fn insert(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut node = &mut self.root;
        for ch in word.to_lowercase().chars() {
            node = node.children.entry(ch).or_default();
        }
        if node.end_of_word {
            return false;
        }
        node.end_of_word = true;
        self.words += 1;
        true
    }

    /// Case-insensitive exact membership.
    pub fn contains(&self, word: &str) -> bool {
        !word.is_empty()
            && self
                .node_for(&word.to_lowercase())
                .is_some_and(TrieNode::is_word)
    }

    /// Lazily enumerate words starting with `prefix` (case-insensitive),
    /// depth-first, shorter words before their extensions, siblings in
    /// ascending char order.
    pub fn words_with_prefix(&self, prefix: &str) -> PrefixWords<'_> {
        let lowered = prefix.to_lowercase();
        let stack = match self.node_for(&lowered) {
            Some(node) => vec![(node, lowered)],
            None => Vec::new(),
        };
        PrefixWords { stack }
    }

    /// At most `limit` words starting with `prefix`, in [`Self::words_with_prefix`] order.
    pub fn find_prefix(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.words_with_prefix(prefix).take(limit).collect()
    }

    fn node_for(&self, lowered: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in lowered.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }
}

/// Iterator returned by [`Trie::words_with_prefix`].
pub struct PrefixWords<'a> {
    stack: Vec<(&'a TrieNode, String)>,
}

impl Iterator for PrefixWords<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        while let Some((node, word)) = self.stack.pop() {
            for (ch, child) in node.children.iter().rev() {
                let mut next = String::with_capacity(word.len() + ch.len_utf8());
                next.push_str(&word);
                next.push(*ch);
                self.stack.push((child, next));
            }
            if node.end_of_word {
                return Some(word);
            }
        }
        None
    }
}
