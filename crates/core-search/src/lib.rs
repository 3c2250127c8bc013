//! Boyer–Moore substring search (bad-character rule).
//!
//! Offsets are char indices into the searched text, matching the offsets used
//! by `core_text::Buffer`. Every occurrence is reported, overlapping ones
//! included, in strictly increasing order.
//!
//! Shift rules, with `m` the pattern length and `last(c)` the last index of `c`
//! in the pattern (`-1` when absent):
//! * mismatch at pattern index `j`: `max(1, j - last(text[s + j]))`
//! * full match: `m - last(text[s + m])` while a char follows the window,
//!   otherwise 1; a non-positive shift is clamped to 1.

use ahash::AHashMap;
use tracing::trace;

/// A compiled search pattern holding its bad-character table.
#[derive(Debug, Clone)]
pub struct Pattern {
    chars: Vec<char>,
    last: AHashMap<char, usize>,
}

impl Pattern {
    pub fn new(pattern: &str) -> Self {
        let chars: Vec<char> = pattern.chars().collect();
        let mut last = AHashMap::with_capacity(chars.len());
        // Later occurrences overwrite earlier ones.
        for (idx, ch) in chars.iter().enumerate() {
            last.insert(*ch, idx);
        }
        Self { chars, last }
    }

    /// Pattern length in chars.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Last index of `ch` in the pattern, or -1 if it does not occur.
    pub fn last_occurrence(&self, ch: char) -> isize {
        self.last.get(&ch).map_or(-1, |&idx| idx as isize)
    }

    /// All match offsets in `text`.
    pub fn find_all(&self, text: &str) -> Vec<usize> {
        let haystack: Vec<char> = text.chars().collect();
        self.find_all_chars(&haystack)
    }

    /// All match offsets in an already decoded char slice.
    pub fn find_all_chars(&self, text: &[char]) -> Vec<usize> {
        let mut matches = Vec::new();
        let m = self.chars.len() as isize;
        let n = text.len() as isize;
        if m == 0 || m > n {
            return matches;
        }
        let mut s: isize = 0;
        while s <= n - m {
            let mut j = m - 1;
            while j >= 0 && self.chars[j as usize] == text[(s + j) as usize] {
                j -= 1;
            }
            if j < 0 {
                matches.push(s as usize);
                let shift = if s + m < n {
                    m - self.last_occurrence(text[(s + m) as usize])
                } else {
                    1
                };
                s += shift.max(1);
            } else {
                let shift = j - self.last_occurrence(text[(s + j) as usize]);
                s += shift.max(1);
            }
        }
        matches
    }
}

/// Char offsets of every occurrence of `pattern` in `text`. An empty pattern
/// yields no matches.
pub fn search(text: &str, pattern: &str) -> Vec<usize> {
    let compiled = Pattern::new(pattern);
    let matches = compiled.find_all(text);
    trace!(
        target: "search",
        text_len = text.len(),
        pattern_len = compiled.len(),
        matches = matches.len(),
        "boyer_moore"
    );
    matches
}
