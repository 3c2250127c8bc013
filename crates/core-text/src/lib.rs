//! Tree-backed text buffer.
//!
//! `Buffer` stores its characters in a weighted binary tree (see [`tree`]).
//! Edits descend by weight to the affected leaves and splice there, so an
//! insert or delete touches one root-to-leaf path (plus the fragment itself)
//! instead of reallocating the whole text. When the tree grows deeper than
//! roughly twice the ideal height it is rebuilt from its existing leaves.
//!
//! All offsets are char (Unicode scalar value) indices.

use std::fmt;

use thiserror::Error;
use tracing::trace;

pub mod segment;
mod tree;

pub use tree::Chunks;
use tree::Node;

/// Errors raised by buffer operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("range {start}..{end} is outside buffer of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },
    #[error("tree invariant violated: {0}")]
    Corrupt(String),
}

pub type Result<T> = std::result::Result<T, TextError>;

/// A mutable text buffer backed by a weighted binary tree.
#[derive(Clone, Debug, Default)]
pub struct Buffer {
    root: Node,
}

impl Buffer {
    /// Construct a buffer holding `text`.
    pub fn new(text: &str) -> Self {
        Self {
            root: Node::from_text(text),
        }
    }

    /// Total number of chars in the buffer.
    pub fn len_chars(&self) -> usize {
        self.root.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.len() == 0
    }

    /// Full text by in-order leaf concatenation. Does not touch the tree.
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.root.len());
        for chunk in self.chunks() {
            out.push_str(chunk);
        }
        out
    }

    /// Iterate leaf contents in order.
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(&self.root)
    }

    /// Copy of the chars in `[start, end)`.
    pub fn slice(&self, start: usize, end: usize) -> Result<String> {
        self.check_range(start, end)?;
        let mut out = String::new();
        self.root.collect_range(start, end, &mut out);
        Ok(out)
    }

    /// Insert `fragment` before char `offset` and return the resulting text.
    pub fn insert(&mut self, offset: usize, fragment: &str) -> Result<String> {
        self.replace_range(offset, offset, fragment)?;
        Ok(self.to_text())
    }

    /// Delete chars in `[start, end)` and return the resulting text.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<String> {
        self.replace_range(start, end, "")?;
        Ok(self.to_text())
    }

    /// Replace chars in `[start, end)` with `fragment`.
    ///
    /// The range is validated before anything is touched; on error the buffer
    /// is unchanged.
    pub fn replace_range(&mut self, start: usize, end: usize, fragment: &str) -> Result<()> {
        self.check_range(start, end)?;
        if start < end {
            self.root.remove(start, end);
        }
        let added = fragment.chars().count();
        if added > 0 {
            self.root.insert(start, fragment, added);
        }
        trace!(
            target: "text.tree",
            start,
            end,
            added,
            len = self.root.len(),
            depth = self.root.depth(),
            leaves = self.root.leaves(),
            "replace_range"
        );
        self.rebalance_if_needed();
        debug_assert!(
            self.root.verify(true).is_ok(),
            "tree invariant violated after replace_range: {:?}",
            self.root.verify(true)
        );
        Ok(())
    }

    /// Height of the tree (a lone leaf has depth 0).
    pub fn depth(&self) -> usize {
        self.root.depth()
    }

    pub fn leaf_count(&self) -> usize {
        self.root.leaves()
    }

    /// Walk the whole tree and confirm every cached weight, length, depth and
    /// leaf count matches the structure below it.
    pub fn check_invariants(&self) -> Result<()> {
        self.root.verify(true).map(|_| ())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<()> {
        let len = self.root.len();
        if start > end || end > len {
            return Err(TextError::InvalidRange { start, end, len });
        }
        Ok(())
    }

    fn rebalance_if_needed(&mut self) {
        let leaves = self.root.leaves();
        let ideal = (usize::BITS - leaves.leading_zeros()) as usize;
        if self.root.depth() <= 2 * ideal + 2 {
            return;
        }
        let before = self.root.depth();
        let mut collected = Vec::with_capacity(leaves);
        std::mem::take(&mut self.root).drain_leaves(&mut collected);
        self.root = Node::build_balanced(collected);
        trace!(
            target: "text.tree",
            depth_before = before,
            depth_after = self.root.depth(),
            leaves = self.root.leaves(),
            "rebalance"
        );
    }
}

impl From<&str> for Buffer {
    fn from(text: &str) -> Self {
        Buffer::new(text)
    }
}

impl From<String> for Buffer {
    fn from(text: String) -> Self {
        Buffer::new(&text)
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}
