//! Document state: text buffer, undo history, and vocabulary learning.
//!
//! A `Document` composes one `core_text::Buffer` with one `UndoEngine` and a
//! handle to the process-wide `SuggestionIndex`. Every committed edit follows
//! the same pipeline:
//! 1. capture the current text,
//! 2. apply the edit to the buffer (validated first, so failures leave both
//!    buffer and history untouched),
//! 3. push the captured text onto the undo stack (clearing redo),
//! 4. learn words that appear in the new text but not the old.
//!
//! Edits that leave the text unchanged skip the pipeline entirely, so they
//! never disturb undo/redo depth.
//!
//! Undo/redo restore whole snapshots and rebuild the buffer only when the
//! restored text differs from the current one.
//!
//! Concurrency: `Document` itself is `&mut self` for mutation; shared use goes
//! through [`registry::Workspace`], which wraps each document in its own mutex.

use std::sync::Arc;

use core_dict::SuggestionIndex;
use core_text::segment::new_words;
use core_text::{Buffer, TextError};
use thiserror::Error;
use tracing::debug;

pub mod registry;
pub mod undo;

pub use registry::{DocumentHandle, Workspace};
pub use undo::{UNDO_HISTORY_MAX, UndoEngine};

/// Errors surfaced to the collaborator layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("document `{0}` not found")]
    NotFound(String),
    #[error("document `{0}` already exists")]
    AlreadyExists(String),
    #[error(transparent)]
    Text(#[from] TextError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug)]
pub struct Document {
    name: String,
    buffer: Buffer,
    history: UndoEngine,
    vocabulary: Arc<SuggestionIndex>,
}

impl Document {
    /// New document with the default history depth. Words in `initial_text`
    /// are learned immediately.
    pub fn new(
        name: impl Into<String>,
        initial_text: &str,
        vocabulary: Arc<SuggestionIndex>,
    ) -> Self {
        Self::with_history(name, initial_text, vocabulary, UndoEngine::new())
    }

    pub fn with_history(
        name: impl Into<String>,
        initial_text: &str,
        vocabulary: Arc<SuggestionIndex>,
        history: UndoEngine,
    ) -> Self {
        vocabulary.learn_text(initial_text);
        Self {
            name: name.into(),
            buffer: Buffer::new(initial_text),
            history,
            vocabulary,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> String {
        self.buffer.to_text()
    }

    pub fn len_chars(&self) -> usize {
        self.buffer.len_chars()
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn history(&self) -> &UndoEngine {
        &self.history
    }

    pub fn vocabulary(&self) -> &Arc<SuggestionIndex> {
        &self.vocabulary
    }

    /// Replace the whole text. Returns `Ok(false)` without touching history
    /// when `new_text` equals the current text.
    ///
    /// Only the span between the common prefix and common suffix is spliced,
    /// so unchanged regions of the tree are left as they are.
    pub fn apply_edit(&mut self, new_text: &str) -> Result<bool> {
        let current = self.buffer.to_text();
        if current == new_text {
            debug!(target: "state.document", doc = self.name.as_str(), "apply_edit_unchanged");
            return Ok(false);
        }
        let (start, end, replacement) = changed_span(&current, new_text);
        self.buffer.replace_range(start, end, &replacement)?;
        self.commit(&current, new_text, "apply_edit");
        Ok(true)
    }

    /// Insert `fragment` at char `offset`; returns the new text.
    pub fn insert(&mut self, offset: usize, fragment: &str) -> Result<String> {
        let current = self.buffer.to_text();
        let updated = self.buffer.insert(offset, fragment)?;
        if updated != current {
            self.commit(&current, &updated, "insert");
        }
        Ok(updated)
    }

    /// Delete chars `[start, end)`; returns the new text.
    pub fn delete(&mut self, start: usize, end: usize) -> Result<String> {
        let current = self.buffer.to_text();
        let updated = self.buffer.delete(start, end)?;
        if updated != current {
            self.commit(&current, &updated, "delete");
        }
        Ok(updated)
    }

    /// Restore the previous snapshot. Returns the (possibly unchanged) text.
    pub fn undo(&mut self) -> String {
        let current = self.buffer.to_text();
        let restored = self.history.undo(&current);
        self.restore(&current, restored, "undo")
    }

    /// Re-apply the last undone snapshot. Returns the (possibly unchanged) text.
    pub fn redo(&mut self) -> String {
        let current = self.buffer.to_text();
        let restored = self.history.redo(&current);
        self.restore(&current, restored, "redo")
    }

    /// Char offsets of `pattern` in the current text.
    pub fn search(&self, pattern: &str) -> Vec<usize> {
        core_search::search(&self.buffer.to_text(), pattern)
    }

    fn commit(&mut self, before: &str, after: &str, op: &'static str) {
        self.history.save_state(before);
        let words = new_words(before, after, self.vocabulary.options().min_learn_len);
        let learned = self.vocabulary.learn_words(&words);
        debug!(
            target: "state.document",
            doc = self.name.as_str(),
            op,
            len_chars = self.buffer.len_chars(),
            undo_depth = self.history.undo_depth(),
            learned,
            "edit_committed"
        );
    }

    fn restore(&mut self, current: &str, restored: String, op: &'static str) -> String {
        let changed = restored != current;
        if changed {
            self.buffer = Buffer::new(&restored);
        }
        debug!(
            target: "state.document",
            doc = self.name.as_str(),
            op,
            changed,
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
            "history_step"
        );
        restored
    }
}

/// Char range `[start, end)` of `old` that must be replaced by the returned
/// string to produce `new`, skipping the longest common prefix and suffix.
fn changed_span(old: &str, new: &str) -> (usize, usize, String) {
    let old_chars: Vec<char> = old.chars().collect();
    let new_chars: Vec<char> = new.chars().collect();
    let prefix = old_chars
        .iter()
        .zip(&new_chars)
        .take_while(|(a, b)| a == b)
        .count();
    let max_suffix = old_chars.len().min(new_chars.len()) - prefix;
    let suffix = old_chars
        .iter()
        .rev()
        .zip(new_chars.iter().rev())
        .take(max_suffix)
        .take_while(|(a, b)| a == b)
        .count();
    let replacement: String = new_chars[prefix..new_chars.len() - suffix].iter().collect();
    (prefix, old_chars.len() - suffix, replacement)
}
