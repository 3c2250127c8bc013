use std::collections::VecDeque;

use tracing::trace;

/// Maximum number of snapshots retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 50;

/// Linear undo/redo history of full-text snapshots.
///
/// Both stacks are bounded by `capacity`; overflowing evicts the oldest
/// (bottom) entry. A snapshot equal to the current undo top is skipped, and a
/// successful push invalidates the redo branch.
#[derive(Debug, Clone)]
pub struct UndoEngine {
    undo_stack: VecDeque<String>,
    redo_stack: VecDeque<String>,
    capacity: usize,
    /// Count of snapshots skipped due to identical successive state.
    undo_snapshots_skipped: u64,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::with_capacity(UNDO_HISTORY_MAX)
    }

    /// History bounded at `capacity` snapshots per stack (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            capacity: capacity.max(1),
            undo_snapshots_skipped: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
    pub fn snapshots_skipped(&self) -> u64 {
        self.undo_snapshots_skipped
    }

    /// Record `current` as an undo point. Returns `false` (and changes nothing)
    /// when it equals the current undo top.
    pub fn save_state(&mut self, current: &str) -> bool {
        if self.undo_stack.back().is_some_and(|top| top == current) {
            self.undo_snapshots_skipped += 1;
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "snapshot_dedupe_skip");
            return false;
        }
        push_bounded(&mut self.undo_stack, current.to_string(), self.capacity);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), size_bytes = current.len(), "push_snapshot");
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
        true
    }

    /// Step back one snapshot. With nothing to undo, `current` is returned
    /// unchanged; callers detect the no-op by comparing.
    pub fn undo(&mut self, current: &str) -> String {
        match self.undo_stack.pop_back() {
            Some(previous) => {
                trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
                push_bounded(&mut self.redo_stack, current.to_string(), self.capacity);
                trace!(target: "state.undo", redo_depth = self.redo_stack.len(), "redo_push_from_undo");
                previous
            }
            None => current.to_string(),
        }
    }

    /// Re-apply the most recently undone snapshot; symmetric to [`Self::undo`].
    pub fn redo(&mut self, current: &str) -> String {
        match self.redo_stack.pop_back() {
            Some(next) => {
                trace!(target: "state.undo", redo_depth = self.redo_stack.len(), undo_depth = self.undo_stack.len(), "redo_pop");
                push_bounded(&mut self.undo_stack, current.to_string(), self.capacity);
                trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "undo_push_from_redo");
                next
            }
            None => current.to_string(),
        }
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}

fn push_bounded(stack: &mut VecDeque<String>, snapshot: String, capacity: usize) {
    stack.push_back(snapshot);
    while stack.len() > capacity {
        stack.pop_front();
        trace!(target: "state.undo", "stack_trimmed");
    }
}
