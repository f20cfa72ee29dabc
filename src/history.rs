//! Snapshot-based undo/redo stacks.
//!
//! Every marked change captures a deep copy of the figure list *before* the
//! mutation runs; undo therefore always restores a state strictly preceding
//! the change it reverts.

use crate::figure::Figure;
use std::collections::VecDeque;

/// Maximum number of snapshots each stack keeps.
pub const MAX_HISTORY: usize = 100;

/// A snapshot is an alias-free deep copy of the document's figure list.
pub type Snapshot = Vec<Figure>;

/// Bounded LIFO undo and redo stacks. Pushing past capacity discards the
/// oldest entry at the bottom.
#[derive(Debug, Clone, Default)]
pub struct History {
    undo: VecDeque<Snapshot>,
    redo: VecDeque<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a marked change: the pre-change snapshot goes on the undo
    /// stack and the redo stack is invalidated.
    pub fn record(&mut self, before: Snapshot) {
        push_bounded(&mut self.undo, before);
        self.redo.clear();
    }

    /// Push onto the undo stack without touching redo; used while a redo
    /// operation replaces the live state.
    pub fn push_undo(&mut self, snapshot: Snapshot) {
        push_bounded(&mut self.undo, snapshot);
    }

    /// Push onto the redo stack; used while an undo operation replaces the
    /// live state.
    pub fn push_redo(&mut self, snapshot: Snapshot) {
        push_bounded(&mut self.redo, snapshot);
    }

    pub fn pop_undo(&mut self) -> Option<Snapshot> {
        self.undo.pop_back()
    }

    pub fn pop_redo(&mut self) -> Option<Snapshot> {
        self.redo.pop_back()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Forget all history, used after save/load establishes a new baseline.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

fn push_bounded(stack: &mut VecDeque<Snapshot>, snapshot: Snapshot) {
    if stack.len() == MAX_HISTORY {
        stack.pop_front();
    }
    stack.push_back(snapshot);
}
