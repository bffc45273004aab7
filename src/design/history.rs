//! Bounded snapshot history for undo/redo.
//!
//! Every checkpoint stores a full copy of the design collection. The cursor
//! points at the entry that matches the live state; entries after it form
//! the redo tail and are discarded by the next checkpoint.

use super::Designs;
use crate::constants::MAX_HISTORY_STATES;
use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub struct History {
    entries: VecDeque<Designs>,
    cursor: usize,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(MAX_HISTORY_STATES)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// History keeping at most `capacity` entries (at least one)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            cursor: 0,
            capacity,
        }
    }

    /// Replace all entries with a single baseline
    pub fn reset(&mut self, baseline: Designs) {
        self.entries.clear();
        self.entries.push_back(baseline);
        self.cursor = 0;
    }

    /// Record a checkpoint after the cursor.
    ///
    /// Drops the redo tail, then the oldest entry if over capacity. The
    /// cursor always ends on the new entry.
    pub fn push(&mut self, snapshot: Designs) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push_back(snapshot);

        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry and return it, or `None` at the oldest entry
    pub fn undo(&mut self) -> Option<&Designs> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    /// Step forward one entry and return it, or `None` at the newest entry
    pub fn redo(&mut self) -> Option<&Designs> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry matching the live state
    pub fn index(&self) -> usize {
        self.cursor
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entry under the cursor
    pub fn current(&self) -> Option<&Designs> {
        self.entries.get(self.cursor)
    }
}
