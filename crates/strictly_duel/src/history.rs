//! Bounded undo history.

use std::collections::VecDeque;
use tracing::debug;

/// Default number of snapshots kept for undo.
pub const DEFAULT_HISTORY_CAPACITY: usize = 12;

/// Last-in-first-out snapshot stack that forgets its oldest entry when full.
#[derive(Debug, Clone, PartialEq)]
pub struct History<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    /// Creates an empty history holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records a snapshot, evicting the oldest one past capacity.
    pub fn push(&mut self, entry: T) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
            debug!(capacity = self.capacity, "History full, evicted oldest snapshot");
        }
        self.entries.push_back(entry);
    }

    /// Removes and returns the most recent snapshot.
    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop_back()
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing can be undone.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
