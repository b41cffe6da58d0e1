//! Bounded recent-search log

use std::collections::VecDeque;

/// Most-recent-first list of raw search terms
///
/// Every term is kept as entered, duplicates included; the oldest entries fall
/// off once the window is full.
#[derive(Debug, Clone)]
pub struct SearchHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl SearchHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn record(&mut self, term: impl Into<String>) {
        self.entries.push_front(term.into());
        self.entries.truncate(self.capacity);
    }

    /// Terms, newest first
    pub fn entries(&self) -> Vec<String> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
