//! Capped event history, newest first

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::HISTORY_CAPACITY;

/// A single history line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Host wall-clock time (ms) when recorded
    pub timestamp_ms: f64,
    /// Simulated year at the time
    pub simulated_years: f64,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    entries: VecDeque<HistoryEntry>,
    /// Total entries ever pushed, including those dropped past capacity
    recorded: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message, dropping the oldest past capacity
    pub fn push(&mut self, timestamp_ms: f64, simulated_years: f64, message: impl Into<String>) {
        let message = message.into();
        log::info!("{}", message);
        self.entries.push_front(HistoryEntry {
            timestamp_ms,
            simulated_years,
            message,
        });
        self.entries.truncate(HISTORY_CAPACITY);
        self.recorded += 1;
    }

    /// Changes whenever an entry is added; lets a view skip redundant redraws
    pub fn revision(&self) -> u64 {
        self.recorded
    }

    /// Newest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_newest_first_and_capped() {
        let mut history = History::new();
        for i in 0..(HISTORY_CAPACITY + 7) {
            history.push(i as f64, 0.0, format!("event {}", i));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        let last = HISTORY_CAPACITY + 6;
        assert_eq!(history.latest().unwrap().message, format!("event {}", last));
        let oldest = history.iter().last().unwrap();
        assert_eq!(oldest.message, "event 7");
    }

    #[test]
    fn test_revision_advances_past_capacity() {
        let mut history = History::new();
        assert_eq!(history.revision(), 0);
        for i in 0..(HISTORY_CAPACITY + 3) {
            history.push(0.0, 0.0, format!("event {}", i));
        }
        let full = history.revision();
        assert_eq!(full, (HISTORY_CAPACITY + 3) as u64);

        // Length stays at capacity, the revision still moves
        history.push(0.0, 0.0, "event");
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.revision(), full + 1);
    }
}
