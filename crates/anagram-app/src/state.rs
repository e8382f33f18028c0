//! Observable session state types.
//!
//! This module defines the data structures the renderer reads:
//! [`ConnectionState`] and the bounded [`ChatLog`].

use std::collections::VecDeque;

/// Connection state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Dial in progress.
    Connecting,
    /// Connected; reads and writes may proceed.
    Connected,
    /// Dial failed. Display-only until the user quits.
    Failed,
    /// Peer closed the connection. Display-only until the user quits.
    Closed,
}

/// Bounded chat history.
///
/// # Invariants
///
/// - `len() <= capacity()` after every operation.
/// - Entries are kept in arrival order; the oldest is evicted first.
#[derive(Debug, Clone)]
pub struct ChatLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl ChatLog {
    /// Create an empty log holding at most `capacity` lines.
    pub fn new(capacity: usize) -> Self {
        Self { entries: VecDeque::with_capacity(capacity.saturating_add(1)), capacity }
    }

    /// Append a line, evicting from the front while over capacity.
    pub fn push(&mut self, line: String) {
        self.entries.push_back(line);
        while self.entries.len() > self.capacity {
            self.entries.pop_front();
        }
    }

    /// Remove all lines.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of lines held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Log holds no lines.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of lines held.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
