//! Recency Order Module
//!
//! Keeps cache keys ordered from least to most recently used.

use std::collections::VecDeque;

// == Recency Order ==
/// Access order of cache keys.
///
/// - Front = least recently used (next eviction candidate)
/// - Back = most recently used
#[derive(Debug, Default)]
pub struct RecencyOrder {
    keys: VecDeque<String>,
}

impl RecencyOrder {
    pub fn new() -> Self {
        Self {
            keys: VecDeque::new(),
        }
    }

    // == Mark Used ==
    /// Moves `key` to the most-recently-used position, inserting it if needed.
    pub fn mark_used(&mut self, key: &str) {
        self.forget(key);
        self.keys.push_back(key.to_string());
    }

    // == Forget ==
    /// Drops `key` from the order; unknown keys are ignored.
    pub fn forget(&mut self, key: &str) {
        if let Some(pos) = self.keys.iter().position(|k| k == key) {
            self.keys.remove(pos);
        }
    }

    // == Pop Least Recent ==
    /// Removes and returns the least recently used key.
    pub fn pop_least_recent(&mut self) -> Option<String> {
        self.keys.pop_front()
    }

    // == Peek Least Recent ==
    /// Least recently used key, without removing it.
    #[allow(dead_code)]
    pub fn least_recent(&self) -> Option<&str> {
        self.keys.front().map(String::as_str)
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
