//! Bounded FIFO window of the most recent effective values.

use crate::error::{MovAvgError, Result};
use std::collections::VecDeque;

/// Fixed-capacity sliding window.
///
/// Once full, every `offer` evicts exactly one oldest entry before the new
/// value is appended. Entries carry no bucket identity, only their value
/// and position.
#[derive(Debug, Clone, PartialEq)]
pub struct SlidingWindow {
    capacity: usize,
    entries: VecDeque<f64>,
}

impl SlidingWindow {
    /// Upper bound on the slots reserved up front. Larger windows grow as
    /// values arrive.
    const MAX_PREALLOCATED: usize = 1024;

    /// Create an empty window holding at most `capacity` values.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(MovAvgError::InvalidWindow(0));
        }
        Ok(Self {
            capacity,
            entries: VecDeque::with_capacity(capacity.min(Self::MAX_PREALLOCATED)),
        })
    }

    /// Admit a value, evicting the oldest one if the window is full.
    pub fn offer(&mut self, value: f64) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(value);
    }

    /// Entries ordered oldest to newest.
    pub fn snapshot(&self) -> Vec<f64> {
        self.entries.iter().copied().collect()
    }

    /// Iterate entries oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &f64> + '_ {
        self.entries.iter()
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }
}
