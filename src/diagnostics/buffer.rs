// SPDX-License-Identifier: MPL-2.0
//! Bounded event storage.

use std::collections::VecDeque;

pub use crate::domain::diagnostics::BufferCapacity;

/// Ring buffer that drops its oldest entry when full.
///
/// ```
/// use geofix::diagnostics::{BufferCapacity, CircularBuffer};
///
/// let mut buffer = CircularBuffer::new(BufferCapacity::new(10));
/// for stage in ["idle", "requesting", "detecting"] {
///     buffer.push(stage);
/// }
/// assert_eq!(buffer.iter().copied().collect::<Vec<_>>(), ["idle", "requesting", "detecting"]);
/// ```
#[derive(Debug, Clone)]
pub struct CircularBuffer<T> {
    data: VecDeque<T>,
    capacity: usize,
}

impl<T> CircularBuffer<T> {
    #[must_use]
    pub fn new(capacity: BufferCapacity) -> Self {
        Self::with_raw_capacity(capacity.value())
    }

    /// Unvalidated capacity, for tests. Zero is raised to one.
    #[must_use]
    pub fn with_raw_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, item: T) {
        if self.data.len() == self.capacity {
            self.data.pop_front();
        }
        self.data.push_back(item);
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}
