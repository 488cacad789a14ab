//! FIFO queue implementations for holdall.
//!
//! Two queues with the same surface: [`ArrayQueue`] keeps items in
//! contiguous storage, [`LinkedQueue`] in a deque. Both hand out items in
//! insertion order and are single-owner structures; exclusive access is
//! expressed through `&mut self` rather than an internal lock.

use std::collections::VecDeque;

/// A FIFO queue backed by contiguous storage.
#[derive(Debug, Clone, Default)]
pub struct ArrayQueue<T> {
    data: Vec<T>,
}

impl<T> ArrayQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates an empty queue with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Appends an item at the tail.
    pub fn enqueue(&mut self, item: T) {
        self.data.push(item);
    }

    /// Removes and returns the item at the head, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.data.is_empty() {
            None
        } else {
            Some(self.data.remove(0))
        }
    }

    /// Returns a reference to the head item without removing it.
    pub fn front(&self) -> Option<&T> {
        self.data.first()
    }

    /// Returns the number of queued items.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when no items are queued.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drops all queued items.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T> Extend<T> for ArrayQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

/// A FIFO queue backed by a deque.
///
/// Same surface as [`ArrayQueue`], with O(1) dequeue.
#[derive(Debug, Clone, Default)]
pub struct LinkedQueue<T> {
    data: VecDeque<T>,
}

impl<T> LinkedQueue<T> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            data: VecDeque::new(),
        }
    }

    /// Appends an item at the tail.
    pub fn enqueue(&mut self, item: T) {
        self.data.push_back(item);
    }

    /// Removes and returns the item at the head, or `None` when empty.
    pub fn dequeue(&mut self) -> Option<T> {
        self.data.pop_front()
    }

    /// Returns a reference to the head item without removing it.
    pub fn front(&self) -> Option<&T> {
        self.data.front()
    }

    /// Returns the number of queued items.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when no items are queued.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drops all queued items.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T> Extend<T> for LinkedQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}
