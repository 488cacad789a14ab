//! Concurrent segmented singly linked list.
//!
//! [`SinglyList`] is a singly linked list whose search, delete, update,
//! and reverse operations partition the list into contiguous segments and
//! process them with one parallel worker per segment. The first positive
//! match cancels the remaining workers cooperatively; reverse instead
//! stitches per-segment reversals back into one chain.
//!
//! Parallelism is strictly intra-call. One mutating operation is in
//! flight on a given list at a time, which `&mut self` on the mutating
//! methods already enforces; concurrent read-only overlap through shared
//! references is not part of the contract.
//!
//! ```
//! use holdall_list::{SegmentPolicy, SinglyList};
//! use holdall_testkit::Corp;
//!
//! let mut list = SinglyList::with_policy(SegmentPolicy::Fixed(2));
//! for key in [22, 19, 2, 6, 30] {
//!     list.insert(Corp::new(key, "corp"));
//! }
//! assert_eq!(list.search(&2).unwrap().id, 2);
//! list.delete(&6).unwrap();
//! assert_eq!(list.len(), 4);
//! ```

mod arena;
mod find;
mod plan;
mod sort;

pub use holdall_core::{ContainerError, Keyed, Record};
pub use plan::{SegmentPolicy, SizeFn};

use std::sync::mpsc;
use std::sync::{OnceLock, RwLock};
use std::thread;

use arena::Arena;
use plan::{segment_count, Segment};

/// A singly linked list with parallel segment-based operations.
///
/// New items are prepended at the head. Lookup, delete, and update go
/// through the parallel find engine; [`SinglyList::reverse`] reverses
/// each planned segment in place in parallel and restitches the
/// boundaries.
#[derive(Debug)]
pub struct SinglyList<T> {
    arena: Arena<T>,
    head: Option<usize>,
    size: usize,
    /// Coarse per-list guard for links that cross segment boundaries:
    /// boundary captures take read mode, unlink and reversal link writes
    /// take write mode. Purely local pointer-chasing inside a segment
    /// stays unguarded.
    guard: RwLock<()>,
    policy: SegmentPolicy,
}

impl<T> SinglyList<T> {
    /// Creates an empty list with the default segmentation policy.
    pub fn new() -> Self {
        Self::with_policy(SegmentPolicy::default())
    }

    /// Creates an empty list with the given segmentation policy.
    pub fn with_policy(policy: SegmentPolicy) -> Self {
        Self {
            arena: Arena::new(),
            head: None,
            size: 0,
            guard: RwLock::new(()),
            policy,
        }
    }

    /// Replaces the segmentation policy for subsequent operations.
    pub fn set_policy(&mut self, policy: SegmentPolicy) {
        self.policy = policy;
    }

    /// Returns the number of stored items.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` when the list holds no items.
    pub fn is_empty(&self) -> bool {
        self.head.is_none() && self.size == 0
    }

    /// Drops every item, returning the list to its initial state.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
        self.size = 0;
    }

    /// Returns a borrowing front-to-back iterator.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            walk: self.head,
        }
    }
}

impl<T: Record> SinglyList<T> {
    /// Prepends `item` at the head. Always succeeds.
    pub fn insert(&mut self, item: T) {
        let head = self.arena.alloc(item, self.head);
        self.head = Some(head);
        self.size += 1;
    }

    /// Finds the item identified by `key` with one parallel worker per
    /// segment.
    ///
    /// # Errors
    ///
    /// [`ContainerError::EmptyList`] when the list has no items,
    /// [`ContainerError::NotExist`] when no item matches.
    pub fn search(&self, key: &T::Key) -> Result<&T, ContainerError>
    where
        T: Sync,
        T::Key: Sync,
    {
        if self.is_empty() {
            return Err(ContainerError::EmptyList);
        }
        let hit = self.find_hit(key).ok_or(ContainerError::NotExist)?;
        Ok(self.arena.item(hit.node))
    }

    /// Unlinks the item identified by `key`.
    ///
    /// # Errors
    ///
    /// [`ContainerError::EmptyList`] when the list has no items,
    /// [`ContainerError::NotExist`] when no item matches.
    pub fn delete(&mut self, key: &T::Key) -> Result<(), ContainerError>
    where
        T: Sync,
        T::Key: Sync,
    {
        if self.is_empty() {
            return Err(ContainerError::EmptyList);
        }
        let hit = self.find_hit(key).ok_or(ContainerError::NotExist)?;
        let next = self.arena.next(hit.node);
        match hit.prev {
            Some(prev) => {
                // The predecessor's link can double as a planner boundary.
                let _held = self.guard.write().unwrap();
                self.arena.set_next(prev, next);
            }
            None => self.head = next,
        }
        self.arena.release(hit.node);
        self.size -= 1;
        Ok(())
    }

    /// Applies [`Record::assign`] to the item identified by `key`.
    ///
    /// # Errors
    ///
    /// [`ContainerError::EmptyList`] when the list has no items,
    /// [`ContainerError::NotExist`] when no item matches.
    pub fn update(&mut self, key: &T::Key, field: T::Field) -> Result<(), ContainerError>
    where
        T: Sync,
        T::Key: Sync,
    {
        if self.is_empty() {
            return Err(ContainerError::EmptyList);
        }
        let hit = self.find_hit(key).ok_or(ContainerError::NotExist)?;
        self.arena.item_mut(hit.node).assign(field);
        Ok(())
    }

    /// Reverses the list, processing each planned segment in parallel.
    /// No-op on empty and single-item lists.
    pub fn reverse(&mut self)
    where
        T: Sync,
    {
        if self.size < 2 {
            return;
        }
        let size = self.policy.segment_size(self.size);
        let bound = segment_count(self.size, size);
        let (seg_tx, seg_rx) = mpsc::sync_channel(bound);
        let new_head = OnceLock::new();

        let this = &*self;
        thread::scope(|scope| {
            let new_head = &new_head;
            scope.spawn(move || this.split_segments(size, seg_tx));
            for segment in seg_rx {
                scope.spawn(move || this.reverse_segment(segment, new_head));
            }
        });

        if let Some(&head) = new_head.get() {
            self.head = Some(head);
        }
    }

    /// Reverses one segment's links in place.
    ///
    /// The reversal is seeded with the predecessor captured at planning
    /// time, so the segment's reversed tail ends up pointing into the
    /// previous segment's span; that is what stitches the boundaries back
    /// into one chain once every worker is done. The globally last
    /// segment publishes the list's new head.
    fn reverse_segment(&self, segment: Segment, new_head: &OnceLock<usize>)
    where
        T: Sync,
    {
        let end = {
            let _held = self.guard.read().unwrap();
            self.arena.next(segment.tail)
        };
        if end.is_none() {
            let _ = new_head.set(segment.tail);
        }

        let mut prev = segment.prev;
        let mut walk = segment.head;
        loop {
            let next = self.arena.next(walk);
            {
                // This link may be the boundary the planner walk is about
                // to capture.
                let _held = self.guard.write().unwrap();
                self.arena.set_next(walk, prev);
            }
            prev = Some(walk);
            match next {
                n if n == end => break,
                Some(n) => walk = n,
                None => break,
            }
        }
    }

    /// Sorts the list by [`Record::less`] with an iterative bottom-up
    /// merge sort. No-op on empty and single-item lists.
    pub fn sort(&mut self) {
        if self.size < 2 {
            return;
        }
        if let Some(head) = self.head {
            self.head = Some(sort::merge_sort(&self.arena, head, self.size));
        }
    }
}

impl<T> Default for SinglyList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Borrowing front-to-back iterator over a [`SinglyList`].
#[derive(Debug)]
pub struct Iter<'a, T> {
    list: &'a SinglyList<T>,
    walk: Option<usize>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let idx = self.walk?;
        self.walk = self.list.arena.next(idx);
        Some(self.list.arena.item(idx))
    }
}

impl<'a, T> IntoIterator for &'a SinglyList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
