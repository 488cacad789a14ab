//! Index-addressed node storage for the singly linked list.
//!
//! Nodes live in slots addressed by stable indices instead of raw
//! pointers, so segment workers can share the whole structure without
//! aliasing hazards. Successor links are atomic words because a link at a
//! segment boundary may be read by the planner walk while a sibling worker
//! rewrites it; purely local link traffic uses the same words without
//! extra coordination.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Sentinel link value standing in for "no successor".
pub(crate) const NIL: usize = usize::MAX;

#[derive(Debug)]
struct Slot<T> {
    item: Option<T>,
    next: AtomicUsize,
}

/// Arena of list nodes with a free list for slot reuse.
///
/// Slots are never removed, so an index handed out by [`Arena::alloc`]
/// stays valid until the matching [`Arena::release`].
#[derive(Debug, Default)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<usize>,
}

impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Stores `item` with the given successor and returns its slot index.
    pub(crate) fn alloc(&mut self, item: T, next: Option<usize>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                let slot = &mut self.slots[idx];
                slot.item = Some(item);
                *slot.next.get_mut() = encode(next);
                idx
            }
            None => {
                self.slots.push(Slot {
                    item: Some(item),
                    next: AtomicUsize::new(encode(next)),
                });
                self.slots.len() - 1
            }
        }
    }

    /// Releases a slot for reuse and returns the item it held.
    pub(crate) fn release(&mut self, idx: usize) -> T {
        let item = self.slots[idx].item.take().expect("released a free slot");
        self.free.push(idx);
        item
    }

    pub(crate) fn item(&self, idx: usize) -> &T {
        self.slots[idx].item.as_ref().expect("read through a free slot")
    }

    pub(crate) fn item_mut(&mut self, idx: usize) -> &mut T {
        self.slots[idx].item.as_mut().expect("read through a free slot")
    }

    /// Loads the successor link of `idx`.
    pub(crate) fn next(&self, idx: usize) -> Option<usize> {
        decode(self.slots[idx].next.load(Ordering::Acquire))
    }

    /// Rewrites the successor link of `idx`.
    ///
    /// Takes `&self`: reversal workers rewrite links of distinct nodes in
    /// parallel while sharing the arena.
    pub(crate) fn set_next(&self, idx: usize, next: Option<usize>) {
        self.slots[idx].next.store(encode(next), Ordering::Release);
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

fn encode(link: Option<usize>) -> usize {
    link.unwrap_or(NIL)
}

fn decode(raw: usize) -> Option<usize> {
    if raw == NIL {
        None
    } else {
        Some(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_chains_nodes() {
        let mut arena: Arena<u32> = Arena::new();
        let c = arena.alloc(3, None);
        let b = arena.alloc(2, Some(c));
        let a = arena.alloc(1, Some(b));

        assert_eq!(arena.item(a), &1);
        assert_eq!(arena.next(a), Some(b));
        assert_eq!(arena.next(b), Some(c));
        assert_eq!(arena.next(c), None);
    }

    #[test]
    fn release_hands_back_item_and_reuses_slot() {
        let mut arena: Arena<&str> = Arena::new();
        let idx = arena.alloc("first", None);
        assert_eq!(arena.release(idx), "first");

        let reused = arena.alloc("second", None);
        assert_eq!(reused, idx);
        assert_eq!(arena.item(reused), &"second");
    }

    #[test]
    fn set_next_relinks() {
        let mut arena: Arena<u32> = Arena::new();
        let b = arena.alloc(2, None);
        let a = arena.alloc(1, Some(b));

        arena.set_next(a, None);
        assert_eq!(arena.next(a), None);
        arena.set_next(a, Some(b));
        assert_eq!(arena.next(a), Some(b));
    }

    #[test]
    #[should_panic(expected = "released a free slot")]
    fn double_release_panics() {
        let mut arena: Arena<u32> = Arena::new();
        let idx = arena.alloc(1, None);
        arena.release(idx);
        arena.release(idx);
    }
}
