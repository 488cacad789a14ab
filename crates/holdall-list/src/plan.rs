//! Segmentation policy and the planner walk.
//!
//! The planner snapshots the list size, resolves a nodes-per-segment
//! target from the configured policy, and walks the list once, emitting
//! one descriptor per segment over a bounded channel so the walk and the
//! consuming fan-out overlap.

use std::fmt;
use std::sync::mpsc::SyncSender;
use std::sync::Arc;
use std::thread;

use crate::SinglyList;

/// Remainder segments smaller than this fold into the previous segment
/// instead of getting a worker of their own, keeping fan-out overhead
/// proportional to real work.
pub(crate) const REMAINDER_FLOOR: usize = 6;

/// Sizing function mapping the current list size to a segment size.
pub type SizeFn = dyn Fn(usize) -> i64 + Send + Sync;

/// Controls how list operations split the list across parallel workers.
#[derive(Clone, Default)]
pub enum SegmentPolicy {
    /// `N / worker-count` nodes per segment once the list outgrows the
    /// machine's worker count, otherwise a single segment.
    #[default]
    Auto,
    /// Fixed nodes-per-segment. `Fixed(0)` means one segment covering the
    /// whole list.
    Fixed(usize),
    /// Computes the segment size from the current list size, called once
    /// per planning pass. A negative result is a fatal configuration
    /// error; zero means one whole-list segment.
    Sized(Arc<SizeFn>),
}

impl fmt::Debug for SegmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentPolicy::Auto => f.write_str("Auto"),
            SegmentPolicy::Fixed(size) => f.debug_tuple("Fixed").field(size).finish(),
            SegmentPolicy::Sized(_) => f.write_str("Sized(..)"),
        }
    }
}

impl SegmentPolicy {
    /// Builds a [`SegmentPolicy::Sized`] from a sizing function.
    pub fn sized<F>(f: F) -> Self
    where
        F: Fn(usize) -> i64 + Send + Sync + 'static,
    {
        SegmentPolicy::Sized(Arc::new(f))
    }

    /// Resolves the nodes-per-segment target for a list of `len` nodes.
    ///
    /// # Panics
    ///
    /// Panics if a [`SegmentPolicy::Sized`] function returns a negative
    /// size. That signals misuse and is never clamped.
    pub(crate) fn segment_size(&self, len: usize) -> usize {
        match self {
            SegmentPolicy::Sized(f) => {
                let size = f(len);
                assert!(
                    size >= 0,
                    "segment sizing function returned a negative size: {size}"
                );
                if size == 0 {
                    len
                } else {
                    size as usize
                }
            }
            SegmentPolicy::Fixed(0) => len,
            SegmentPolicy::Fixed(size) => *size,
            SegmentPolicy::Auto => {
                let workers = thread::available_parallelism().map_or(1, |n| n.get());
                if len <= workers {
                    len
                } else {
                    len / workers
                }
            }
        }
    }
}

/// Number of segments the planner emits for `len` nodes at `size` nodes
/// per segment, after the remainder merge rule.
pub(crate) fn segment_count(len: usize, size: usize) -> usize {
    if len < size {
        return 1;
    }
    let full = len / size;
    if len % size >= REMAINDER_FLOOR {
        full + 1
    } else {
        full
    }
}

/// One contiguous span of the list assigned to a single worker.
///
/// `head` and `tail` are inclusive arena indices; `prev` is the node just
/// before `head`, or `None` when the segment starts at the list head.
/// Descriptors from one planning pass are contiguous and cover the list
/// exactly, with no overlap and no gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Segment {
    pub(crate) prev: Option<usize>,
    pub(crate) head: usize,
    pub(crate) tail: usize,
}

impl<T> SinglyList<T> {
    /// Walks the list once, emitting segment descriptors in list order.
    ///
    /// Runs on its own thread; `tx` is bounded to the segment count, so
    /// the walk blocks once the fan-out falls behind by a full window.
    pub(crate) fn split_segments(&self, size: usize, tx: SyncSender<Segment>) {
        let count = segment_count(self.size, size);
        let Some(mut head) = self.head else { return };
        let mut tail = head;
        let mut prev = None;

        for emitted in 0..count {
            let mut span = 1;
            while span < size {
                match self.arena.next(tail) {
                    Some(next) => tail = next,
                    None => break,
                }
                span += 1;
            }

            if emitted == count - 1 {
                // The final segment absorbs any folded remainder.
                while let Some(next) = self.arena.next(tail) {
                    tail = next;
                }
                let _ = tx.send(Segment { prev, head, tail });
                return;
            }

            // Capture the next segment's head before the descriptor goes
            // out: once a reverse worker holds the descriptor it may
            // rewrite this boundary link.
            let boundary = {
                let _held = self.guard.read().unwrap();
                self.arena.next(tail)
            };
            let _ = tx.send(Segment { prev, head, tail });

            match boundary {
                Some(next) => {
                    prev = Some(tail);
                    head = next;
                    tail = next;
                }
                None => return,
            }
        }
    }
}
