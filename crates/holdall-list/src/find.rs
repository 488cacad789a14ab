//! Parallel find engine shared by search, delete, and update.
//!
//! One scoped worker per planned segment scans for the key; the first
//! positive match is published to a single-slot channel and the remaining
//! workers are cancelled cooperatively through a one-shot flag checked
//! between node comparisons. Because keys are contractually unique, at
//! most one worker can publish.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, SyncSender};
use std::thread;

use holdall_core::Record;

use crate::plan::{segment_count, Segment};
use crate::SinglyList;

/// A positive match: the matching node and its true predecessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Hit {
    pub(crate) prev: Option<usize>,
    pub(crate) node: usize,
}

impl<T: Record> SinglyList<T> {
    /// Fans one worker out per planned segment and resolves to the first
    /// positive match.
    ///
    /// Returns as soon as a worker publishes; the cancelled workers drain
    /// on their own inside the scope, so nothing touches the list after
    /// this call returns. Resolves to `None` when every worker finishes
    /// without a match.
    pub(crate) fn find_hit(&self, key: &T::Key) -> Option<Hit>
    where
        T: Sync,
        T::Key: Sync,
    {
        let size = self.policy.segment_size(self.size);
        let bound = segment_count(self.size, size);
        let (seg_tx, seg_rx) = mpsc::sync_channel(bound);
        let (hit_tx, hit_rx) = mpsc::sync_channel(1);
        let cancel = AtomicBool::new(false);

        thread::scope(|scope| {
            let cancel = &cancel;
            scope.spawn(move || self.split_segments(size, seg_tx));

            for segment in seg_rx {
                let hit_tx = hit_tx.clone();
                scope.spawn(move || self.scan_segment(segment, key, hit_tx, cancel));
            }
            // The fan-out's own sender must go before waiting, or the
            // channel never disconnects on a miss.
            drop(hit_tx);

            match hit_rx.recv() {
                Ok(hit) => {
                    cancel.store(true, Ordering::Release);
                    Some(hit)
                }
                Err(_) => None,
            }
        })
    }

    /// Scans one segment for `key`, publishing at most one hit.
    fn scan_segment(
        &self,
        segment: Segment,
        key: &T::Key,
        hit_tx: SyncSender<Hit>,
        cancel: &AtomicBool,
    ) {
        // Exclusive end boundary: the successor of the segment's last
        // node, read under the guard because a neighboring segment's
        // mutation may be adjusting it.
        let end = {
            let _held = self.guard.read().unwrap();
            self.arena.next(segment.tail)
        };

        let mut walk = segment.head;
        let mut prev = None;
        loop {
            if self.arena.item(walk).matches(key) {
                // A first-node match has no locally walked predecessor;
                // the descriptor carries the true one.
                let prev = if walk == segment.head {
                    segment.prev
                } else {
                    prev
                };
                // Keys are contractually unique. If that contract is
                // broken and a second worker already published, drop this
                // match instead of blocking the scope join.
                let _ = hit_tx.try_send(Hit { prev, node: walk });
                return;
            }
            if cancel.load(Ordering::Acquire) {
                return;
            }
            match self.arena.next(walk) {
                next if next == end => return,
                Some(next) => {
                    prev = Some(walk);
                    walk = next;
                }
                None => return,
            }
        }
    }
}
