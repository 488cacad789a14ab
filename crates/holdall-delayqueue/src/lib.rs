//! Deadline-ordered delivery queue.
//!
//! Items enter with a delay and come back out of an `mpsc` channel once
//! the delay has elapsed. A background thread owns the delivery side: it
//! sleeps on a condvar until the earliest deadline, so an `enqueue` with
//! a nearer deadline wakes it early instead of waiting out a stale timer.

use std::collections::BinaryHeap;
use std::cmp::Ordering;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// A heap entry. Ordering is reversed so `BinaryHeap` surfaces the
/// earliest deadline first; `seq` breaks deadline ties in arrival order.
#[derive(Debug)]
struct Pending<T> {
    seq: u64,
    deadline: Instant,
    item: T,
}

impl<T> Ord for Pending<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Pending<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Pending<T> {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl<T> Eq for Pending<T> {}

#[derive(Debug)]
struct State<T> {
    heap: BinaryHeap<Pending<T>>,
    next_seq: u64,
    closed: bool,
}

#[derive(Debug)]
struct Shared<T> {
    state: Mutex<State<T>>,
    wakeup: Condvar,
}

/// A delay queue delivering expired items over a channel.
///
/// `enqueue` never blocks; delivery happens on a dedicated thread that is
/// joined when the queue is dropped.
#[derive(Debug)]
pub struct DelayQueue<T> {
    shared: Arc<Shared<T>>,
    expired: Receiver<T>,
    worker: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> DelayQueue<T> {
    /// Creates the queue and starts its delivery thread.
    pub fn new() -> Self {
        let shared = Arc::new(Shared {
            state: Mutex::new(State {
                heap: BinaryHeap::new(),
                next_seq: 0,
                closed: false,
            }),
            wakeup: Condvar::new(),
        });
        let (tx, expired) = mpsc::channel();
        let worker = {
            let shared = Arc::clone(&shared);
            std::thread::spawn(move || delivery_loop(&shared, &tx))
        };
        Self {
            shared,
            expired,
            worker: Some(worker),
        }
    }

    /// Schedules `item` for delivery after `delay`. A zero delay means
    /// the item expires immediately and is delivered as soon as the
    /// delivery thread runs.
    pub fn enqueue(&self, item: T, delay: Duration) {
        let mut state = self.shared.state.lock().unwrap();
        let seq = state.next_seq;
        state.next_seq += 1;
        state.heap.push(Pending {
            seq,
            deadline: Instant::now() + delay,
            item,
        });
        drop(state);
        self.shared.wakeup.notify_one();
    }

    /// The receiving end of the delivery channel.
    pub fn receiver(&self) -> &Receiver<T> {
        &self.expired
    }

    /// Number of items still waiting on their deadline.
    pub fn len(&self) -> usize {
        self.shared.state.lock().unwrap().heap.len()
    }

    /// Returns `true` when no items are pending. Items already delivered
    /// but not yet received do not count as pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> DelayQueue<T> {
    /// Copies the still-pending items in deadline order, earliest first.
    pub fn snapshot(&self) -> Vec<T> {
        let state = self.shared.state.lock().unwrap();
        let mut pending: Vec<_> = state
            .heap
            .iter()
            .map(|p| (p.deadline, p.seq, p.item.clone()))
            .collect();
        pending.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        pending.into_iter().map(|(_, _, item)| item).collect()
    }
}

impl<T: Send + 'static> Default for DelayQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for DelayQueue<T> {
    fn drop(&mut self) {
        self.shared.state.lock().unwrap().closed = true;
        self.shared.wakeup.notify_one();
        if let Some(worker) = self.worker.take() {
            // The worker only blocks on the condvar, so this join is bounded
            // by the wakeup above.
            let _ = worker.join();
        }
    }
}

fn delivery_loop<T>(shared: &Shared<T>, tx: &Sender<T>) {
    let mut state = shared.state.lock().unwrap();
    loop {
        let now = Instant::now();
        while state.heap.peek().is_some_and(|p| p.deadline <= now) {
            let pending = state.heap.pop().expect("peeked entry is present");
            if tx.send(pending.item).is_err() {
                return;
            }
        }
        if state.closed {
            return;
        }
        state = match state.heap.peek().map(|p| p.deadline) {
            Some(deadline) => {
                let wait = deadline.saturating_duration_since(Instant::now());
                shared.wakeup.wait_timeout(state, wait).unwrap().0
            }
            None => shared.wakeup.wait(state).unwrap(),
        };
    }
}
