use std::time::Duration;

use holdall_delayqueue::DelayQueue;
use proptest::prelude::*;

proptest! {
    // Pending items surface in deadline order, with arrival order breaking
    // ties. Delays are whole seconds in the far future, so nothing expires
    // mid-test and the distinct delays dominate any clock drift between
    // enqueues.
    #[test]
    fn pending_items_hold_deadline_then_arrival_order(
        delays in proptest::collection::vec(0_u64..500, 1..32),
    ) {
        let queue = DelayQueue::new();
        for (idx, &delay) in delays.iter().enumerate() {
            queue.enqueue(idx, Duration::from_secs(60 + delay));
        }
        prop_assert_eq!(queue.len(), delays.len());

        let mut expected: Vec<usize> = (0..delays.len()).collect();
        // Stable sort keeps equal delays in arrival order.
        expected.sort_by_key(|&idx| delays[idx]);
        prop_assert_eq!(queue.snapshot(), expected);
    }

    // Items that expire together come out of the channel in arrival order.
    #[test]
    fn tied_deadlines_deliver_in_arrival_order(count in 1_usize..16) {
        let queue = DelayQueue::new();
        for idx in 0..count {
            queue.enqueue(idx, Duration::ZERO);
        }

        let rx = queue.receiver();
        for expected in 0..count {
            let got = rx.recv_timeout(Duration::from_secs(2)).unwrap();
            prop_assert_eq!(got, expected);
        }
        prop_assert!(queue.is_empty());
    }
}
