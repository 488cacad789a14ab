//! Bottom-up merge sort over the arena links.
//!
//! Runs of doubling width are cut off the chain and merged pairwise, so
//! the whole sort is iterative and list length never turns into recursion
//! depth. Runs single-threaded under `&mut` access; no guard needed.

use holdall_core::Record;

use crate::arena::Arena;

/// Sorts the chain starting at `head` by [`Record::less`] and returns the
/// new head.
pub(crate) fn merge_sort<T: Record>(arena: &Arena<T>, head: usize, len: usize) -> usize {
    let mut head = head;
    let mut width = 1;
    while width < len {
        let mut merged_head: Option<usize> = None;
        let mut merged_tail: Option<usize> = None;
        let mut rest = Some(head);

        while let Some(left) = rest {
            let right = cut_run(arena, left, width);
            rest = match right {
                Some(right) => cut_run(arena, right, width),
                None => None,
            };

            let (run_head, run_tail) = merge_runs(arena, left, right);
            match merged_tail {
                Some(tail) => arena.set_next(tail, Some(run_head)),
                None => merged_head = Some(run_head),
            }
            merged_tail = Some(run_tail);
        }

        head = merged_head.unwrap_or(head);
        width *= 2;
    }
    head
}

/// Detaches the first `width` nodes of the chain starting at `start`,
/// returning the head of what follows. A chain shorter than `width` is
/// already detached and yields no remainder.
fn cut_run<T>(arena: &Arena<T>, start: usize, width: usize) -> Option<usize> {
    let mut walk = start;
    for _ in 1..width {
        walk = arena.next(walk)?;
    }
    let rest = arena.next(walk);
    arena.set_next(walk, None);
    rest
}

/// Merges two detached sorted runs, returning the merged head and tail.
/// Ties go left, keeping equal records in their original order.
fn merge_runs<T: Record>(arena: &Arena<T>, left: usize, right: Option<usize>) -> (usize, usize) {
    let Some(right) = right else {
        return (left, run_tail(arena, left));
    };

    let mut left = Some(left);
    let mut right = Some(right);
    let mut head: Option<usize> = None;
    let mut tail: Option<usize> = None;

    loop {
        let pick = match (left, right) {
            (Some(l), Some(r)) => {
                if arena.item(l).less(arena.item(r)) {
                    left = arena.next(l);
                    l
                } else {
                    right = arena.next(r);
                    r
                }
            }
            (Some(l), None) => {
                left = arena.next(l);
                l
            }
            (None, Some(r)) => {
                right = arena.next(r);
                r
            }
            (None, None) => break,
        };
        match tail {
            Some(t) => arena.set_next(t, Some(pick)),
            None => head = Some(pick),
        }
        tail = Some(pick);
    }

    let head = head.expect("merged two empty runs");
    let tail = tail.expect("merged two empty runs");
    arena.set_next(tail, None);
    (head, tail)
}

fn run_tail<T>(arena: &Arena<T>, head: usize) -> usize {
    let mut walk = head;
    while let Some(next) = arena.next(walk) {
        walk = next;
    }
    walk
}

#[cfg(test)]
mod tests {
    use crate::SinglyList;
    use holdall_testkit::Corp;

    fn keys_front_to_back(list: &SinglyList<Corp>) -> Vec<i64> {
        list.iter().map(|c| c.id).collect()
    }

    #[test]
    fn sort_orders_by_key() {
        let mut list = SinglyList::new();
        for key in [22, 19, 2, 6, 30, 7, 33, 23, 17, 29] {
            list.insert(Corp::new(key, "x"));
        }
        list.sort();
        assert_eq!(
            keys_front_to_back(&list),
            vec![2, 6, 7, 17, 19, 22, 23, 29, 30, 33]
        );
    }

    #[test]
    fn sort_handles_trivial_lists() {
        let mut empty: SinglyList<Corp> = SinglyList::new();
        empty.sort();
        assert!(empty.is_empty());

        let mut single = SinglyList::new();
        single.insert(Corp::new(1, "x"));
        single.sort();
        assert_eq!(keys_front_to_back(&single), vec![1]);
    }

    #[test]
    fn sort_on_already_sorted_input_is_stable_order() {
        let mut list = SinglyList::new();
        for key in (0..17).rev() {
            list.insert(Corp::new(key, "x"));
        }
        // Front to back is already 0..17.
        list.sort();
        assert_eq!(keys_front_to_back(&list), (0..17).collect::<Vec<_>>());
    }

    #[test]
    fn sort_reversed_input() {
        let mut list = SinglyList::new();
        for key in 0..33 {
            list.insert(Corp::new(key, "x"));
        }
        // Front to back is 32..=0.
        list.sort();
        assert_eq!(keys_front_to_back(&list), (0..33).collect::<Vec<_>>());
    }
}
