//! Property tests for holdall-list
//!
//! Invariants under random keys, permutations, and segmentation policies:
//! membership after insert, size accounting under delete, reverse as an
//! involution, and sort ordering.

use holdall_list::{ContainerError, SegmentPolicy, SinglyList};
use holdall_testkit::Corp;
use itertools::Itertools;
use proptest::prelude::*;

fn distinct_keys() -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::hash_set(0_i64..10_000, 1..48)
        .prop_map(|set| set.into_iter().collect())
}

fn policies() -> impl Strategy<Value = SegmentPolicy> {
    prop_oneof![
        Just(SegmentPolicy::Auto),
        Just(SegmentPolicy::Fixed(0)),
        (1_usize..16).prop_map(SegmentPolicy::Fixed),
        Just(SegmentPolicy::sized(|n| (n / 4) as i64)),
    ]
}

fn build(keys: &[i64], policy: SegmentPolicy) -> SinglyList<Corp> {
    let mut list = SinglyList::with_policy(policy);
    for &key in keys {
        list.insert(Corp::new(key, "corp"));
    }
    list
}

fn front_to_back(list: &SinglyList<Corp>) -> Vec<i64> {
    list.iter().map(|c| c.id).collect()
}

proptest! {
    // Every inserted key is found; a key never inserted is NotExist.
    #[test]
    fn prop_search_finds_all_inserted_keys(keys in distinct_keys(), policy in policies()) {
        let list = build(&keys, policy);
        for key in &keys {
            prop_assert_eq!(list.search(key).unwrap().id, *key);
        }
        prop_assert_eq!(list.search(&10_001), Err(ContainerError::NotExist));
    }

    // Delete removes exactly one node and search stops finding the key.
    #[test]
    fn prop_delete_then_search_misses(keys in distinct_keys(), policy in policies()) {
        let mut list = build(&keys, policy);
        let victim = keys[keys.len() / 2];

        list.delete(&victim).unwrap();
        prop_assert_eq!(list.len(), keys.len() - 1);
        if keys.len() > 1 {
            prop_assert_eq!(list.search(&victim), Err(ContainerError::NotExist));
        } else {
            prop_assert_eq!(list.search(&victim), Err(ContainerError::EmptyList));
        }
    }

    // Deleting all keys in a random permutation leaves the list empty.
    #[test]
    fn prop_delete_all_in_any_order_empties_the_list(
        keys in distinct_keys().prop_shuffle(),
        policy in policies(),
    ) {
        let mut list = build(&keys, policy);
        let mut order = keys.clone();
        order.reverse();

        for (remaining, key) in order.iter().enumerate() {
            list.delete(key).unwrap();
            prop_assert_eq!(list.len(), order.len() - remaining - 1);
        }
        prop_assert!(list.is_empty());
        prop_assert_eq!(list.len(), 0);
    }

    // Reversing twice restores the original key order.
    #[test]
    fn prop_reverse_is_involution(keys in distinct_keys(), policy in policies()) {
        let mut list = build(&keys, policy);
        let original = front_to_back(&list);

        list.reverse();
        let mut expected = original.clone();
        expected.reverse();
        prop_assert_eq!(front_to_back(&list), expected);

        list.reverse();
        prop_assert_eq!(front_to_back(&list), original);
    }

    // Update rewrites the matched record's field and nothing else.
    #[test]
    fn prop_update_touches_one_record(keys in distinct_keys(), policy in policies()) {
        let mut list = build(&keys, policy);
        let target = keys[0];

        list.update(&target, "updated".into()).unwrap();
        for key in &keys {
            let expected = if *key == target { "updated" } else { "corp" };
            prop_assert_eq!(&list.search(key).unwrap().name, expected);
        }
    }

    // Sort produces ascending key order regardless of insertion order.
    #[test]
    fn prop_sort_orders_keys(keys in distinct_keys()) {
        let mut list = build(&keys, SegmentPolicy::Auto);
        list.sort();

        let expected: Vec<i64> = keys.iter().copied().sorted_unstable().collect();
        prop_assert_eq!(front_to_back(&list), expected);
    }
}
