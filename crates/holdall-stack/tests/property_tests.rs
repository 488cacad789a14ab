use holdall_stack::{ArrayStack, LinkedStack};
use proptest::prelude::*;

proptest! {
    // Both backings drain in exact reverse insertion order.
    #[test]
    fn stacks_are_lifo(items in proptest::collection::vec(any::<u32>(), 0..64)) {
        let mut array: ArrayStack<u32> = ArrayStack::new();
        let mut linked: LinkedStack<u32> = LinkedStack::new();
        for &item in &items {
            array.push(item);
            linked.push(item);
        }

        prop_assert_eq!(array.len(), items.len());
        prop_assert_eq!(linked.len(), items.len());

        for expected in items.iter().rev() {
            prop_assert_eq!(array.peek(), Some(expected));
            let array_popped = array.pop();
            prop_assert_eq!(array_popped.as_ref(), Some(expected));
            let linked_popped = linked.pop();
            prop_assert_eq!(linked_popped.as_ref(), Some(expected));
        }
        prop_assert!(array.is_empty());
        prop_assert!(linked.is_empty());
        prop_assert_eq!(array.pop(), None);
        prop_assert_eq!(linked.pop(), None);
    }
}
