//! LIFO stack implementations for holdall.
//!
//! [`ArrayStack`] pushes onto contiguous storage; [`LinkedStack`] chains
//! box-linked nodes and tears them down iteratively so deep stacks cannot
//! overflow the call stack on drop.

/// A LIFO stack backed by contiguous storage.
#[derive(Debug, Clone, Default)]
pub struct ArrayStack<T> {
    data: Vec<T>,
}

impl<T> ArrayStack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates an empty stack with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Pushes an item onto the top.
    pub fn push(&mut self, item: T) {
        self.data.push(item);
    }

    /// Removes and returns the top item, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        self.data.pop()
    }

    /// Returns a reference to the top item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.data.last()
    }

    /// Returns the number of stacked items.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` when no items are stacked.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Drops all stacked items.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T> Extend<T> for ArrayStack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}

#[derive(Debug)]
struct StackNode<T> {
    item: T,
    next: Option<Box<StackNode<T>>>,
}

/// A LIFO stack of box-linked nodes.
#[derive(Debug, Default)]
pub struct LinkedStack<T> {
    head: Option<Box<StackNode<T>>>,
    size: usize,
}

impl<T> LinkedStack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            head: None,
            size: 0,
        }
    }

    /// Pushes an item onto the top.
    pub fn push(&mut self, item: T) {
        let node = Box::new(StackNode {
            item,
            next: self.head.take(),
        });
        self.head = Some(node);
        self.size += 1;
    }

    /// Removes and returns the top item, or `None` when empty.
    pub fn pop(&mut self) -> Option<T> {
        self.head.take().map(|node| {
            self.head = node.next;
            self.size -= 1;
            node.item
        })
    }

    /// Returns a reference to the top item without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.head.as_deref().map(|node| &node.item)
    }

    /// Returns the number of stacked items.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` when no items are stacked.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Drops all stacked items.
    pub fn clear(&mut self) {
        // Unlink one node at a time; dropping the chain recursively would
        // recurse once per node.
        let mut walk = self.head.take();
        while let Some(mut node) = walk {
            walk = node.next.take();
        }
        self.size = 0;
    }
}

impl<T> Drop for LinkedStack<T> {
    fn drop(&mut self) {
        self.clear();
    }
}
