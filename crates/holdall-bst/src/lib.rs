//! Binary search tree over the holdall capability traits.
//!
//! Records are placed by [`Record::less`] and looked up by bare key, which
//! is why the tree requires [`Keyed`] rather than plain [`Record`]: keyed
//! descent has to order a stored record against the lookup key. All walks
//! are iterative; tree height never turns into call-stack depth.

use std::cmp::Ordering;

use holdall_core::{ContainerError, Keyed, Record};
use holdall_queue::LinkedQueue;

#[derive(Debug)]
struct TreeNode<T> {
    item: T,
    left: Option<Box<TreeNode<T>>>,
    right: Option<Box<TreeNode<T>>>,
}

/// Traversal orders accepted by [`BsTree::traverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    Inorder,
    Preorder,
    Postorder,
    Level,
}

/// A binary search tree of [`Keyed`] records.
#[derive(Debug)]
pub struct BsTree<T> {
    root: Option<Box<TreeNode<T>>>,
    size: usize,
}

impl<T> BsTree<T> {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// Returns the number of stored records.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` when the tree holds no records.
    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.size == 0
    }

    /// Drops every record, returning the tree to its initial state.
    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }
}

impl<T> BsTree<T>
where
    T: Keyed,
    T::Key: Ord,
{
    /// Inserts a record, walking right on [`Record::less`].
    ///
    /// # Errors
    ///
    /// [`ContainerError::AlreadyExists`] when a record with the same key
    /// is already stored; the tree is left unchanged.
    pub fn insert(&mut self, item: T) -> Result<(), ContainerError> {
        let key = item.key();
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            if node.item.matches(&key) {
                return Err(ContainerError::AlreadyExists);
            }
            slot = if node.item.less(&item) {
                &mut node.right
            } else {
                &mut node.left
            };
        }
        *slot = Some(Box::new(TreeNode {
            item,
            left: None,
            right: None,
        }));
        self.size += 1;
        Ok(())
    }

    /// Finds the record identified by `key`.
    ///
    /// # Errors
    ///
    /// [`ContainerError::EmptyTree`] when the tree has no records,
    /// [`ContainerError::NotExist`] when no record matches.
    pub fn search(&self, key: &T::Key) -> Result<&T, ContainerError> {
        if self.is_empty() {
            return Err(ContainerError::EmptyTree);
        }
        let mut walk = self.root.as_deref();
        while let Some(node) = walk {
            if node.item.matches(key) {
                return Ok(&node.item);
            }
            walk = match node.item.key().cmp(key) {
                Ordering::Greater => node.left.as_deref(),
                _ => node.right.as_deref(),
            };
        }
        Err(ContainerError::NotExist)
    }

    /// Applies [`Record::assign`] to the record identified by `key`.
    ///
    /// # Errors
    ///
    /// [`ContainerError::EmptyTree`] when the tree has no records,
    /// [`ContainerError::NotExist`] when no record matches.
    pub fn update(&mut self, key: &T::Key, field: T::Field) -> Result<(), ContainerError> {
        if self.is_empty() {
            return Err(ContainerError::EmptyTree);
        }
        let mut walk = self.root.as_deref_mut();
        while let Some(node) = walk {
            if node.item.matches(key) {
                node.item.assign(field);
                return Ok(());
            }
            walk = match node.item.key().cmp(key) {
                Ordering::Greater => node.left.as_deref_mut(),
                _ => node.right.as_deref_mut(),
            };
        }
        Err(ContainerError::NotExist)
    }

    /// Removes the record identified by `key`. Two-child nodes are
    /// replaced by their in-order successor.
    ///
    /// # Errors
    ///
    /// [`ContainerError::EmptyTree`] when the tree has no records,
    /// [`ContainerError::NotExist`] when no record matches.
    pub fn delete(&mut self, key: &T::Key) -> Result<(), ContainerError> {
        if self.is_empty() {
            return Err(ContainerError::EmptyTree);
        }
        let mut slot = &mut self.root;
        loop {
            match slot {
                None => return Err(ContainerError::NotExist),
                Some(node) if node.item.matches(key) => break,
                Some(node) => {
                    slot = match node.item.key().cmp(key) {
                        Ordering::Greater => &mut node.left,
                        _ => &mut node.right,
                    };
                }
            }
        }
        remove_at(slot);
        self.size -= 1;
        Ok(())
    }

    /// Returns the record identified by `key` together with its depth,
    /// the number of edges from the root.
    ///
    /// # Errors
    ///
    /// [`ContainerError::EmptyTree`] when the tree has no records,
    /// [`ContainerError::NotExist`] when no record matches.
    pub fn depth_of(&self, key: &T::Key) -> Result<usize, ContainerError> {
        if self.is_empty() {
            return Err(ContainerError::EmptyTree);
        }
        let mut depth = 0;
        let mut walk = self.root.as_deref();
        while let Some(node) = walk {
            if node.item.matches(key) {
                return Ok(depth);
            }
            depth += 1;
            walk = match node.item.key().cmp(key) {
                Ordering::Greater => node.left.as_deref(),
                _ => node.right.as_deref(),
            };
        }
        Err(ContainerError::NotExist)
    }

    /// Height of the subtree rooted at the record identified by `key`.
    ///
    /// # Errors
    ///
    /// [`ContainerError::EmptyTree`] when the tree has no records,
    /// [`ContainerError::NotExist`] when no record matches.
    pub fn height_of(&self, key: &T::Key) -> Result<i64, ContainerError> {
        if self.is_empty() {
            return Err(ContainerError::EmptyTree);
        }
        let mut walk = self.root.as_deref();
        while let Some(node) = walk {
            if node.item.matches(key) {
                return Ok(subtree_height(node));
            }
            walk = match node.item.key().cmp(key) {
                Ordering::Greater => node.left.as_deref(),
                _ => node.right.as_deref(),
            };
        }
        Err(ContainerError::NotExist)
    }
}

impl<T> BsTree<T> {
    /// Height of the tree: the number of edges on the longest downward
    /// path from the root. `-1` for an empty tree.
    pub fn height(&self) -> i64 {
        match self.root.as_deref() {
            Some(root) => subtree_height(root),
            None => -1,
        }
    }

    /// Reports whether the tree is full: every level is completely
    /// occupied, so the size equals `2^(h+1) - 1` for height `h`. An
    /// empty tree is full.
    pub fn is_full(&self) -> bool {
        let levels = (self.height() + 1) as u32;
        if levels >= usize::BITS {
            return false;
        }
        self.size == (1_usize << levels) - 1
    }

    /// Collects references to every record in the given traversal order.
    pub fn traverse(&self, order: Traversal) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.size);
        let Some(root) = self.root.as_deref() else {
            return out;
        };

        match order {
            Traversal::Inorder => {
                let mut stack = Vec::new();
                let mut walk = Some(root);
                loop {
                    while let Some(node) = walk {
                        stack.push(node);
                        walk = node.left.as_deref();
                    }
                    let Some(node) = stack.pop() else { break };
                    out.push(&node.item);
                    walk = node.right.as_deref();
                }
            }
            Traversal::Preorder => {
                let mut stack = vec![root];
                while let Some(node) = stack.pop() {
                    out.push(&node.item);
                    if let Some(right) = node.right.as_deref() {
                        stack.push(right);
                    }
                    if let Some(left) = node.left.as_deref() {
                        stack.push(left);
                    }
                }
            }
            Traversal::Postorder => {
                // Root-right-left preorder, reversed.
                let mut stack = vec![root];
                while let Some(node) = stack.pop() {
                    out.push(&node.item);
                    if let Some(left) = node.left.as_deref() {
                        stack.push(left);
                    }
                    if let Some(right) = node.right.as_deref() {
                        stack.push(right);
                    }
                }
                out.reverse();
            }
            Traversal::Level => {
                let mut queue = LinkedQueue::new();
                queue.enqueue(root);
                while let Some(node) = queue.dequeue() {
                    out.push(&node.item);
                    if let Some(left) = node.left.as_deref() {
                        queue.enqueue(left);
                    }
                    if let Some(right) = node.right.as_deref() {
                        queue.enqueue(right);
                    }
                }
            }
        }
        out
    }
}

impl<T> Default for BsTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Trees are equal when their postorder traversals match element for
/// element. Inorder output only depends on the stored records, so the
/// postorder walk is what distinguishes trees that grew different shapes
/// from the same records.
impl<T: PartialEq> PartialEq for BsTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self
                .traverse(Traversal::Postorder)
                .into_iter()
                .eq(other.traverse(Traversal::Postorder))
    }
}

/// Unlinks the node in `slot`, reattaching its children.
fn remove_at<T>(slot: &mut Option<Box<TreeNode<T>>>) {
    let Some(mut node) = slot.take() else { return };
    match (node.left.take(), node.right.take()) {
        (None, None) => {}
        (Some(child), None) | (None, Some(child)) => *slot = Some(child),
        (Some(left), Some(right)) => {
            let (successor, right) = take_leftmost(right);
            node.item = successor;
            node.left = Some(left);
            node.right = right;
            *slot = Some(node);
        }
    }
}

/// Detaches the leftmost record of `subtree`, returning it together with
/// what remains of the subtree.
fn take_leftmost<T>(mut subtree: Box<TreeNode<T>>) -> (T, Option<Box<TreeNode<T>>>) {
    if subtree.left.is_none() {
        let rest = subtree.right.take();
        return (subtree.item, rest);
    }

    // Descend to the parent of the leftmost node so it can be unlinked.
    let mut parent = subtree.as_mut();
    loop {
        let has_grandchild = parent
            .left
            .as_deref()
            .is_some_and(|left| left.left.is_some());
        if !has_grandchild {
            break;
        }
        parent = parent.left.as_deref_mut().expect("checked above");
    }
    let mut leftmost = parent.left.take().expect("subtree has a left child");
    parent.left = leftmost.right.take();
    (leftmost.item, Some(subtree))
}

fn subtree_height<T>(root: &TreeNode<T>) -> i64 {
    let mut height = -1;
    let mut level = vec![root];
    while !level.is_empty() {
        height += 1;
        let mut next = Vec::new();
        for node in level {
            if let Some(left) = node.left.as_deref() {
                next.push(left);
            }
            if let Some(right) = node.right.as_deref() {
                next.push(right);
            }
        }
        level = next;
    }
    height
}
