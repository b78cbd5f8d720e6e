//! A plain, non-balancing BST. It offers the same operations as the balancing trees and is here
//! as the baseline they are measured against: inserting keys in sorted order turns it into a
//! linked list.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::plain::PlainTree;
//!
//! let tree: PlainTree<_> = [10, 5, 15, 3, 7, 12, 17].into_iter().collect();
//!
//! assert!(tree.contains(&7));
//! assert!(!tree.contains(&20));
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::{InvariantViolation, SearchTree};

type Link<K> = Option<Box<Node<K>>>;

struct Node<K> {
    key: K,
    left: Link<K>,
    right: Link<K>,
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            left: None,
            right: None,
        }
    }
}

/// A Binary Search Tree that never rebalances. Equal keys go to the right, like in the balancing
/// trees.
///
/// Nothing here recurses per level, so a tree degenerated into a list of any length can still be
/// searched, edited, cloned and dropped.
pub struct PlainTree<K> {
    root: Link<K>,
    len: usize,
}

impl<K> Default for PlainTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> PlainTree<K> {
    /// Generates a new, empty `PlainTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of keys in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        let mut level: Vec<&Node<K>> = self.root.as_deref().into_iter().collect();
        let mut height = 0;
        while !level.is_empty() {
            height += 1;
            level = level
                .into_iter()
                .flat_map(|node| [node.left.as_deref(), node.right.as_deref()])
                .flatten()
                .collect();
        }
        height
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root.as_deref());
        iter
    }

    /// Collects the keys in ascending order.
    pub fn inorder(&self) -> Vec<&K> {
        self.iter().collect()
    }

    /// Returns `true` if a key equal to `key` is in the tree.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Equal => return true,
                Ordering::Greater => node.right.as_deref(),
            };
        }
        false
    }

    /// Inserts `key` at the leaf its comparisons lead to.
    pub fn insert(&mut self, key: K)
    where
        K: Ord,
    {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if key < node.key {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Box::new(Node::new(key)));
        self.len += 1;
    }

    /// Deletes one node holding a key equal to `key`, if there is one. A node with two children
    /// takes its in-order successor's key instead of being unlinked.
    pub fn delete(&mut self, key: &K)
    where
        K: Ord,
    {
        let mut link = &mut self.root;
        loop {
            let Some(node) = link.as_deref() else {
                return;
            };
            let ordering = key.cmp(&node.key);
            if ordering == Ordering::Equal {
                break;
            }
            let Some(node) = link else {
                return;
            };
            link = if ordering == Ordering::Less {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        let Some(node) = link else {
            return;
        };
        match (node.left.is_some(), node.right.is_some()) {
            (true, true) => {
                if let Some(successor) = take_min(&mut node.right) {
                    node.key = successor;
                }
            }
            (true, false) => *link = node.left.take(),
            (false, _) => *link = node.right.take(),
        }
        self.len -= 1;
    }

    /// Checks the search order and the length.
    pub fn validate(&self) -> Result<(), InvariantViolation>
    where
        K: Ord,
    {
        let mut reachable = 0;
        let mut previous = None;
        for key in self.iter() {
            if previous.map_or(false, |previous| key < previous) {
                return Err(InvariantViolation::OutOfOrder {
                    position: reachable,
                });
            }
            previous = Some(key);
            reachable += 1;
        }
        if reachable != self.len {
            return Err(InvariantViolation::LengthMismatch {
                reported: self.len,
                reachable,
            });
        }
        Ok(())
    }
}

/// Unlinks the leftmost node below `link` and returns its key.
fn take_min<K>(mut link: &mut Link<K>) -> Option<K> {
    while link.as_ref()?.left.is_some() {
        let Some(node) = link else {
            return None;
        };
        link = &mut node.left;
    }
    let node = link.take()?;
    let Node { key, right, .. } = *node;
    *link = right;
    Some(key)
}

impl<K> Drop for PlainTree<K> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<K: Clone> Clone for PlainTree<K> {
    fn clone(&self) -> Self {
        // Post-order, so both subtrees of a node are already built when it is.
        let mut built: Vec<Link<K>> = Vec::new();
        let mut pending = vec![(self.root.as_deref(), false)];
        while let Some((node, children_built)) = pending.pop() {
            let Some(node) = node else {
                built.push(None);
                continue;
            };
            if children_built {
                let right = built.pop().flatten();
                let left = built.pop().flatten();
                built.push(Some(Box::new(Node {
                    key: node.key.clone(),
                    left,
                    right,
                })));
            } else {
                pending.push((Some(node), true));
                pending.push((node.right.as_deref(), false));
                pending.push((node.left.as_deref(), false));
            }
        }

        Self {
            root: built.pop().flatten(),
            len: self.len,
        }
    }
}

impl<K: Ord> SearchTree<K> for PlainTree<K> {
    fn insert(&mut self, key: K) {
        PlainTree::insert(self, key)
    }

    fn delete(&mut self, key: &K) {
        PlainTree::delete(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        PlainTree::contains(self, key)
    }

    fn len(&self) -> usize {
        PlainTree::len(self)
    }

    fn height(&self) -> usize {
        PlainTree::height(self)
    }

    fn keys(&self) -> Vec<&K> {
        self.inorder()
    }

    fn validate(&self) -> Result<(), InvariantViolation> {
        PlainTree::validate(self)
    }
}

impl<K: fmt::Debug> fmt::Debug for PlainTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> FromIterator<K> for PlainTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for PlainTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a PlainTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the keys of a [`PlainTree`], created by [`PlainTree::iter`].
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Iter<'a, K> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.key)
    }
}
