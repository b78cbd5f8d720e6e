//! This crate exposes self-balancing Binary Search Trees (BSTs) next to a plain
//! one that never rebalances.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. The most important invariant of a
//! BST is that an in-order walk (left subtree, then the node, then the right
//! subtree) visits the keys in non-decreasing order. Equal keys are allowed
//! and are placed in the right subtree.
//!
//! Searching takes `O(height)`, where `height` is the number of nodes on the
//! longest path from the root to a leaf. Inserting keys in sorted order into
//! a [`plain::PlainTree`] makes that height `N`. The balancing trees keep it
//! at `O(lg N)` by restructuring with rotations after every change:
//!
//! - [`avl::AvlTree`] caches every node's height and keeps the heights of
//!   sibling subtrees within one of each other.
//! - [`red_black::RedBlackTree`] colors every node red or black and keeps the
//!   number of black nodes equal on every root-to-leaf path.
//!
//! All three implement [`SearchTree`], and all three can check their own
//! invariants with [`SearchTree::validate`].
//!
//! ```
//! use balanced_bst::{avl::AvlTree, red_black::RedBlackTree, SearchTree};
//!
//! fn fill<T: SearchTree<u32> + Default>() -> T {
//!     let mut tree = T::default();
//!     for key in 0..1000 {
//!         tree.insert(key);
//!     }
//!     tree
//! }
//!
//! let avl: AvlTree<u32> = fill();
//! let rb: RedBlackTree<u32> = fill();
//!
//! assert!(avl.height() <= 15);
//! assert!(rb.height() <= 20);
//! assert_eq!(avl.validate(), Ok(()));
//! assert_eq!(rb.validate(), Ok(()));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
pub mod avl;
mod error;
pub mod plain;
pub mod red_black;
mod rotation;
mod traversal;

#[cfg(test)]
mod test;

pub use error::InvariantViolation;

/// The operations every tree in this crate supports.
pub trait SearchTree<K: Ord> {
    /// Inserts `key`, keeping any equal keys already present.
    fn insert(&mut self, key: K);

    /// Removes one occurrence of `key`. Does nothing if `key` is absent.
    fn delete(&mut self, key: &K);

    /// Returns `true` if a key equal to `key` is present.
    fn contains(&self, key: &K) -> bool;

    /// Number of stored keys, counting duplicates.
    fn len(&self) -> usize;

    /// Returns `true` if no keys are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of nodes on the longest root-to-leaf path. An empty tree has height 0.
    fn height(&self) -> usize;

    /// The stored keys in ascending order.
    fn keys(&self) -> Vec<&K>;

    /// Recomputes the tree's structural invariants from scratch and reports the first one that
    /// does not hold.
    fn validate(&self) -> Result<(), InvariantViolation>;
}
