//! A color-balanced (Red-Black) search tree.
//!
//! Nodes are colored red or black such that the root is black, no red node has a red child and
//! every path from a node down to an empty leaf passes through the same number of black nodes.
//! That keeps the height below `2 * lg(n + 1)`.
//!
//! Nodes are stored in an arena. Slot 0 is a black sentinel that stands in for every missing
//! child and for the root's parent, so the fix-up loops never have to special-case a missing
//! node. The sentinel's parent link is borrowed for the duration of a delete fix-up and reset
//! afterwards; it is never handed out as a key.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::red_black::{Color, RedBlackTree};
//!
//! let mut tree = RedBlackTree::new();
//! for key in [10, 20, 5, 30, 15, 25] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.root_color(), Some(Color::Black));
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![5, 10, 15, 20, 25, 30]);
//!
//! tree.delete(&20);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![5, 10, 15, 25, 30]);
//! assert!(tree.validate().is_ok());
//! ```

use std::fmt;

use crate::arena::{Arena, Direction, Links, Node, NodeId};
use crate::rotation::rotate;
use crate::traversal::{self, InOrder};
use crate::{InvariantViolation, SearchTree};

/// The color of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Freshly inserted nodes are red. A red node never has a red child.
    Red,
    /// Counted by the black height. The root and the sentinel are always black.
    Black,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => f.write_str("RED"),
            Color::Black => f.write_str("BLACK"),
        }
    }
}

#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub(crate) struct RbNode<K> {
    key: Option<K>,
    color: Color,
    links: Links,
}

impl<K> RbNode<K> {
    fn sentinel() -> Self {
        Self {
            key: None,
            color: Color::Black,
            links: Links::DETACHED,
        }
    }

    fn red(key: K, parent: NodeId) -> Self {
        Self {
            key: Some(key),
            color: Color::Red,
            links: Links::leaf(parent),
        }
    }
}

impl<K> Node for RbNode<K> {
    type Key = K;

    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }

    fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    fn key_slot_mut(&mut self) -> &mut Option<K> {
        &mut self.key
    }
}

/// A self-balancing Binary Search Tree using node colors (a Red-Black tree).
///
/// Keys must have a total order that stays consistent for as long as they are in the tree.
/// Equal keys are all kept: a key equal to an existing one is placed in that node's right
/// subtree.
#[derive(Clone)]
pub struct RedBlackTree<K> {
    arena: Arena<RbNode<K>>,
    root: NodeId,
}

impl<K> Default for RedBlackTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> RedBlackTree<K> {
    /// Generates a new, empty `RedBlackTree`.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(RbNode::sentinel()),
            root: NodeId::NIL,
        }
    }

    /// Number of keys in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_nil()
    }

    /// Number of nodes on the longest path from the root to a leaf.
    pub fn height(&self) -> usize {
        traversal::height(&self.arena, self.root)
    }

    /// Number of black nodes on every path from the root down to an empty leaf, not counting the
    /// leaf itself.
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut id = self.root;
        while !id.is_nil() {
            if self.color(id) == Color::Black {
                count += 1;
            }
            id = self.arena.left(id);
        }
        count
    }

    /// Color of the root, or `None` for an empty tree.
    pub fn root_color(&self) -> Option<Color> {
        (!self.root.is_nil()).then(|| self.color(self.root))
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = NodeId::NIL;
    }

    /// Iterates over the keys in ascending order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: InOrder::new(&self.arena, self.root),
        }
    }

    /// Collects the keys in ascending order, each with the color of the node holding it.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::red_black::{Color, RedBlackTree};
    ///
    /// let tree: RedBlackTree<_> = [2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(
    ///     tree.inorder(),
    ///     vec![(&1, Color::Red), (&2, Color::Black), (&3, Color::Red)]
    /// );
    /// ```
    pub fn inorder(&self) -> Vec<(&K, Color)> {
        InOrder::new(&self.arena, self.root)
            .filter_map(|node| node.key().map(|key| (key, node.color)))
            .collect()
    }

    /// Returns `true` if a key equal to `key` is in the tree.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        !self.arena.find(self.root, key).is_nil()
    }

    /// Inserts `key` as a red leaf, then restores the coloring. Equal keys are kept side by
    /// side, so this always adds a node.
    pub fn insert(&mut self, key: K)
    where
        K: Ord,
    {
        let (parent, direction) = self.arena.insertion_point(self.root, &key);
        let inserted = self.arena.alloc(RbNode::red(key, parent));
        if parent.is_nil() {
            self.root = inserted;
        } else {
            self.arena.set_child(parent, direction, inserted);
        }
        self.fix_insert(inserted);
    }

    /// Resolves a red node with a red parent, walking up while the uncle is red.
    fn fix_insert(&mut self, mut current: NodeId) {
        while current != self.root && self.color(self.arena.parent(current)) == Color::Red {
            // A red parent is never the root, so the grandparent is a real node.
            let parent = self.arena.parent(current);
            let grandparent = self.arena.parent(parent);
            let side = self.arena.direction_of(grandparent, parent);
            let uncle = self.arena.child(grandparent, side.opposite());

            if self.color(uncle) == Color::Red {
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                current = grandparent;
                continue;
            }

            // Inner child: turn it into the outer case first.
            if current == self.arena.child(parent, side.opposite()) {
                current = parent;
                rotate(&mut self.arena, &mut self.root, current, side);
            }
            let parent = self.arena.parent(current);
            let grandparent = self.arena.parent(parent);
            self.set_color(parent, Color::Black);
            self.set_color(grandparent, Color::Red);
            rotate(&mut self.arena, &mut self.root, grandparent, side.opposite());
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Deletes one node holding a key equal to `key`, if there is one. Deleting a missing key is
    /// a no-op.
    ///
    /// A node with two children is replaced by its in-order successor, which is moved (not
    /// copied) into its place and takes on its color.
    pub fn delete(&mut self, key: &K)
    where
        K: Ord,
    {
        let target = self.arena.find(self.root, key);
        if target.is_nil() {
            return;
        }

        let mut removed_color = self.color(target);
        let replacement;
        if self.arena.left(target).is_nil() {
            replacement = self.arena.right(target);
            self.transplant(target, replacement);
        } else if self.arena.right(target).is_nil() {
            replacement = self.arena.left(target);
            self.transplant(target, replacement);
        } else {
            let successor = self.arena.minimum(self.arena.right(target));
            removed_color = self.color(successor);
            replacement = self.arena.right(successor);

            if self.arena.parent(successor) == target {
                // Even when `replacement` is the sentinel: the fix-up needs to find its parent.
                self.arena.set_parent(replacement, successor);
            } else {
                self.transplant(successor, replacement);
                let right = self.arena.right(target);
                self.arena.set_child(successor, Direction::Right, right);
                self.arena.set_parent(right, successor);
            }

            self.transplant(target, successor);
            let left = self.arena.left(target);
            self.arena.set_child(successor, Direction::Left, left);
            self.arena.set_parent(left, successor);
            let color = self.color(target);
            self.set_color(successor, color);
        }
        self.arena.release(target);

        if removed_color == Color::Black {
            self.fix_delete(replacement);
        }
        self.arena.set_parent(NodeId::NIL, NodeId::NIL);
    }

    /// Puts `new` where `old` hangs. `new`'s parent link is always written, so this works with
    /// the sentinel as `new`.
    fn transplant(&mut self, old: NodeId, new: NodeId) {
        let parent = self.arena.parent(old);
        self.arena.replace_child(&mut self.root, old, new);
        self.arena.set_parent(new, parent);
    }

    /// Resolves the missing black left behind by removing a black node. `current` carries the
    /// extra black; it is pushed up while the sibling can simply be turned red, and otherwise
    /// absorbed by at most three rotations.
    fn fix_delete(&mut self, mut current: NodeId) {
        while current != self.root && self.color(current) == Color::Black {
            let parent = self.arena.parent(current);
            let side = self.arena.direction_of(parent, current);
            let far = side.opposite();
            let mut sibling = self.arena.child(parent, far);

            if self.color(sibling) == Color::Red {
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                rotate(&mut self.arena, &mut self.root, parent, side);
                sibling = self.arena.child(parent, far);
            }

            let near_child = self.arena.child(sibling, side);
            let far_child = self.arena.child(sibling, far);
            if self.color(near_child) == Color::Black && self.color(far_child) == Color::Black {
                self.set_color(sibling, Color::Red);
                current = parent;
                continue;
            }

            if self.color(far_child) == Color::Black {
                self.set_color(near_child, Color::Black);
                self.set_color(sibling, Color::Red);
                rotate(&mut self.arena, &mut self.root, sibling, far);
                sibling = self.arena.child(parent, far);
            }
            let parent_color = self.color(parent);
            self.set_color(sibling, parent_color);
            self.set_color(parent, Color::Black);
            let far_child = self.arena.child(sibling, far);
            self.set_color(far_child, Color::Black);
            rotate(&mut self.arena, &mut self.root, parent, side);
            current = self.root;
        }

        self.set_color(current, Color::Black);
    }

    fn color(&self, id: NodeId) -> Color {
        self.arena[id].color
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        debug_assert!(
            !id.is_nil() || color == Color::Black,
            "the sentinel must stay black"
        );
        self.arena[id].color = color;
    }

    /// Checks search order, parent links, length, and all four coloring rules from scratch.
    pub fn validate(&self) -> Result<(), InvariantViolation>
    where
        K: Ord,
    {
        let reachable = traversal::check_order(&self.arena, self.root)?;
        if reachable != self.len() {
            return Err(InvariantViolation::LengthMismatch {
                reported: self.len(),
                reachable,
            });
        }
        if self.color(NodeId::NIL) != Color::Black {
            return Err(InvariantViolation::RedSentinel);
        }
        if self.color(self.root) != Color::Black {
            return Err(InvariantViolation::RedRoot);
        }
        self.checked_black_height(self.root, 0).map(|_| ())
    }

    fn checked_black_height(&self, id: NodeId, depth: usize) -> Result<usize, InvariantViolation> {
        if id.is_nil() {
            return Ok(0);
        }
        let (left, right) = (self.arena.left(id), self.arena.right(id));
        let color = self.color(id);
        if color == Color::Red
            && (self.color(left) == Color::Red || self.color(right) == Color::Red)
        {
            return Err(InvariantViolation::RedChildOfRed { depth });
        }

        let left_height = self.checked_black_height(left, depth + 1)?;
        let right_height = self.checked_black_height(right, depth + 1)?;
        if left_height != right_height {
            return Err(InvariantViolation::BlackHeightMismatch {
                depth,
                left: left_height,
                right: right_height,
            });
        }
        Ok(left_height + usize::from(color == Color::Black))
    }
}

impl<K: Ord> SearchTree<K> for RedBlackTree<K> {
    fn insert(&mut self, key: K) {
        RedBlackTree::insert(self, key)
    }

    fn delete(&mut self, key: &K) {
        RedBlackTree::delete(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        RedBlackTree::contains(self, key)
    }

    fn len(&self) -> usize {
        RedBlackTree::len(self)
    }

    fn height(&self) -> usize {
        RedBlackTree::height(self)
    }

    fn keys(&self) -> Vec<&K> {
        self.iter().collect()
    }

    fn validate(&self) -> Result<(), InvariantViolation> {
        RedBlackTree::validate(self)
    }
}

impl<K: fmt::Debug> fmt::Debug for RedBlackTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> FromIterator<K> for RedBlackTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for RedBlackTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a RedBlackTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the keys of a [`RedBlackTree`], created by [`RedBlackTree::iter`].
pub struct Iter<'a, K> {
    inner: InOrder<'a, RbNode<K>>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|node| node.key())
    }
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
