//! A height-balanced (AVL) search tree.
//!
//! Every node caches the height of its subtree, and after each insertion or deletion the
//! ancestors of the edited node are revisited bottom-up: heights are recomputed and any node
//! whose subtrees differ in height by more than one is fixed with a single or double rotation.
//! That keeps the height below roughly `1.44 * lg(n + 2)`.
//!
//! Nodes live in an arena and keep a parent link, so the fix-up walks the parent chain instead
//! of unwinding a recursion. The order in which nodes are visited, and the rotation chosen at
//! each one, is the same as in the textbook recursive formulation.
//!
//! # Examples
//!
//! ```
//! use balanced_bst::avl::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for key in [10, 5, 15, 3, 7, 12, 17] {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.inorder(), vec![&3, &5, &7, &10, &12, &15, &17]);
//!
//! tree.delete(&15);
//! assert!(!tree.contains(&15));
//! assert_eq!(tree.inorder(), vec![&3, &5, &7, &10, &12, &17]);
//!
//! // Deleting a key that isn't there changes nothing.
//! tree.delete(&42);
//! assert_eq!(tree.len(), 6);
//! assert!(tree.validate().is_ok());
//! ```

use std::fmt;

use crate::arena::{Arena, Direction, Links, Node, NodeId};
use crate::rotation::rotate;
use crate::traversal::{self, InOrder};
use crate::{InvariantViolation, SearchTree};

#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub(crate) struct AvlNode<K> {
    key: Option<K>,
    /// How many levels are in the subtree rooted at this node. A node with no children has a
    /// height of 1 and the sentinel has a height of 0.
    height: usize,
    links: Links,
}

impl<K> AvlNode<K> {
    fn sentinel() -> Self {
        Self {
            key: None,
            height: 0,
            links: Links::DETACHED,
        }
    }

    fn leaf(key: K, parent: NodeId) -> Self {
        Self {
            key: Some(key),
            height: 1,
            links: Links::leaf(parent),
        }
    }
}

impl<K> Node for AvlNode<K> {
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

    fn refresh(arena: &mut Arena<Self>, id: NodeId) {
        let left = arena[arena.left(id)].height;
        let right = arena[arena.right(id)].height;
        arena[id].height = left.max(right) + 1;
    }
}

/// `height(left) - height(right)` for the node at `id`.
fn balance_factor<K>(arena: &Arena<AvlNode<K>>, id: NodeId) -> isize {
    let left = arena[arena.left(id)].height;
    let right = arena[arena.right(id)].height;
    left as isize - right as isize
}

/// A self-balancing Binary Search Tree using height balance (an AVL tree).
///
/// Keys must have a total order that stays consistent for as long as they are in the tree.
/// Equal keys are all kept: a key equal to an existing one is placed in that node's right
/// subtree.
#[derive(Clone)]
pub struct AvlTree<K> {
    arena: Arena<AvlNode<K>>,
    root: NodeId,
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> AvlTree<K> {
    /// Generates a new, empty `AvlTree`.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(AvlNode::sentinel()),
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

    /// Number of nodes on the longest path from the root to a leaf. Read from the root's cached
    /// height, so this is `O(1)`.
    pub fn height(&self) -> usize {
        self.arena[self.root].height
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

    /// Collects the keys in ascending order.
    pub fn inorder(&self) -> Vec<&K> {
        self.iter().collect()
    }

    /// Returns `true` if a key equal to `key` is in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::AvlTree;
    ///
    /// let tree: AvlTree<_> = [10, 5, 15].into_iter().collect();
    ///
    /// assert!(tree.contains(&5));
    /// assert!(!tree.contains(&42));
    /// ```
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        !self.arena.find(self.root, key).is_nil()
    }

    /// Inserts `key`. Equal keys are kept side by side, so this always adds a node.
    ///
    /// # Examples
    ///
    /// ```
    /// use balanced_bst::avl::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1);
    /// tree.insert(1);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.inorder(), vec![&1, &1]);
    /// ```
    pub fn insert(&mut self, key: K)
    where
        K: Ord,
    {
        let (parent, direction) = self.arena.insertion_point(self.root, &key);
        let inserted = self.arena.alloc(AvlNode::leaf(key, parent));
        if parent.is_nil() {
            self.root = inserted;
            return;
        }
        self.arena.set_child(parent, direction, inserted);

        // Which grandchild got taller is read off the inserted key: it went down the same side
        // of the heavy child that its key falls on.
        let mut current = parent;
        while !current.is_nil() {
            let subtree = self.rebalance(current, |arena, child, _| {
                if arena.key(inserted) < arena.key(child) {
                    Direction::Left
                } else {
                    Direction::Right
                }
            });
            current = self.arena.parent(subtree);
        }
    }

    /// Deletes one node holding a key equal to `key`, if there is one. Deleting a missing key is
    /// a no-op.
    ///
    /// A node with two children is not unlinked itself: it takes over its in-order successor's
    /// key and the successor's node is removed instead.
    pub fn delete(&mut self, key: &K)
    where
        K: Ord,
    {
        let target = self.arena.find(self.root, key);
        if target.is_nil() {
            return;
        }

        let (left, right) = (self.arena.left(target), self.arena.right(target));
        let spliced = if !left.is_nil() && !right.is_nil() {
            let successor = self.arena.minimum(right);
            self.arena.swap_keys(target, successor);
            successor
        } else {
            target
        };

        // `spliced` has at most one child, which takes its place.
        let child = match self.arena.left(spliced) {
            left if left.is_nil() => self.arena.right(spliced),
            left => left,
        };
        let parent = self.arena.parent(spliced);
        self.arena.replace_child(&mut self.root, spliced, child);
        if !child.is_nil() {
            self.arena.set_parent(child, parent);
        }
        self.arena.release(spliced);

        // The deleted key is gone, so which grandchild is taller is read off the heavy child's
        // own balance. A level child takes the single rotation.
        let mut current = parent;
        while !current.is_nil() {
            let subtree = self.rebalance(current, |arena, child, heavy| {
                match balance_factor(arena, child) {
                    factor if factor > 0 => Direction::Left,
                    factor if factor < 0 => Direction::Right,
                    _ => heavy,
                }
            });
            current = self.arena.parent(subtree);
        }
    }

    /// Refreshes the height of `id` and, if its subtrees now differ in height by two, rotates it
    /// back into balance. Returns whichever node roots the subtree afterwards.
    ///
    /// `lean` is told the heavy child and the heavy side, and answers which of the heavy child's
    /// subtrees is the taller one. If that's the inner one this is a double rotation.
    ///
    /// See <https://en.wikipedia.org/wiki/AVL_tree#Rebalancing> for terminology.
    fn rebalance<F>(&mut self, id: NodeId, lean: F) -> NodeId
    where
        F: Fn(&Arena<AvlNode<K>>, NodeId, Direction) -> Direction,
    {
        AvlNode::refresh(&mut self.arena, id);

        let heavy = match balance_factor(&self.arena, id) {
            factor if factor > 1 => Direction::Left,
            factor if factor < -1 => Direction::Right,
            _ => return id,
        };
        let child = self.arena.child(id, heavy);
        if lean(&self.arena, child, heavy) != heavy {
            rotate(&mut self.arena, &mut self.root, child, heavy);
        }
        let subtree = rotate(&mut self.arena, &mut self.root, id, heavy.opposite());

        if cfg!(debug_assertions) {
            let factor = balance_factor(&self.arena, subtree);
            assert!(factor.abs() <= 1, "rotation left a balance factor of {}", factor);
        }
        subtree
    }

    /// Recomputes every height from scratch and checks it against the cached one, then checks
    /// the balance bound, the search order, the parent links and the length.
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
        self.checked_height(self.root, 0).map(|_| ())
    }

    fn checked_height(&self, id: NodeId, depth: usize) -> Result<usize, InvariantViolation> {
        if id.is_nil() {
            return Ok(0);
        }
        let left = self.checked_height(self.arena.left(id), depth + 1)?;
        let right = self.checked_height(self.arena.right(id), depth + 1)?;
        let actual = left.max(right) + 1;

        let stored = self.arena[id].height;
        if stored != actual {
            return Err(InvariantViolation::StaleHeight {
                depth,
                stored,
                actual,
            });
        }
        let difference = left.abs_diff(right);
        if difference > 1 {
            return Err(InvariantViolation::Unbalanced { depth, difference });
        }
        Ok(actual)
    }
}

impl<K: Ord> SearchTree<K> for AvlTree<K> {
    fn insert(&mut self, key: K) {
        AvlTree::insert(self, key)
    }

    fn delete(&mut self, key: &K) {
        AvlTree::delete(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        AvlTree::contains(self, key)
    }

    fn len(&self) -> usize {
        AvlTree::len(self)
    }

    fn height(&self) -> usize {
        AvlTree::height(self)
    }

    fn keys(&self) -> Vec<&K> {
        self.inorder()
    }

    fn validate(&self) -> Result<(), InvariantViolation> {
        AvlTree::validate(self)
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the keys of an [`AvlTree`], created by [`AvlTree::iter`].
pub struct Iter<'a, K> {
    inner: InOrder<'a, AvlNode<K>>,
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
