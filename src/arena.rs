//! Index-addressed node storage shared by the AVL and Red-Black trees.
//!
//! Nodes live in a `Vec` and refer to each other by [`NodeId`]. Slot 0 is reserved for the
//! sentinel: it never carries a key, stands in for every absent child, and is the parent of the
//! root. Comparing against [`NodeId::NIL`] replaces null checks.

use std::ops::{Index, IndexMut};

/// A stable handle to a slot of an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

impl NodeId {
    /// The reserved sentinel slot.
    pub(crate) const NIL: NodeId = NodeId(0);

    pub(crate) fn is_nil(self) -> bool {
        self == Self::NIL
    }
}

/// Which child of a node we are talking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Left,
    Right,
}

impl Direction {
    pub(crate) fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// The structural links of a node. The parent of the root, and every absent child, is
/// [`NodeId::NIL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Links {
    pub(crate) parent: NodeId,
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
}

impl Links {
    pub(crate) const DETACHED: Links = Links {
        parent: NodeId::NIL,
        left: NodeId::NIL,
        right: NodeId::NIL,
    };

    /// Links for a fresh leaf hanging below `parent`.
    pub(crate) fn leaf(parent: NodeId) -> Self {
        Self {
            parent,
            ..Self::DETACHED
        }
    }
}

impl Index<Direction> for Links {
    type Output = NodeId;

    fn index(&self, direction: Direction) -> &NodeId {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}

impl IndexMut<Direction> for Links {
    fn index_mut(&mut self, direction: Direction) -> &mut NodeId {
        match direction {
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

/// A node that can be stored in an [`Arena`].
pub(crate) trait Node: Sized {
    type Key;

    fn links(&self) -> &Links;

    fn links_mut(&mut self) -> &mut Links;

    /// The stored key. `None` for the sentinel and for vacated slots.
    fn key(&self) -> Option<&Self::Key>;

    fn key_slot_mut(&mut self) -> &mut Option<Self::Key>;

    /// Recomputes the balancing metadata of `id` from its children. Rotations call this on the
    /// node that went down, then on the node that came up.
    fn refresh(_arena: &mut Arena<Self>, _id: NodeId) {}
}

/// Node storage with a reserved sentinel slot and a free list of vacated slots.
#[derive(Debug, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub(crate) struct Arena<N> {
    nodes: Vec<N>,
    vacant: Vec<NodeId>,
}

impl<N: Node> Arena<N> {
    /// Creates an arena holding only `sentinel`, at [`NodeId::NIL`].
    pub(crate) fn new(sentinel: N) -> Self {
        Self {
            nodes: vec![sentinel],
            vacant: Vec::new(),
        }
    }

    /// Stores `node`, reusing a vacated slot when one is available.
    pub(crate) fn alloc(&mut self, node: N) -> NodeId {
        match self.vacant.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    /// Vacates `id`, handing back its key. The sentinel is never released.
    pub(crate) fn release(&mut self, id: NodeId) -> Option<N::Key> {
        if id.is_nil() {
            return None;
        }
        let node = &mut self.nodes[id.0];
        *node.links_mut() = Links::DETACHED;
        let key = node.key_slot_mut().take();
        self.vacant.push(id);
        key
    }

    /// Exchanges the keys of two distinct nodes. Links and metadata stay where they are.
    pub(crate) fn swap_keys(&mut self, a: NodeId, b: NodeId) {
        debug_assert_ne!(a, b);
        let (low, high) = if a.0 < b.0 { (a.0, b.0) } else { (b.0, a.0) };
        let (head, tail) = self.nodes.split_at_mut(high);
        std::mem::swap(head[low].key_slot_mut(), tail[0].key_slot_mut());
    }

    /// Drops every node except the sentinel.
    pub(crate) fn clear(&mut self) {
        self.nodes.truncate(1);
        self.vacant.clear();
    }

    /// Number of live, keyed nodes.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len() - 1 - self.vacant.len()
    }

    pub(crate) fn key(&self, id: NodeId) -> Option<&N::Key> {
        self.nodes[id.0].key()
    }

    pub(crate) fn parent(&self, id: NodeId) -> NodeId {
        self.nodes[id.0].links().parent
    }

    pub(crate) fn left(&self, id: NodeId) -> NodeId {
        self.nodes[id.0].links().left
    }

    pub(crate) fn right(&self, id: NodeId) -> NodeId {
        self.nodes[id.0].links().right
    }

    pub(crate) fn child(&self, id: NodeId, direction: Direction) -> NodeId {
        self.nodes[id.0].links()[direction]
    }

    pub(crate) fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        self.nodes[id.0].links_mut().parent = parent;
    }

    pub(crate) fn set_child(&mut self, id: NodeId, direction: Direction, child: NodeId) {
        self.nodes[id.0].links_mut()[direction] = child;
    }

    /// The side of `parent` that `child` hangs from.
    pub(crate) fn direction_of(&self, parent: NodeId, child: NodeId) -> Direction {
        if self.left(parent) == child {
            Direction::Left
        } else {
            Direction::Right
        }
    }

    /// Points whatever referenced `old` (its parent's child slot, or `root`) at `new`. The
    /// parent link of `new` is left alone.
    pub(crate) fn replace_child(&mut self, root: &mut NodeId, old: NodeId, new: NodeId) {
        let parent = self.parent(old);
        if parent.is_nil() {
            *root = new;
        } else {
            let direction = self.direction_of(parent, old);
            self.set_child(parent, direction, new);
        }
    }

    /// Leftmost node of the subtree rooted at `id`.
    pub(crate) fn minimum(&self, mut id: NodeId) -> NodeId {
        while !self.left(id).is_nil() {
            id = self.left(id);
        }
        id
    }

    /// Walks down from `root` and returns the first node whose key equals `key`, or
    /// [`NodeId::NIL`].
    pub(crate) fn find(&self, root: NodeId, key: &N::Key) -> NodeId
    where
        N::Key: Ord,
    {
        let mut current = root;
        while let Some(current_key) = self.key(current) {
            current = match key.cmp(current_key) {
                std::cmp::Ordering::Less => self.left(current),
                std::cmp::Ordering::Equal => return current,
                std::cmp::Ordering::Greater => self.right(current),
            };
        }
        NodeId::NIL
    }

    /// Finds where `key` would be attached: the last real node on its descent and the side it
    /// falls on. Equal keys go right.
    pub(crate) fn insertion_point(&self, root: NodeId, key: &N::Key) -> (NodeId, Direction)
    where
        N::Key: Ord,
    {
        let mut parent = NodeId::NIL;
        let mut direction = Direction::Left;
        let mut current = root;
        while let Some(current_key) = self.key(current) {
            parent = current;
            direction = if key < current_key {
                Direction::Left
            } else {
                Direction::Right
            };
            current = self.child(current, direction);
        }
        (parent, direction)
    }
}

impl<N> Index<NodeId> for Arena<N> {
    type Output = N;

    fn index(&self, id: NodeId) -> &N {
        &self.nodes[id.0]
    }
}

impl<N> IndexMut<NodeId> for Arena<N> {
    fn index_mut(&mut self, id: NodeId) -> &mut N {
        &mut self.nodes[id.0]
    }
}
