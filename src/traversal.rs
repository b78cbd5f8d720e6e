//! In-order walk over an arena-backed tree.

use crate::arena::{Arena, Node, NodeId};

/// Visits the nodes of a subtree in ascending key order without recursion: it keeps the path of
/// left turns that still has to be unwound on an explicit stack.
pub(crate) struct InOrder<'a, N> {
    arena: &'a Arena<N>,
    current: NodeId,
    stack: Vec<NodeId>,
}

impl<'a, N: Node> InOrder<'a, N> {
    pub(crate) fn new(arena: &'a Arena<N>, root: NodeId) -> Self {
        Self {
            arena,
            current: root,
            stack: Vec::new(),
        }
    }
}

impl<'a, N: Node> Iterator for InOrder<'a, N> {
    type Item = &'a N;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.current.is_nil() {
            self.stack.push(self.current);
            self.current = self.arena.left(self.current);
        }

        let node = self.stack.pop()?;
        self.current = self.arena.right(node);
        Some(&self.arena[node])
    }
}

impl<N> Clone for InOrder<'_, N> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            current: self.current,
            stack: self.stack.clone(),
        }
    }
}

/// Number of nodes on the longest path from `root` down to a sentinel.
pub(crate) fn height<N: Node>(arena: &Arena<N>, root: NodeId) -> usize {
    // Level-order walk keeps this iterative for the degenerate trees tests like to build.
    let mut level = if root.is_nil() { Vec::new() } else { vec![root] };
    let mut height = 0;
    while !level.is_empty() {
        height += 1;
        level = level
            .into_iter()
            .flat_map(|id| [arena.left(id), arena.right(id)])
            .filter(|id| !id.is_nil())
            .collect();
    }
    height
}

/// Checks that the in-order walk from `root` is non-decreasing and that every reachable child
/// points back at its parent. Returns the number of reachable nodes.
pub(crate) fn check_order<N>(
    arena: &Arena<N>,
    root: NodeId,
) -> Result<usize, crate::InvariantViolation>
where
    N: Node,
    N::Key: Ord,
{
    if !root.is_nil() && !arena.parent(root).is_nil() {
        return Err(crate::InvariantViolation::BrokenParentLink { depth: 0 });
    }

    let mut stack = vec![(root, 0)];
    while let Some((id, depth)) = stack.pop() {
        for child in [arena.left(id), arena.right(id)] {
            if child.is_nil() {
                continue;
            }
            if arena.parent(child) != id {
                return Err(crate::InvariantViolation::BrokenParentLink { depth: depth + 1 });
            }
            stack.push((child, depth + 1));
        }
    }

    let mut count = 0;
    let mut previous: Option<&N::Key> = None;
    for node in InOrder::new(arena, root) {
        let key = node.key();
        if previous.is_some() && key < previous {
            return Err(crate::InvariantViolation::OutOfOrder { position: count });
        }
        previous = key;
        count += 1;
    }
    Ok(count)
}
