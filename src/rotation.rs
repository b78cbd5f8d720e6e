//! The single rotation both balancing trees are built on.

use crate::arena::{Arena, Direction, Node, NodeId};

/// Rotates the subtree rooted at `x` in `direction` and returns the node that took its place.
///
/// A left rotation lifts `x.right`, a right rotation lifts `x.left`; the lifted node must exist.
/// The inner grandchild changes sides, the lifted node takes over `x`'s slot in its parent (or
/// becomes `root`), and the metadata of `x` and then the lifted node is refreshed. In-order key
/// sequence is unchanged.
///
/// # Diagram
///
/// Rotating `x` to the left:
///
/// ```text
///    parent                 parent
///      |                      |
///      x                      y
///     / \     rotate ->      / \
///    a   y                  x   c
///       / \                / \
///      b   c              a   b
/// ```
pub(crate) fn rotate<N: Node>(
    arena: &mut Arena<N>,
    root: &mut NodeId,
    x: NodeId,
    direction: Direction,
) -> NodeId {
    let rising = direction.opposite();
    let y = arena.child(x, rising);
    debug_assert!(!y.is_nil(), "rotation needs the child that rises");

    let inner = arena.child(y, direction);
    arena.set_child(x, rising, inner);
    if !inner.is_nil() {
        arena.set_parent(inner, x);
    }

    let parent = arena.parent(x);
    arena.set_parent(y, parent);
    arena.replace_child(root, x, y);

    arena.set_child(y, direction, x);
    arena.set_parent(x, y);

    N::refresh(arena, x);
    N::refresh(arena, y);
    y
}
