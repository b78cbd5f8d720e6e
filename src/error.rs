//! The report produced by `validate` when a tree breaks one of its invariants.

use thiserror::Error;

/// A broken structural invariant, found by recomputing it from scratch.
///
/// Trees built only through this crate's public API never produce one of these; they exist so
/// tests (and suspicious callers) can check that claim. Depths count from 0 at the root.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    /// The in-order walk produced a key smaller than the one before it.
    #[error("in-order key at position {position} is smaller than its predecessor")]
    OutOfOrder {
        /// Zero-based index of the offending key in the in-order sequence.
        position: usize,
    },
    /// The cached element count disagrees with the number of reachable nodes.
    #[error("tree reports {reported} keys but {reachable} are reachable from the root")]
    LengthMismatch {
        /// What `len()` returns.
        reported: usize,
        /// What a full walk finds.
        reachable: usize,
    },
    /// A child does not point back at the node that links to it.
    #[error("node at depth {depth} does not point back at its parent")]
    BrokenParentLink {
        /// Depth of the child with the wrong back-reference.
        depth: usize,
    },
    /// An AVL node's cached height is not one more than its taller child's.
    #[error("node at depth {depth} caches height {stored} but its children imply {actual}")]
    StaleHeight {
        /// Depth of the node.
        depth: usize,
        /// The cached height.
        stored: usize,
        /// The height recomputed from the subtree.
        actual: usize,
    },
    /// An AVL node's subtrees differ in height by more than one.
    #[error("subtrees of node at depth {depth} differ in height by {difference}")]
    Unbalanced {
        /// Depth of the node.
        depth: usize,
        /// Absolute height difference between its subtrees.
        difference: usize,
    },
    /// A Red-Black root is red.
    #[error("root is red")]
    RedRoot,
    /// The Red-Black sentinel is red.
    #[error("sentinel is red")]
    RedSentinel,
    /// A red Red-Black node has a red child.
    #[error("red node at depth {depth} has a red child")]
    RedChildOfRed {
        /// Depth of the parent.
        depth: usize,
    },
    /// Two paths below a Red-Black node pass through different numbers of black nodes.
    #[error("black heights below node at depth {depth} differ: {left} on the left, {right} on the right")]
    BlackHeightMismatch {
        /// Depth of the node.
        depth: usize,
        /// Black height of its left subtree.
        left: usize,
        /// Black height of its right subtree.
        right: usize,
    },
}
