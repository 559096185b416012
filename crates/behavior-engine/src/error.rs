//! Structural errors.
//!
//! `Failure` is an ordinary tick outcome and never shows up here. These
//! errors describe a tree that was wired incorrectly; they are reported at the
//! call site that caused them.

use crate::NodeId;

/// Errors raised while building, editing or ticking a [`BehaviorTree`](crate::BehaviorTree).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The handle does not refer to a live node of this tree.
    #[error("node {0} does not exist")]
    NodeNotFound(NodeId),

    /// Leaves cannot own children.
    #[error("leaf {0} cannot have children")]
    LeafHasNoChildren(NodeId),

    /// A decorator already owns a child; it is never silently replaced.
    #[error("decorator {decorator} already owns child {child}")]
    DecoratorOccupied { decorator: NodeId, child: NodeId },

    /// A decorator was ticked before it received a child.
    #[error("decorator {0} has no child")]
    DecoratorEmpty(NodeId),

    /// Moving `node` under `parent` would make the node its own ancestor.
    #[error("moving {node} under {parent} would create a cycle")]
    CycleDetected { node: NodeId, parent: NodeId },

    /// The root can be neither removed nor moved.
    #[error("root {0} cannot be removed or moved")]
    RootImmovable(NodeId),

    /// A node was reached again while its own tick was still in progress.
    #[error("node {0} was ticked re-entrantly")]
    Reentrant(NodeId),
}

impl TreeError {
    /// Returns a static string identifier for this error variant.
    pub fn error_code(&self) -> &'static str {
        use TreeError::*;
        match self {
            NodeNotFound(_) => "TREE_NODE_NOT_FOUND",
            LeafHasNoChildren(_) => "TREE_LEAF_HAS_NO_CHILDREN",
            DecoratorOccupied { .. } => "TREE_DECORATOR_OCCUPIED",
            DecoratorEmpty(_) => "TREE_DECORATOR_EMPTY",
            CycleDetected { .. } => "TREE_CYCLE_DETECTED",
            RootImmovable(_) => "TREE_ROOT_IMMOVABLE",
            Reentrant(_) => "TREE_REENTRANT_TICK",
        }
    }
}
