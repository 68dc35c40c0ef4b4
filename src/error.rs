//! Error type for fallible tree, handler, and style-table operations.
//!
//! Only capacity and structural failures are errors. Setters, detach, destroy,
//! layout, and dispatch are no-ops on stale handles and never fail.

use crate::dom::NodeId;

/// Errors returned by fallible engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UiError {
    /// The fixed node pool has no free slot.
    #[error("node pool exhausted ({capacity} slots)")]
    PoolExhausted { capacity: usize },

    /// A handle refers to a node that does not exist (never created or destroyed).
    #[error("node {0:?} does not exist")]
    MissingNode(NodeId),

    /// The child already belongs to another parent.
    #[error("node {0:?} already has a parent")]
    AlreadyParented(NodeId),

    /// A node cannot be attached to itself.
    #[error("node {0:?} cannot be attached to itself")]
    SelfAttach(NodeId),

    /// The child is an ancestor of the parent.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },

    /// The parent reached the per-node child ceiling of the fixed pool.
    #[error("node {parent:?} cannot hold more than {limit} children")]
    ChildLimit { parent: NodeId, limit: usize },

    /// The generic handler array of a node is full.
    #[error("node {node:?} already has {limit} handlers")]
    HandlerLimit { node: NodeId, limit: usize },

    /// The style rule table is full.
    #[error("style table is full ({limit} rules)")]
    StyleTableFull { limit: usize },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, UiError>;

// ===========================================================================
// Tests
// ===========================================================================
