//! DOM Node Operations
//!
//! Errors raised by tree mutation: appendChild, removeChild, setAttribute.

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found: {0:?}")]
    NotFound(NodeId),

    /// Inserting a node under itself or one of its descendants
    #[error("Hierarchy request error: {child:?} cannot be inserted under {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },

    /// Operation needs an element but got another node kind
    #[error("Invalid node type for {0:?}: expected element")]
    InvalidNodeType(NodeId),

    /// Node is not a child of the given parent
    #[error("{child:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, child: NodeId },
}
