//! DOM Node Operations
//!
//! Errors raised by tree mutation: appendChild, removeChild, textContent.

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node not found
    #[error("Node not found")]
    NotFound,
    /// Hierarchy error (e.g., inserting an ancestor into its descendant)
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Invalid node type for the operation
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Node is not a child
    #[error("Node is not a child")]
    NotAChild,
}
