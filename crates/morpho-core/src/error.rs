//! Error types for MORPHO Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Two nodes share an identifier
    #[error("Duplicate node id: {0}")]
    DuplicateNode(u64),

    /// A node references a parent that is not part of the tree
    #[error("Node {node} references missing parent {parent}")]
    MissingParent { node: u64, parent: u64 },

    /// Following parent links from a node never reaches a root
    #[error("Cycle detected through node {0}")]
    Cycle(u64),

    /// Node type code outside the supported enumeration
    #[error("Invalid node type code: {0}")]
    InvalidNodeType(i64),

    /// Lookup of a node that is not in the tree
    #[error("Node not found: {0}")]
    NodeNotFound(u64),

    #[error("Type error: {0}")]
    TypeError(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
