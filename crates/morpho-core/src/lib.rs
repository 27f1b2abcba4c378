//! MORPHO Core - Core types for the MORPHO feature extraction engine
//!
//! This crate provides the fundamental types used across the MORPHO workspace:
//! - Value types for feature results
//! - Insertion-ordered named maps
//! - The read-only reconstruction tree contract (nodes, compartments, traversal)
//! - Error types

pub mod error;
pub mod morphology;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, Result};
pub use morphology::{Compartment, Morphology, Node, NodeId, NodeType};
pub use types::{NamedMap, Value};
