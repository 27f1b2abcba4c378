//! Reconstruction tree module
//!
//! Provides the minimal read-only tree contract the extraction engine needs:
//! root lookup, type-filtered node listing, parent/child navigation,
//! breadth-first traversal, and point geometry.

pub mod node;
pub mod tree;

pub use node::{Node, NodeId, NodeType};
pub use tree::{Compartment, Morphology};
