//! Shared value types
//!
//! This module contains:
//! - `Value`, the result type of every feature
//! - `NamedMap`, the insertion-ordered name-keyed map used for feature
//!   libraries and result tables

pub mod named_map;
pub mod value;

pub use named_map::NamedMap;
pub use value::Value;
