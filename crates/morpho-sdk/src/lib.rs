//! MORPHO SDK
//!
//! High-level API for extracting morphology features: named feature sets,
//! configuration loading, logging setup, and an engine that resolves a
//! configuration into a ready-to-run extraction.

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod feature_sets;
pub mod logging;

// Re-export main types
pub use builder::FeatureExtractionEngineBuilder;
pub use config::ExtractionConfig;
pub use engine::FeatureExtractionEngine;
pub use error::{Result, SdkError};
pub use feature_sets::{feature_set, known_feature_sets};

// Re-export commonly used types from dependencies
pub use morpho_core::{Morphology, Node, NodeType, Value};
pub use morpho_runtime::{Data, ExtractionResult, FailurePolicy, FeatureRegistry};
