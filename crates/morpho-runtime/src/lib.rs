//! MORPHO Runtime - Feature extraction engine
//!
//! This crate turns a library of capability-gated features into per-dataset
//! result tables:
//! - `mark`: capability predicates and the name -> mark catalog
//! - `feature`: marked features and combinatorial specialization
//! - `registry`: the process-wide feature library
//! - `extraction`: the per-dataset select-marks / select-features / extract run

pub mod data;
pub mod error;
pub mod extraction;
pub mod feature;
pub mod mark;
pub mod registry;

// Re-export main types
pub use data::Data;
pub use error::{Result, RuntimeError};
pub use extraction::{
    run_feature_extraction, ExtractionOptions, ExtractionResult, ExtractionRun, FailurePolicy,
    FeatureFailure, RunState,
};
pub use feature::{
    nested_specialize, specialize, specialization, Feature, FeatureMap, FeatureParams,
    MarkedFeature, RawFeature, Specialization, SpecializationSet,
};
pub use mark::{Mark, MarkSet};
pub use registry::{CollisionPolicy, FeatureEntry, FeatureRegistry};
