//! Extraction module
//!
//! The per-dataset run that selects marks, selects features, and executes them.

pub mod result;
pub mod run;

pub use result::{ExtractionResult, FeatureFailure};
pub use run::{run_feature_extraction, ExtractionOptions, ExtractionRun, FailurePolicy, RunState};
