//! Runtime error types

use crate::extraction::RunState;
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// One or more required marks did not validate (or were excluded)
    #[error("Missing required marks: {}", missing.join(", "))]
    MissingRequiredMarks { missing: Vec<String> },

    /// Mark name not present in the catalog
    #[error("Unknown mark '{name}'. Known marks: {}", known.join(", "))]
    UnknownMark { name: String, known: Vec<String> },

    /// A feature body returned an error
    #[error("Feature '{name}' failed: {source}")]
    FeatureFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    /// Feature name already registered (only under `CollisionPolicy::Reject`)
    #[error("Duplicate feature: {0}")]
    DuplicateFeature(String),

    /// Extraction run step called out of order
    #[error("Invalid run state: expected {expected:?}, found {actual:?}")]
    InvalidState { expected: RunState, actual: RunState },

    /// Bound feature parameter has an unexpected shape
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter { name: String, message: String },

    /// Error from the morphology layer
    #[error("Morphology error: {0}")]
    Core(#[from] morpho_core::CoreError),
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_required_marks_message() {
        let error = RuntimeError::MissingRequiredMarks {
            missing: vec!["RequiresApical".to_string(), "RequiresSoma".to_string()],
        };
        assert_eq!(
            error.to_string(),
            "Missing required marks: RequiresApical, RequiresSoma"
        );
    }

    #[test]
    fn test_unknown_mark_lists_known_names() {
        let error = RuntimeError::UnknownMark {
            name: "RequiresGlia".to_string(),
            known: vec!["RequiresAxon".to_string(), "RequiresSoma".to_string()],
        };
        let message = error.to_string();
        assert!(message.contains("RequiresGlia"));
        assert!(message.contains("RequiresAxon, RequiresSoma"));
    }

    #[test]
    fn test_feature_failed_keeps_source() {
        let error = RuntimeError::FeatureFailed {
            name: "axon.total_length".to_string(),
            source: anyhow::anyhow!("no compartments"),
        };
        assert!(error.to_string().contains("axon.total_length"));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_core_error_conversion() {
        let error: RuntimeError = morpho_core::CoreError::DuplicateNode(4).into();
        assert!(error.to_string().contains("Duplicate node id: 4"));
    }
}
