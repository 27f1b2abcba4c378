//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Feature set identifier not known
    #[error("Unknown feature set '{name}'. Known feature sets: {}", known.join(", "))]
    UnknownFeatureSet { name: String, known: Vec<String> },

    /// Runtime error (missing marks, feature failure, ...)
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] morpho_runtime::RuntimeError),

    /// Morphology error
    #[error("Morphology error: {0}")]
    CoreError(#[from] morpho_core::CoreError),

    /// YAML error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
