//! Builder pattern for FeatureExtractionEngine

use crate::config::ExtractionConfig;
use crate::engine::FeatureExtractionEngine;
use crate::error::Result;
use crate::feature_sets::feature_set;
use morpho_runtime::{CollisionPolicy, FailurePolicy, FeatureEntry, FeatureRegistry};
use std::sync::Arc;
use tracing::debug;

/// Builder for FeatureExtractionEngine
///
/// # Example
///
/// ```rust,ignore
/// use morpho_sdk::{FailurePolicy, FeatureExtractionEngineBuilder};
///
/// let engine = FeatureExtractionEngineBuilder::new()
///     .with_feature_set("topology")
///     .required_marks(["RequiresSoma"])
///     .failure_policy(FailurePolicy::Continue)
///     .build()?;
///
/// let result = engine.extract(&data)?;
/// ```
pub struct FeatureExtractionEngineBuilder {
    config: ExtractionConfig,
    registry: Option<Arc<FeatureRegistry>>,
    extra_features: Vec<FeatureEntry>,
}

impl FeatureExtractionEngineBuilder {
    /// Create a new builder with the default configuration
    pub fn new() -> Self {
        Self::from_config(ExtractionConfig::default())
    }

    /// Start from a loaded configuration
    pub fn from_config(config: ExtractionConfig) -> Self {
        Self {
            config,
            registry: None,
            extra_features: Vec::new(),
        }
    }

    /// Run a built-in feature set
    pub fn with_feature_set(mut self, name: impl Into<String>) -> Self {
        self.config.feature_set = name.into();
        self
    }

    /// Run a caller-built registry instead of a built-in feature set
    pub fn with_registry(mut self, registry: Arc<FeatureRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Register additional features on top of the chosen registry
    pub fn add_features<I, E>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<FeatureEntry>,
    {
        self.extra_features.extend(entries.into_iter().map(Into::into));
        self
    }

    /// Restrict mark selection to the named marks
    pub fn only_marks<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.only_marks = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Abort extraction unless the named marks validate
    pub fn required_marks<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.required_marks = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    /// Collision handling for features added with `add_features`
    pub fn collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.config.collision_policy = policy;
        self
    }

    /// Resolve the configuration into an engine
    pub fn build(self) -> Result<FeatureExtractionEngine> {
        let base = match self.registry {
            Some(registry) => registry,
            None => feature_set(&self.config.feature_set)?,
        };
        let options = self.config.to_options()?;

        let registry = if self.extra_features.is_empty() {
            base
        } else {
            debug!(
                "Extending registry with {} additional entries",
                self.extra_features.len()
            );
            let mut extended = FeatureRegistry::clone(&base)
                .with_collision_policy(self.config.collision_policy);
            extended.register_features(self.extra_features)?;
            Arc::new(extended)
        };

        Ok(FeatureExtractionEngine::new(registry, options))
    }
}

impl Default for FeatureExtractionEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
