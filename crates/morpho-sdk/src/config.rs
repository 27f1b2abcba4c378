//! Extraction configuration

use crate::error::{Result, SdkError};
use crate::feature_sets::DEFAULT_FEATURE_SET;
use morpho_runtime::mark::catalog;
use morpho_runtime::{CollisionPolicy, ExtractionOptions, FailurePolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration of one extraction run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExtractionConfig {
    /// Built-in feature set to run
    #[serde(default = "default_feature_set")]
    pub feature_set: String,

    /// Restrict selection to these marks (all candidates when absent)
    #[serde(default)]
    pub only_marks: Option<Vec<String>>,

    /// Marks the dataset must satisfy, otherwise the run aborts
    #[serde(default)]
    pub required_marks: Vec<String>,

    /// What to do when a feature body fails
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// What to do when a feature name is registered twice
    #[serde(default)]
    pub collision_policy: CollisionPolicy,

    /// Level for the MORPHO crates; pass to `logging::init_tracing`
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_feature_set() -> String {
    DEFAULT_FEATURE_SET.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            feature_set: default_feature_set(),
            only_marks: None,
            required_marks: Vec::new(),
            failure_policy: FailurePolicy::default(),
            collision_policy: CollisionPolicy::default(),
            log_level: default_log_level(),
        }
    }
}

impl ExtractionConfig {
    /// Load from `config/morpho.{yaml,toml,json}` and `MORPHO_*` environment
    /// variables, falling back to defaults when neither is present.
    pub fn load() -> Result<Self> {
        // Load .env file if exists
        dotenvy::dotenv().ok();
        Self::load_in(".")
    }

    /// Same as `load`, resolving `config/morpho.*` under `base_dir`.
    ///
    /// A missing file is not an error; a file that exists but cannot be
    /// parsed is.
    pub fn load_in(base_dir: impl AsRef<Path>) -> Result<Self> {
        let stem = base_dir.as_ref().join("config").join("morpho");

        let cfg = config::Config::builder()
            .add_source(config::File::from(stem.as_path()).required(false))
            .add_source(Self::environment())
            .build()
            .map_err(|e| SdkError::ConfigError(format!("Failed to load config: {}", e)))?;

        cfg.try_deserialize()
            .map_err(|e| SdkError::ConfigError(format!("Failed to deserialize config: {}", e)))
    }

    /// Load from an explicit file, still honoring `MORPHO_*` overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SdkError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(Self::environment())
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| SdkError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    /// Parse YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("MORPHO")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("only_marks")
            .with_list_parse_key("required_marks")
    }

    /// Resolve mark names against the catalog into run options
    pub fn to_options(&self) -> Result<ExtractionOptions> {
        let mut options = ExtractionOptions::new()
            .with_required_marks(catalog::resolve(&self.required_marks)?)
            .with_failure_policy(self.failure_policy);
        if let Some(only) = &self.only_marks {
            options = options.with_only_marks(catalog::resolve(only)?);
        }
        Ok(options)
    }
}
