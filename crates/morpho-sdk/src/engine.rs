//! Feature extraction engine

use crate::builder::FeatureExtractionEngineBuilder;
use crate::config::ExtractionConfig;
use crate::error::Result;
use morpho_core::{Morphology, Node};
use morpho_runtime::{
    run_feature_extraction, Data, ExtractionOptions, ExtractionResult, FeatureRegistry,
};
use std::sync::Arc;
use tracing::info;

/// A resolved registry plus run options, reusable across datasets.
///
/// The registry is shared read-only, so one engine can serve many threads.
#[derive(Debug, Clone)]
pub struct FeatureExtractionEngine {
    registry: Arc<FeatureRegistry>,
    options: ExtractionOptions,
}

impl FeatureExtractionEngine {
    pub fn new(registry: Arc<FeatureRegistry>, options: ExtractionOptions) -> Self {
        Self { registry, options }
    }

    /// Build an engine from a configuration
    pub fn from_config(config: ExtractionConfig) -> Result<Self> {
        FeatureExtractionEngineBuilder::from_config(config).build()
    }

    pub fn registry(&self) -> &Arc<FeatureRegistry> {
        &self.registry
    }

    pub fn options(&self) -> &ExtractionOptions {
        &self.options
    }

    /// Run every applicable feature on one dataset
    pub fn extract(&self, data: &Data) -> Result<ExtractionResult> {
        Ok(run_feature_extraction(data, &self.registry, &self.options)?)
    }

    /// Validate raw nodes into a morphology and extract without auxiliary values
    pub fn extract_nodes(&self, nodes: Vec<Node>) -> Result<ExtractionResult> {
        let morphology = Morphology::new(nodes)?;
        self.extract(&Data::new(Arc::new(morphology)))
    }

    /// Extract each dataset independently; one failure does not stop the rest
    pub fn extract_all<'a, I>(&self, datasets: I) -> Vec<Result<ExtractionResult>>
    where
        I: IntoIterator<Item = &'a Data>,
    {
        let results: Vec<_> = datasets.into_iter().map(|data| self.extract(data)).collect();
        info!(
            "Extracted {} datasets ({} failed)",
            results.len(),
            results.iter().filter(|r| r.is_err()).count()
        );
        results
    }
}
