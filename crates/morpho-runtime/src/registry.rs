//! Feature Registry Module
//!
//! Collects the features available to extraction runs and the universe of
//! marks they reference. A registry is built once and is read-only afterwards;
//! it is `Send + Sync` and can be shared between concurrent runs.

use crate::error::{Result, RuntimeError};
use crate::feature::{Feature, FeatureMap, MarkedFeature, RawFeature};
use crate::mark::{Mark, MarkSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// What happens when a feature name is registered twice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Replace the earlier feature (keeping its position) and log a warning
    #[default]
    LastWriteWins,
    /// Refuse the registration with `RuntimeError::DuplicateFeature`
    Reject,
}

/// One argument to `register_features`
#[derive(Debug, Clone)]
pub enum FeatureEntry {
    /// A bare or marked feature
    Single(Feature),
    /// A collection of marked features, typically a specialization expansion
    Many(Vec<MarkedFeature>),
}

impl From<Feature> for FeatureEntry {
    fn from(feature: Feature) -> Self {
        FeatureEntry::Single(feature)
    }
}

impl From<RawFeature> for FeatureEntry {
    fn from(raw: RawFeature) -> Self {
        FeatureEntry::Single(Feature::Raw(raw))
    }
}

impl From<MarkedFeature> for FeatureEntry {
    fn from(marked: MarkedFeature) -> Self {
        FeatureEntry::Single(Feature::Marked(marked))
    }
}

impl From<Vec<MarkedFeature>> for FeatureEntry {
    fn from(features: Vec<MarkedFeature>) -> Self {
        FeatureEntry::Many(features)
    }
}

impl From<FeatureMap> for FeatureEntry {
    fn from(features: FeatureMap) -> Self {
        FeatureEntry::Many(features.into_iter().map(|(_, feature)| feature).collect())
    }
}

/// Feature registry
#[derive(Debug, Clone, Default)]
pub struct FeatureRegistry {
    /// Registered features, in registration order
    features: FeatureMap,

    /// Every mark referenced by a registered feature
    marks: MarkSet,

    collision_policy: CollisionPolicy,
}

impl FeatureRegistry {
    /// Create an empty registry (last write wins on collisions)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the collision policy
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    pub fn collision_policy(&self) -> CollisionPolicy {
        self.collision_policy
    }

    /// Register features; collections are registered element by element
    pub fn register_features<I, E>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = E>,
        E: Into<FeatureEntry>,
    {
        let before = self.features.len();

        for entry in entries {
            match entry.into() {
                FeatureEntry::Single(feature) => self.insert(feature.into_marked())?,
                FeatureEntry::Many(features) => {
                    for feature in features {
                        self.insert(feature)?;
                    }
                }
            }
        }

        info!(
            "Registered {} new features ({} total, {} marks)",
            self.features.len() - before,
            self.features.len(),
            self.marks.len()
        );
        Ok(())
    }

    /// Register a single feature
    pub fn register(&mut self, feature: impl Into<Feature>) -> Result<()> {
        self.insert(feature.into().into_marked())
    }

    fn insert(&mut self, feature: MarkedFeature) -> Result<()> {
        let name = feature.name().to_string();

        if self.features.contains_key(&name) {
            match self.collision_policy {
                CollisionPolicy::Reject => return Err(RuntimeError::DuplicateFeature(name)),
                CollisionPolicy::LastWriteWins => {
                    warn!("Feature '{}' registered twice, replacing earlier definition", name);
                }
            }
        }

        debug!("Registering feature '{}' requiring {:?}", name, feature.marks());
        self.marks.extend(feature.marks().iter().copied());
        self.features.insert(name, feature);
        Ok(())
    }

    /// Get a feature by name
    pub fn get(&self, name: &str) -> Option<&MarkedFeature> {
        self.features.get(name)
    }

    /// Check if a feature exists
    pub fn contains(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    /// Registered features, in registration order
    pub fn features(&self) -> impl Iterator<Item = &MarkedFeature> {
        self.features.values()
    }

    /// Feature names, in registration order
    pub fn feature_names(&self) -> Vec<String> {
        self.features.keys().map(str::to_string).collect()
    }

    /// Every mark referenced by a registered feature
    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    /// Features requiring a given mark
    pub fn features_requiring(&self, mark: &Mark) -> Vec<&MarkedFeature> {
        self.features.values().filter(|f| f.requires(mark)).collect()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
