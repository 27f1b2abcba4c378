//! Named feature sets
//!
//! A feature set is a registry built once from the feature library and shared
//! for the rest of the process. Sets are looked up by name; an unknown name is
//! an error that lists the known ones.

pub mod library;

use crate::error::{Result, SdkError};
use morpho_runtime::feature::{
    bifurcation_specializations, nested_specialize, neurite_specializations,
};
use morpho_runtime::mark::catalog;
use morpho_runtime::{CollisionPolicy, FeatureEntry, FeatureRegistry, MarkedFeature, RawFeature};
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Feature set used when a configuration does not name one
pub const DEFAULT_FEATURE_SET: &str = "default";

struct FeatureSetDef {
    name: &'static str,
    build: fn() -> Result<FeatureRegistry>,
    cell: OnceLock<Arc<FeatureRegistry>>,
}

static FEATURE_SETS: [FeatureSetDef; 2] = [
    FeatureSetDef {
        name: DEFAULT_FEATURE_SET,
        build: build_default,
        cell: OnceLock::new(),
    },
    FeatureSetDef {
        name: "topology",
        build: build_topology,
        cell: OnceLock::new(),
    },
];

/// Names of the built-in feature sets
pub fn known_feature_sets() -> Vec<&'static str> {
    FEATURE_SETS.iter().map(|def| def.name).collect()
}

/// Look up a feature set by name, building it on first use
pub fn feature_set(name: &str) -> Result<Arc<FeatureRegistry>> {
    let def = FEATURE_SETS
        .iter()
        .find(|def| def.name == name)
        .ok_or_else(|| SdkError::UnknownFeatureSet {
            name: name.to_string(),
            known: known_feature_sets().into_iter().map(String::from).collect(),
        })?;

    if let Some(registry) = def.cell.get() {
        return Ok(Arc::clone(registry));
    }

    let registry = Arc::new((def.build)()?);
    debug!("Built feature set '{}' with {} features", def.name, registry.len());
    Ok(Arc::clone(def.cell.get_or_init(|| registry)))
}

fn per_neurite(feature: MarkedFeature) -> FeatureEntry {
    nested_specialize(&feature, &[neurite_specializations()]).into()
}

fn topology_entries() -> Vec<FeatureEntry> {
    vec![
        MarkedFeature::new([catalog::INTRINSIC], RawFeature::new(library::node_type_counts)).into(),
        per_neurite(MarkedFeature::new(
            [catalog::INTRINSIC],
            RawFeature::new(library::num_nodes),
        )),
        per_neurite(MarkedFeature::new(
            [catalog::INTRINSIC],
            RawFeature::new(library::num_bifurcations),
        )),
        per_neurite(MarkedFeature::new(
            [catalog::INTRINSIC],
            RawFeature::new(library::num_tips),
        )),
    ]
}

/// Counts only; needs nothing beyond the tree itself
fn build_topology() -> Result<FeatureRegistry> {
    let mut registry = FeatureRegistry::new().with_collision_policy(CollisionPolicy::Reject);
    registry.register_features(topology_entries())?;
    Ok(registry)
}

fn build_default() -> Result<FeatureRegistry> {
    let mut registry = FeatureRegistry::new().with_collision_policy(CollisionPolicy::Reject);
    registry.register_features(topology_entries())?;

    let angle = MarkedFeature::new(
        [catalog::GEOMETRIC],
        RawFeature::new(library::mean_bifurcation_angle),
    );
    registry.register_features([
        per_neurite(MarkedFeature::new(
            [catalog::GEOMETRIC, catalog::COMPARTMENT_FEATURES],
            RawFeature::new(library::total_length),
        )),
        per_neurite(MarkedFeature::new(
            [catalog::GEOMETRIC, catalog::REQUIRES_ROOT],
            RawFeature::new(library::max_euclidean_distance),
        )),
        nested_specialize(
            &angle,
            &[neurite_specializations(), bifurcation_specializations()],
        )
        .into(),
        MarkedFeature::new(
            [catalog::REQUIRES_SOMA, catalog::REQUIRES_RADII],
            RawFeature::new(library::soma_radius),
        )
        .into(),
        MarkedFeature::new(
            [catalog::REQUIRES_SOMA, catalog::REQUIRES_RADII],
            RawFeature::new(library::soma_surface),
        )
        .into(),
        MarkedFeature::new(
            [catalog::REQUIRES_RELATIVE_SOMA_DEPTH],
            RawFeature::new(library::relative_soma_depth),
        )
        .into(),
    ])?;

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_feature_sets() {
        assert_eq!(known_feature_sets(), vec!["default", "topology"]);
    }

    #[test]
    fn test_unknown_feature_set() {
        let err = feature_set("aibs").unwrap_err();
        match err {
            SdkError::UnknownFeatureSet { name, known } => {
                assert_eq!(name, "aibs");
                assert_eq!(known, vec!["default".to_string(), "topology".to_string()]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_feature_set_is_built_once() {
        let first = feature_set("topology").unwrap();
        let second = feature_set("topology").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_topology_names() {
        let registry = feature_set("topology").unwrap();
        let names = registry.feature_names();
        assert_eq!(names[0], "node_type_counts");
        assert_eq!(names[1], "axon.num_nodes");
        assert!(names.contains(&"all_neurites.num_tips".to_string()));
        // node_type_counts + 3 counts x 5 neurite populations
        assert_eq!(registry.len(), 16);
    }

    #[test]
    fn test_default_extends_topology() {
        let registry = feature_set(DEFAULT_FEATURE_SET).unwrap();
        let topology = feature_set("topology").unwrap();
        for name in topology.feature_names() {
            assert!(registry.contains(&name), "missing {}", name);
        }

        let angle = registry.get("remote.apical_dendrite.mean_bifurcation_angle").unwrap();
        assert!(angle.requires(&catalog::REQUIRES_APICAL));
        assert!(angle.requires(&catalog::BIFURCATION_FEATURES));
        assert!(angle.requires(&catalog::GEOMETRIC));

        // 16 topology + 2 x 5 per-neurite + 10 angles + 3 soma-level
        assert_eq!(registry.len(), 39);
    }
}
