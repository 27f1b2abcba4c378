//! Built-in mark catalog
//!
//! The catalog is the explicit name -> mark table that lets configuration
//! files refer to marks by name. Every built-in mark is listed in `CATALOG`.

use super::{Mark, MarkSet};
use crate::data::{Data, LAYER_ANNOTATION, REFERENCE_LAYER_DEPTHS, RELATIVE_SOMA_DEPTH};
use crate::error::{Result, RuntimeError};
use morpho_core::NodeType;

pub const REQUIRES_LAYER_ANNOTATIONS: Mark = Mark::new(
    "RequiresLayerAnnotations",
    "Dataset carries per-node cortical layer annotations",
    has_layer_annotations,
);

pub const REQUIRES_REGULAR_POINT_SPACING: Mark = Mark::unconditional(
    "RequiresRegularPointSpacing",
    "Feature assumes resampled, regularly spaced points",
);

pub const REQUIRES_RADII: Mark = Mark::new(
    "RequiresRadii",
    "Every node has a strictly positive radius",
    requires_radii,
);

pub const REQUIRES_REFERENCE_LAYER_DEPTHS: Mark = Mark::new(
    "RequiresReferenceLayerDepths",
    "Dataset carries reference layer boundary depths",
    has_reference_layer_depths,
);

pub const REQUIRES_RELATIVE_SOMA_DEPTH: Mark = Mark::new(
    "RequiresRelativeSomaDepth",
    "Dataset carries the relative soma depth",
    has_relative_soma_depth,
);

pub const REQUIRES_SOMA: Mark = Mark::new(
    "RequiresSoma",
    "Reconstruction has exactly one soma node",
    has_single_soma,
);

pub const REQUIRES_ROOT: Mark = Mark::new(
    "RequiresRoot",
    "Reconstruction has at least one root",
    has_root,
);

pub const REQUIRES_UNIQUE_ROOT: Mark = Mark::new(
    "RequiresUniqueRoot",
    "Reconstruction has exactly one root",
    has_unique_root,
);

pub const REQUIRES_AXON: Mark = Mark::new(
    "RequiresAxon",
    "Reconstruction has at least one axon node",
    has_axon,
);

pub const REQUIRES_APICAL: Mark = Mark::new(
    "RequiresApical",
    "Reconstruction has at least one apical dendrite node",
    has_apical,
);

pub const REQUIRES_BASAL: Mark = Mark::new(
    "RequiresBasal",
    "Reconstruction has at least one basal dendrite node",
    has_basal,
);

pub const REQUIRES_DENDRITE: Mark = Mark::new(
    "RequiresDendrite",
    "Reconstruction has at least one apical or basal dendrite node",
    has_dendrite,
);

pub const INTRINSIC: Mark = Mark::unconditional(
    "Intrinsic",
    "Feature depends only on the reconstruction itself",
);

pub const GEOMETRIC: Mark = Mark::unconditional(
    "Geometric",
    "Feature depends on absolute positions",
);

pub const ALL_NEURITE_TYPES: Mark = Mark::unconditional(
    "AllNeuriteTypes",
    "Feature is computed over all neurite types together",
);

pub const BIFURCATION_FEATURES: Mark = Mark::unconditional(
    "BifurcationFeatures",
    "Feature is computed at bifurcation points",
);

pub const COMPARTMENT_FEATURES: Mark = Mark::unconditional(
    "CompartmentFeatures",
    "Feature is computed over compartments",
);

pub const NEURITE_TYPE_COMPARISON: Mark = Mark::unconditional(
    "NeuriteTypeComparison",
    "Feature compares two neurite types",
);

/// Every built-in mark
pub static CATALOG: &[Mark] = &[
    REQUIRES_LAYER_ANNOTATIONS,
    REQUIRES_REGULAR_POINT_SPACING,
    REQUIRES_RADII,
    REQUIRES_REFERENCE_LAYER_DEPTHS,
    REQUIRES_RELATIVE_SOMA_DEPTH,
    REQUIRES_SOMA,
    REQUIRES_ROOT,
    REQUIRES_UNIQUE_ROOT,
    REQUIRES_AXON,
    REQUIRES_APICAL,
    REQUIRES_BASAL,
    REQUIRES_DENDRITE,
    INTRINSIC,
    GEOMETRIC,
    ALL_NEURITE_TYPES,
    BIFURCATION_FEATURES,
    COMPARTMENT_FEATURES,
    NEURITE_TYPE_COMPARISON,
];

fn requires_radii(data: &Data) -> bool {
    let nodes = data.morphology().nodes();
    !nodes.is_empty() && nodes.iter().all(|n| n.radius > 0.0)
}

fn has_layer_annotations(data: &Data) -> bool {
    data.has(LAYER_ANNOTATION)
}

fn has_reference_layer_depths(data: &Data) -> bool {
    data.has(REFERENCE_LAYER_DEPTHS)
}

fn has_relative_soma_depth(data: &Data) -> bool {
    data.has(RELATIVE_SOMA_DEPTH)
}

fn has_single_soma(data: &Data) -> bool {
    data.morphology().soma().is_some()
}

fn has_root(data: &Data) -> bool {
    !data.morphology().roots().is_empty()
}

fn has_unique_root(data: &Data) -> bool {
    data.morphology().roots().len() == 1
}

fn has_axon(data: &Data) -> bool {
    data.morphology().has_type(NodeType::Axon)
}

fn has_apical(data: &Data) -> bool {
    data.morphology().has_type(NodeType::ApicalDendrite)
}

fn has_basal(data: &Data) -> bool {
    data.morphology().has_type(NodeType::BasalDendrite)
}

fn has_dendrite(data: &Data) -> bool {
    NodeType::DENDRITES
        .iter()
        .any(|t| data.morphology().has_type(*t))
}

/// Names of all catalog marks, sorted
pub fn known_names() -> Vec<String> {
    let mut names: Vec<String> = CATALOG.iter().map(|m| m.name().to_string()).collect();
    names.sort_unstable();
    names
}

/// Look up a built-in mark by name
pub fn lookup(name: &str) -> Result<Mark> {
    CATALOG
        .iter()
        .find(|m| m.name() == name)
        .copied()
        .ok_or_else(|| RuntimeError::UnknownMark {
            name: name.to_string(),
            known: known_names(),
        })
}

/// Resolve a list of mark names into a mark set, failing on the first unknown name
pub fn resolve<S: AsRef<str>>(names: &[S]) -> Result<MarkSet> {
    names.iter().map(|name| lookup(name.as_ref())).collect()
}
