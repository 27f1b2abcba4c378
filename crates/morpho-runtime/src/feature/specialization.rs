//! Specialization expansion
//!
//! A specialization descriptor is a named bundle of extra marks and bound
//! parameters ("restrict to axon nodes"). A specialization set groups the
//! mutually exclusive alternatives along one axis. Expanding a generic
//! feature over one or more sets mechanically produces every concrete
//! variant, named `"{descriptor}.{feature}"`.

use super::marked::{FeatureMap, MarkedFeature};
use super::params::{FeatureParams, BIFURCATION_KIND};
use crate::mark::{catalog, Mark, MarkSet};
use morpho_core::NodeType;
use tracing::debug;

/// One value along a specialization axis
#[derive(Debug, Clone, PartialEq)]
pub struct Specialization {
    pub name: String,
    pub marks: MarkSet,
    pub params: FeatureParams,
}

/// Build a specialization descriptor
pub fn specialization(
    name: impl Into<String>,
    marks: impl IntoIterator<Item = Mark>,
    params: FeatureParams,
) -> Specialization {
    Specialization {
        name: name.into(),
        marks: marks.into_iter().collect(),
        params,
    }
}

/// Mutually exclusive alternatives along one axis
///
/// Descriptors are identified by name: adding a descriptor whose name is
/// already present replaces the earlier one in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecializationSet {
    items: Vec<Specialization>,
}

impl SpecializationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, spec: Specialization) {
        match self.items.iter_mut().find(|existing| existing.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.items.push(spec),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Specialization> {
        self.items.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|s| s.name.as_str()).collect()
    }
}

impl FromIterator<Specialization> for SpecializationSet {
    fn from_iter<I: IntoIterator<Item = Specialization>>(iter: I) -> Self {
        let mut set = Self::new();
        for spec in iter {
            set.insert(spec);
        }
        set
    }
}

impl<'a> IntoIterator for &'a SpecializationSet {
    type Item = &'a Specialization;
    type IntoIter = std::slice::Iter<'a, Specialization>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Apply one axis to a feature: one variant per descriptor
pub fn specialize(feature: &MarkedFeature, set: &SpecializationSet) -> FeatureMap {
    set.iter()
        .map(|spec| {
            let name = format!("{}.{}", spec.name, feature.name());
            let variant = feature
                .bind(&spec.params)
                .with_marks(&spec.marks)
                .renamed(name.clone());
            (name, variant)
        })
        .collect()
}

/// Apply several axes in order, producing the full cross product.
///
/// Each round prepends its descriptor name, so applying `S` then `T` yields
/// names shaped `"T.S.feature"`. Output is ordered by candidate, then by
/// descriptor within the round.
pub fn nested_specialize(
    feature: &MarkedFeature,
    sets: &[SpecializationSet],
) -> FeatureMap {
    let mut current = FeatureMap::new();
    current.insert(feature.name(), feature.clone());

    for set in sets {
        let mut next = FeatureMap::new();
        for candidate in current.values() {
            next.extend(specialize(candidate, set));
        }
        current = next;
    }

    debug!(
        "Expanded feature '{}' over {} axes into {} variants",
        feature.name(),
        sets.len(),
        current.len()
    );

    current
}

/// Restrict a feature to one neurite population at a time
pub fn neurite_specializations() -> SpecializationSet {
    [
        specialization(
            "axon",
            [catalog::REQUIRES_AXON],
            FeatureParams::new().with_node_types(&[NodeType::Axon]),
        ),
        specialization(
            "apical_dendrite",
            [catalog::REQUIRES_APICAL],
            FeatureParams::new().with_node_types(&[NodeType::ApicalDendrite]),
        ),
        specialization(
            "basal_dendrite",
            [catalog::REQUIRES_BASAL],
            FeatureParams::new().with_node_types(&[NodeType::BasalDendrite]),
        ),
        specialization(
            "dendrite",
            [catalog::REQUIRES_DENDRITE],
            FeatureParams::new().with_node_types(&NodeType::DENDRITES),
        ),
        specialization(
            "all_neurites",
            [catalog::ALL_NEURITE_TYPES],
            FeatureParams::new().with_node_types(&NodeType::NEURITES),
        ),
    ]
    .into_iter()
    .collect()
}

/// Measure bifurcations against the immediate children or the next branch point / tip
pub fn bifurcation_specializations() -> SpecializationSet {
    [
        specialization(
            "local",
            [catalog::BIFURCATION_FEATURES],
            FeatureParams::new().with(BIFURCATION_KIND, "local"),
        ),
        specialization(
            "remote",
            [catalog::BIFURCATION_FEATURES],
            FeatureParams::new().with(BIFURCATION_KIND, "remote"),
        ),
    ]
    .into_iter()
    .collect()
}
