//! Feature module
//!
//! Marked features, their bound parameters, and combinatorial specialization.

pub mod marked;
pub mod params;
pub mod specialization;

// Re-export for convenience
pub use marked::{Feature, FeatureFn, FeatureMap, MarkedFeature, RawFeature};
pub use params::FeatureParams;
pub use specialization::{
    bifurcation_specializations, nested_specialize, neurite_specializations, specialization,
    specialize, Specialization, SpecializationSet,
};
