//! Dataset wrapper
//!
//! Bundles one reconstruction with the named side-channel values some
//! features need (layer annotations, reference depths, ...).

use morpho_core::{Morphology, Value};
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use uuid::Uuid;

/// Auxiliary value holding per-node layer annotations
pub const LAYER_ANNOTATION: &str = "layer_annotation";

/// Auxiliary value holding reference layer boundary depths
pub const REFERENCE_LAYER_DEPTHS: &str = "reference_layer_depths";

/// Auxiliary value holding the soma depth relative to the pia/white-matter span
pub const RELATIVE_SOMA_DEPTH: &str = "relative_soma_depth";

/// Input to one extraction run
///
/// Equality and hashing are by identity: every constructed `Data` gets a
/// fresh id, so two wrappers around the same reconstruction are distinct.
/// `Data` is intentionally not `Clone`; share it behind an `Arc`.
#[derive(Debug)]
pub struct Data {
    id: Uuid,
    morphology: Arc<Morphology>,
    values: HashMap<String, Value>,
}

impl Data {
    /// Wrap a reconstruction with no auxiliary values
    pub fn new(morphology: Arc<Morphology>) -> Self {
        Self {
            id: Uuid::new_v4(),
            morphology,
            values: HashMap::new(),
        }
    }

    /// Attach an auxiliary value (construction-time only)
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Attach several auxiliary values (construction-time only)
    pub fn with_values(mut self, values: HashMap<String, Value>) -> Self {
        self.values.extend(values);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn morphology(&self) -> &Morphology {
        &self.morphology
    }

    /// Shared handle to the reconstruction
    pub fn morphology_arc(&self) -> Arc<Morphology> {
        Arc::clone(&self.morphology)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Whether an auxiliary value is present and not null
    pub fn has(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(|v| !v.is_null())
    }

    /// Names of the auxiliary values, sorted
    pub fn value_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.values.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl PartialEq for Data {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Data {}

impl Hash for Data {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
