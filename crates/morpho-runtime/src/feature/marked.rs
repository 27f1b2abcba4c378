//! Marked features
//!
//! A feature is either a bare computation (`RawFeature`) or a computation
//! tagged with the marks it requires (`MarkedFeature`). Everything downstream
//! of registration works on `MarkedFeature` only; `Feature` is the tagged
//! union accepted at the edges and normalized once.

use super::params::FeatureParams;
use crate::data::Data;
use crate::mark::{Mark, MarkSet};
use morpho_core::Value;
use std::fmt;
use std::sync::Arc;

/// Features keyed by qualified name, in insertion order
pub type FeatureMap = morpho_core::NamedMap<MarkedFeature>;

/// Signature of a feature body
pub type FeatureFn = dyn Fn(&Data, &FeatureParams) -> anyhow::Result<Value> + Send + Sync;

/// Identifier of a callable: the last path segment of its type name
fn callable_ident<F>() -> String {
    let full = std::any::type_name::<F>();
    let without_generics = full.split('<').next().unwrap_or(full);
    without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics)
        .to_string()
}

/// A computation without marks
#[derive(Clone)]
pub struct RawFeature {
    name: Option<String>,
    ident: String,
    func: Arc<FeatureFn>,
}

impl RawFeature {
    /// Wrap a function or closure
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Data, &FeatureParams) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: None,
            ident: callable_ident::<F>(),
            func: Arc::new(func),
        }
    }

    /// Give the computation an explicit name
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Explicit name if set, else the callable's identifier
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.ident)
    }

    pub fn call(&self, data: &Data, params: &FeatureParams) -> anyhow::Result<Value> {
        (self.func)(data, params)
    }
}

impl fmt::Debug for RawFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFeature")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// Either kind of feature
#[derive(Debug, Clone)]
pub enum Feature {
    Raw(RawFeature),
    Marked(MarkedFeature),
}

impl Feature {
    pub fn name(&self) -> &str {
        match self {
            Feature::Raw(raw) => raw.name(),
            Feature::Marked(marked) => marked.name(),
        }
    }

    /// Marks carried by the feature itself, if it carries any
    pub fn marks(&self) -> Option<&MarkSet> {
        match self {
            Feature::Raw(_) => None,
            Feature::Marked(marked) => Some(marked.marks()),
        }
    }

    /// Normalize into a marked feature; raw features get an empty mark set
    pub fn into_marked(self) -> MarkedFeature {
        match self {
            Feature::Raw(raw) => MarkedFeature::wrap(MarkSet::new(), raw, None, true),
            Feature::Marked(marked) => marked,
        }
    }
}

impl From<RawFeature> for Feature {
    fn from(raw: RawFeature) -> Self {
        Feature::Raw(raw)
    }
}

impl From<MarkedFeature> for Feature {
    fn from(marked: MarkedFeature) -> Self {
        Feature::Marked(marked)
    }
}

/// A computation tagged with the marks it requires
#[derive(Clone)]
pub struct MarkedFeature {
    name: String,
    marks: MarkSet,
    func: Arc<FeatureFn>,
    params: FeatureParams,
}

impl MarkedFeature {
    /// Wrap a feature with marks.
    ///
    /// Marks already carried by `feature` are kept (union) unless
    /// `preserve_inherited_marks` is false. A marked feature is unwrapped one
    /// level so wrappers never nest. The name is `name`, else the wrapped
    /// feature's name, else the callable's identifier.
    pub fn wrap(
        marks: MarkSet,
        feature: impl Into<Feature>,
        name: Option<&str>,
        preserve_inherited_marks: bool,
    ) -> Self {
        match feature.into() {
            Feature::Raw(raw) => Self {
                name: name.map(str::to_string).unwrap_or_else(|| raw.name().to_string()),
                marks,
                func: raw.func,
                params: FeatureParams::new(),
            },
            Feature::Marked(inner) => {
                let marks = if preserve_inherited_marks {
                    &marks | &inner.marks
                } else {
                    marks
                };
                Self {
                    name: name.map(str::to_string).unwrap_or(inner.name),
                    marks,
                    func: inner.func,
                    params: inner.params,
                }
            }
        }
    }

    /// Wrap with marks, keeping inherited marks and the feature's own name
    pub fn new(marks: impl IntoIterator<Item = Mark>, feature: impl Into<Feature>) -> Self {
        Self::wrap(marks.into_iter().collect(), feature, None, true)
    }

    /// Shorthand for a named closure with marks
    pub fn from_fn<F>(name: &str, marks: impl IntoIterator<Item = Mark>, func: F) -> Self
    where
        F: Fn(&Data, &FeatureParams) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        Self::wrap(marks.into_iter().collect(), RawFeature::new(func), Some(name), true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn marks(&self) -> &MarkSet {
        &self.marks
    }

    pub fn params(&self) -> &FeatureParams {
        &self.params
    }

    pub fn requires(&self, mark: &Mark) -> bool {
        self.marks.contains(mark)
    }

    /// Whether every required mark is in `selected`
    pub fn is_satisfied_by(&self, selected: &MarkSet) -> bool {
        self.marks.is_subset(selected)
    }

    /// Run the computation with the bound parameters
    pub fn call(&self, data: &Data) -> anyhow::Result<Value> {
        (self.func)(data, &self.params)
    }

    /// Partially apply parameters; later bindings override earlier ones
    pub fn bind(&self, params: &FeatureParams) -> Self {
        Self {
            name: self.name.clone(),
            marks: self.marks.clone(),
            func: Arc::clone(&self.func),
            params: self.params.merged(params),
        }
    }

    /// Same computation under another name
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Same computation requiring additional marks
    pub fn with_marks(&self, marks: &MarkSet) -> Self {
        Self {
            marks: &self.marks | marks,
            ..self.clone()
        }
    }
}

impl fmt::Debug for MarkedFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkedFeature")
            .field("name", &self.name)
            .field("marks", &self.marks)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
