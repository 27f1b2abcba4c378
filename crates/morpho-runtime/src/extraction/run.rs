//! Extraction run state machine
//!
//! One run per dataset: `select_marks` -> `select_features` -> `extract`.
//! Soft failures (a mark that does not validate, a feature whose marks are
//! not all selected) only shrink the selection. A required mark that is
//! missing aborts the run before any feature executes. Features execute in
//! candidate order, which for registry-driven runs is registration order.

use super::result::{ExtractionResult, FeatureFailure};
use crate::data::Data;
use crate::error::{Result, RuntimeError};
use crate::feature::MarkedFeature;
use crate::mark::{mark_names, Mark, MarkSet};
use crate::registry::FeatureRegistry;
use morpho_core::NamedMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

/// Lifecycle of an extraction run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Created,
    MarksSelected,
    FeaturesSelected,
    Extracted,
    /// Terminal failure (missing required marks or fail-fast feature error)
    Aborted,
}

/// What to do when a feature body fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Log, then abort the run and discard every collected value
    #[default]
    FailFast,
    /// Log, record the failure, and carry on with the next feature
    Continue,
}

/// Per-run selection options
#[derive(Debug, Clone, Default)]
pub struct ExtractionOptions {
    /// If set, only these marks may be selected
    pub only_marks: Option<MarkSet>,

    /// Marks that must validate or the run aborts
    pub required_marks: MarkSet,

    pub failure_policy: FailurePolicy,
}

impl ExtractionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_only_marks(mut self, marks: impl IntoIterator<Item = Mark>) -> Self {
        self.only_marks = Some(marks.into_iter().collect());
        self
    }

    pub fn with_required_marks(mut self, marks: impl IntoIterator<Item = Mark>) -> Self {
        self.required_marks = marks.into_iter().collect();
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

/// Feature extraction over one dataset
#[derive(Debug)]
pub struct ExtractionRun<'d> {
    data: &'d Data,
    state: RunState,
    failure_policy: FailurePolicy,
    selected_marks: MarkSet,
    selected_features: Vec<MarkedFeature>,
}

impl<'d> ExtractionRun<'d> {
    /// Create a run over a dataset
    pub fn new(data: &'d Data) -> Self {
        Self {
            data,
            state: RunState::Created,
            failure_policy: FailurePolicy::default(),
            selected_marks: MarkSet::new(),
            selected_features: Vec::new(),
        }
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn selected_marks(&self) -> &MarkSet {
        &self.selected_marks
    }

    pub fn selected_features(&self) -> &[MarkedFeature] {
        &self.selected_features
    }

    fn expect_state(&self, expected: RunState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(RuntimeError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    /// Validate candidate marks against the dataset.
    ///
    /// Marks that fail validation, or that are outside `only_marks` when it
    /// is given, are skipped. Afterwards every mark in `required_marks` must
    /// be selected, otherwise the run aborts with `MissingRequiredMarks`.
    pub fn select_marks<'m, I>(
        &mut self,
        candidates: I,
        only_marks: Option<&MarkSet>,
        required_marks: &MarkSet,
    ) -> Result<&MarkSet>
    where
        I: IntoIterator<Item = &'m Mark>,
    {
        self.expect_state(RunState::Created)?;

        for mark in candidates {
            if !mark.validate(self.data) {
                info!("Skipping mark '{}': validation failed", mark);
                continue;
            }
            if let Some(only) = only_marks {
                if !only.contains(mark) {
                    info!("Skipping mark '{}': not in only_marks", mark);
                    continue;
                }
            }
            self.selected_marks.insert(*mark);
        }

        let missing: Vec<String> = mark_names(required_marks.difference(&self.selected_marks));
        if !missing.is_empty() {
            error!("Required marks missing: {}", missing.join(", "));
            self.state = RunState::Aborted;
            return Err(RuntimeError::MissingRequiredMarks { missing });
        }

        debug!("Selected marks: {:?}", self.selected_marks);
        self.state = RunState::MarksSelected;
        Ok(&self.selected_marks)
    }

    /// Keep the candidates whose marks are all selected, in candidate order
    pub fn select_features<'f, I>(&mut self, candidates: I) -> Result<&[MarkedFeature]>
    where
        I: IntoIterator<Item = &'f MarkedFeature>,
    {
        self.expect_state(RunState::MarksSelected)?;

        for feature in candidates {
            if feature.is_satisfied_by(&self.selected_marks) {
                self.selected_features.push(feature.clone());
            } else {
                let unmet: Vec<String> =
                    mark_names(feature.marks().difference(&self.selected_marks));
                info!(
                    "Skipping feature '{}': unmet marks {}",
                    feature.name(),
                    unmet.join(", ")
                );
            }
        }

        debug!("Selected {} features", self.selected_features.len());
        self.state = RunState::FeaturesSelected;
        Ok(&self.selected_features)
    }

    /// Execute the selected features in order
    pub fn extract(&mut self) -> Result<ExtractionResult> {
        self.expect_state(RunState::FeaturesSelected)?;

        let mut values = NamedMap::new();
        let mut failures = Vec::new();

        for feature in &self.selected_features {
            match feature.call(self.data) {
                Ok(value) => {
                    debug!("Computed feature '{}'", feature.name());
                    values.insert(feature.name(), value);
                }
                Err(source) => {
                    error!("Feature '{}' failed: {:#}", feature.name(), source);
                    match self.failure_policy {
                        FailurePolicy::FailFast => {
                            self.state = RunState::Aborted;
                            return Err(RuntimeError::FeatureFailed {
                                name: feature.name().to_string(),
                                source,
                            });
                        }
                        FailurePolicy::Continue => failures.push(FeatureFailure {
                            feature: feature.name().to_string(),
                            error: format!("{:#}", source),
                        }),
                    }
                }
            }
        }

        self.state = RunState::Extracted;
        Ok(ExtractionResult {
            values,
            selected_marks: mark_names(&self.selected_marks),
            selected_features: self
                .selected_features
                .iter()
                .map(|f| f.name().to_string())
                .collect(),
            failures,
        })
    }
}

/// Drive a full run of a registry over one dataset.
///
/// Candidate marks are the registry's mark universe plus the required marks,
/// so a required mark no registered feature references is still validated.
pub fn run_feature_extraction(
    data: &Data,
    registry: &FeatureRegistry,
    options: &ExtractionOptions,
) -> Result<ExtractionResult> {
    let candidates = registry.marks() | &options.required_marks;

    let mut run = ExtractionRun::new(data).with_failure_policy(options.failure_policy);
    run.select_marks(&candidates, options.only_marks.as_ref(), &options.required_marks)?;
    run.select_features(registry.features())?;
    let result = run.extract()?;

    info!(
        "Extracted {} of {} registered features for dataset {}",
        result.values.len(),
        registry.len(),
        data.id()
    );
    Ok(result)
}
