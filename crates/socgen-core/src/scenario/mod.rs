//! Scenario runner
//!
//! Applies an ordered list of named perturbations to a record sequence.
//!
//! # Workflow
//! 1. Resolve every name against the registry (unknown names abort here)
//! 2. Copy the input records
//! 3. Thread the copy through each perturbation in list order
//! 4. Wrap the final sequence in a [`ScenarioResult`]
//!
//! Parameters are keyed by perturbation name, so a name listed twice runs
//! twice with the same parameters.

mod result;
mod spec;

pub use result::{Metadata, ScenarioManifest, ScenarioResult};
pub use spec::{PerturbationStep, ScenarioSpec, DEFAULT_SCENARIO_NAME};

pub(crate) use result::write_pretty;

use crate::error::ScenarioError;
use crate::perturbation::{PerturbationParams, PerturbationRegistry};
use crate::record::EventRecord;
use rand::RngCore;
use std::collections::HashMap;
use std::path::Path;

/// Per-perturbation parameters keyed by name
pub type ScenarioParams = HashMap<String, PerturbationParams>;

/// Runs scenarios against a perturbation registry
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    registry: PerturbationRegistry,
}

impl ScenarioRunner {
    /// Create runner with the built-in perturbations
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(PerturbationRegistry::with_defaults())
    }

    /// Create runner over a custom registry
    #[inline]
    #[must_use]
    pub fn with_registry(registry: PerturbationRegistry) -> Self {
        Self { registry }
    }

    /// Registry in use
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &PerturbationRegistry {
        &self.registry
    }

    /// Apply `perturbations` in order to a copy of `records`
    ///
    /// # Errors
    /// - [`ScenarioError::UnknownPerturbation`] before any step runs
    /// - [`ScenarioError::StepFailed`] if a step rejects its parameters
    ///
    /// No result is produced on error and `records` is never modified.
    pub fn run<S: AsRef<str>>(
        &self,
        records: &[EventRecord],
        perturbations: &[S],
        name: &str,
        params: &ScenarioParams,
        rng: &mut dyn RngCore,
    ) -> Result<ScenarioResult, ScenarioError> {
        let steps = perturbations
            .iter()
            .map(|p| {
                let p = p.as_ref();
                self.registry.resolve(p).map(|f| (p, f))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let no_params = PerturbationParams::new();
        let mut current = records.to_vec();
        for (idx, (step_name, function)) in steps.iter().enumerate() {
            let step_params = params.get(*step_name).unwrap_or(&no_params);
            tracing::debug!(
                "Scenario '{}' step {}: {} ({} params)",
                name,
                idx,
                step_name,
                step_params.len()
            );
            current = function(&current, step_params, rng).map_err(|source| {
                ScenarioError::StepFailed {
                    step: idx,
                    name: (*step_name).to_string(),
                    source,
                }
            })?;
        }

        tracing::info!(
            "Scenario '{}' applied {} perturbations to {} records",
            name,
            steps.len(),
            current.len()
        );

        let applied = steps.iter().map(|(n, _)| (*n).to_string()).collect();
        Ok(ScenarioResult::new(current, name, applied))
    }

    /// Run a parsed scenario description
    ///
    /// Metadata gains `description` (empty when absent).
    pub fn run_spec(
        &self,
        records: &[EventRecord],
        spec: &ScenarioSpec,
        rng: &mut dyn RngCore,
    ) -> Result<ScenarioResult, ScenarioError> {
        let names = spec.names();
        let result = self.run(records, names.as_slice(), &spec.name, &spec.params(), rng)?;
        Ok(result.with_metadata("description", spec.description.clone().unwrap_or_default()))
    }

    /// Load a YAML scenario description and run it
    ///
    /// Metadata gains `description` and `yaml_path`.
    pub fn run_from_yaml(
        &self,
        records: &[EventRecord],
        yaml_path: impl AsRef<Path>,
        rng: &mut dyn RngCore,
    ) -> Result<ScenarioResult, ScenarioError> {
        let yaml_path = yaml_path.as_ref();
        let spec = ScenarioSpec::from_path(yaml_path)?;
        let result = self.run_spec(records, &spec, rng)?;
        Ok(result.with_metadata("yaml_path", yaml_path.display().to_string()))
    }
}
