//! Scenario descriptions
//!
//! YAML layout:
//!
//! ```yaml
//! name: credential_noise
//! description: drift clocks then rename accounts
//! perturbations:
//!   - name: timestamp_drift
//!     params:
//!       max_offset_minutes: 10
//!   - name: identity_shift
//! ```

use crate::error::LoadError;
use crate::perturbation::PerturbationParams;
use crate::scenario::ScenarioParams;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Default scenario name
pub const DEFAULT_SCENARIO_NAME: &str = "scenario";

/// One `{name, params}` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerturbationStep {
    /// Registered perturbation name
    pub name: String,
    /// Keyword arguments; absent or null means none
    #[serde(default, deserialize_with = "null_as_empty")]
    pub params: PerturbationParams,
}

impl PerturbationStep {
    /// Step without parameters
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: PerturbationParams::new(),
        }
    }

    /// With parameters
    #[must_use]
    pub fn with_params(mut self, params: PerturbationParams) -> Self {
        self.params = params;
        self
    }
}

/// Parsed scenario description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSpec {
    /// Scenario name
    #[serde(default = "default_name")]
    pub name: String,
    /// Free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Ordered steps
    #[serde(default)]
    pub perturbations: Vec<PerturbationStep>,
}

impl ScenarioSpec {
    /// Create empty scenario with a name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            perturbations: Vec::new(),
        }
    }

    /// With description
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a step
    #[must_use]
    pub fn with_step(mut self, step: PerturbationStep) -> Self {
        self.perturbations.push(step);
        self
    }

    /// Parse from YAML text; `origin` is used in error messages only
    pub fn from_yaml_str(content: &str, origin: &Path) -> Result<Self, LoadError> {
        serde_yaml::from_str(content).map_err(|e| LoadError::Scenario {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Read and parse a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io_error(path, e))?;
        Self::from_yaml_str(&content, path)
    }

    /// Step names in order, duplicates kept
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.perturbations.iter().map(|s| s.name.clone()).collect()
    }

    /// Parameters keyed by name; a later step with the same name replaces
    /// the parameters of an earlier one
    #[must_use]
    pub fn params(&self) -> ScenarioParams {
        self.perturbations
            .iter()
            .map(|s| (s.name.clone(), s.params.clone()))
            .collect()
    }
}

fn default_name() -> String {
    DEFAULT_SCENARIO_NAME.to_string()
}

fn null_as_empty<'de, D: Deserializer<'de>>(de: D) -> Result<PerturbationParams, D::Error> {
    Ok(Option::<PerturbationParams>::deserialize(de)?.unwrap_or_default())
}
