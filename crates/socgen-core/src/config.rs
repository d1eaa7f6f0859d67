//! Pipeline configuration
//!
//! A pipeline run is described by a TOML file:
//!
//! ```toml
//! input = "logs/auth.ndjson"
//! scenario = "scenarios/noisy_auth.yaml"
//! schema = "schemas/event.schema.json"
//! output_dir = "out"
//! expand_count = 100
//! seed = 42
//! fail_on_invalid = true
//!
//! [report]
//! timestamp_field = "@timestamp"
//! id_field = "event_id"
//! ```
//!
//! Relative paths are taken as given, i.e. relative to the working
//! directory of the process.

use crate::error::ConfigError;
use crate::loader::InputFormat;
use crate::report::ReportConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Settings for one end-to-end run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Recorded events to start from
    pub input: Option<PathBuf>,
    /// Format of `input`
    pub format: InputFormat,
    /// Additional records to generate from the loaded seeds
    pub expand_count: usize,
    /// YAML scenario description
    pub scenario: Option<PathBuf>,
    /// JSON Schema applied to the scenario output
    pub schema: Option<PathBuf>,
    /// Directory receiving events, manifest and report
    pub output_dir: PathBuf,
    /// RNG seed; entropy from the OS when absent
    pub seed: Option<u64>,
    /// Abort before writing output when the schema gate finds violations
    pub fail_on_invalid: bool,
    /// Report fields
    pub report: ReportConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: None,
            format: InputFormat::Auto,
            expand_count: 0,
            scenario: None,
            schema: None,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            seed: None,
            fail_on_invalid: false,
            report: ReportConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML text; `origin` is used in error messages only
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Read and parse a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// With input file
    #[inline]
    #[must_use]
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// With input format
    #[inline]
    #[must_use]
    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    /// With scenario description
    #[inline]
    #[must_use]
    pub fn with_scenario(mut self, scenario: impl Into<PathBuf>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    /// With schema
    #[inline]
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<PathBuf>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// With output directory
    #[inline]
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// With seed expansion
    #[inline]
    #[must_use]
    pub fn with_expand_count(mut self, count: usize) -> Self {
        self.expand_count = count;
        self
    }

    /// With RNG seed
    #[inline]
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// With strict schema handling
    #[inline]
    #[must_use]
    pub fn with_fail_on_invalid(mut self, fail: bool) -> Self {
        self.fail_on_invalid = fail;
        self
    }

    /// Input path, required for a run
    pub fn input_path(&self) -> Result<&Path, ConfigError> {
        self.input.as_deref().ok_or(ConfigError::Missing("input"))
    }

    /// Scenario path, required for a run
    pub fn scenario_path(&self) -> Result<&Path, ConfigError> {
        self.scenario.as_deref().ok_or(ConfigError::Missing("scenario"))
    }
}
