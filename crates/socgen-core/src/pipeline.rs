//! End-to-end pipeline
//!
//! ```text
//! Loader → Seed Expander → Scenario Runner → Schema Gate → Reporter
//!                                                     ↓
//!                              events.json, manifest.json, report.json
//! ```

use crate::config::PipelineConfig;
use crate::error::{SchemaError, SerializeError, SocgenResult};
use crate::expander::SeedExpander;
use crate::loader::RecordLoader;
use crate::report::{basic_report, Report};
use crate::scenario::{ScenarioResult, ScenarioRunner};
use crate::schema::{SchemaGate, ValidationError};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

/// Events file name inside the output directory
pub const EVENTS_FILE: &str = "events.json";
/// Manifest file name inside the output directory
pub const MANIFEST_FILE: &str = "manifest.json";
/// Report file name inside the output directory
pub const REPORT_FILE: &str = "report.json";

/// Files written by a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutputs {
    /// Transformed records
    pub events: PathBuf,
    /// Scenario manifest
    pub manifest: PathBuf,
    /// Summary report
    pub report: PathBuf,
}

/// Everything a run produced
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Scenario output
    pub result: ScenarioResult,
    /// Schema violations (empty without a schema)
    pub violations: Vec<ValidationError>,
    /// Summary statistics over the output
    pub report: Report,
    /// Written files
    pub outputs: PipelineOutputs,
}

impl PipelineOutcome {
    /// Check if the output passed the schema gate
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Pipeline driver
#[derive(Debug)]
pub struct Pipeline {
    runner: ScenarioRunner,
    expander: SeedExpander,
}

impl Pipeline {
    /// Pipeline with built-in perturbations and the echo generator
    #[must_use]
    pub fn new() -> Self {
        Self {
            runner: ScenarioRunner::new(),
            expander: SeedExpander::echo(),
        }
    }

    /// With a custom runner
    #[must_use]
    pub fn with_runner(mut self, runner: ScenarioRunner) -> Self {
        self.runner = runner;
        self
    }

    /// With a custom seed expander
    #[must_use]
    pub fn with_expander(mut self, expander: SeedExpander) -> Self {
        self.expander = expander;
        self
    }

    /// Execute one run described by `config`
    ///
    /// Nothing is written when loading, the scenario, or (with
    /// `fail_on_invalid`) the schema gate fails.
    pub fn run(&self, config: &PipelineConfig) -> SocgenResult<PipelineOutcome> {
        let input = config.input_path()?;
        let scenario = config.scenario_path()?;

        let mut records = RecordLoader::load_as(input, config.format)?;
        tracing::info!("Loaded {} records from {}", records.len(), input.display());

        let expanded = if config.expand_count > 0 {
            let generated = self.expander.expand(&records, config.expand_count);
            tracing::info!(
                "Generated {} records with '{}'",
                generated.len(),
                self.expander.model()
            );
            let produced = !generated.is_empty();
            records.extend(generated);
            produced
        } else {
            false
        };

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut result = self.runner.run_from_yaml(&records, scenario, &mut rng)?;
        result.insert_metadata("source", input.display().to_string());
        if let Some(seed) = config.seed {
            result.insert_metadata("seed", seed);
        }
        if expanded {
            result.insert_metadata("expanded_by", self.expander.model());
        }

        let violations = match &config.schema {
            Some(path) => SchemaGate::from_path(path)?.validate(&result.events),
            None => Vec::new(),
        };
        if config.fail_on_invalid {
            if let Some(first) = violations.first() {
                return Err(SchemaError::ValidationFailed {
                    first: first.clone(),
                    total: violations.len(),
                }
                .into());
            }
        }

        let report = basic_report(&result.events, &config.report);

        std::fs::create_dir_all(&config.output_dir)
            .map_err(|e| SerializeError::io_error(&config.output_dir, e))?;
        let outputs = PipelineOutputs {
            events: config.output_dir.join(EVENTS_FILE),
            manifest: config.output_dir.join(MANIFEST_FILE),
            report: config.output_dir.join(REPORT_FILE),
        };
        result.write_json(&outputs.events)?;
        result.write_manifest(&outputs.manifest)?;
        report.write_json(&outputs.report)?;
        tracing::info!(
            "Wrote scenario '{}' ({} events) to {}",
            result.name,
            result.len(),
            config.output_dir.display()
        );

        Ok(PipelineOutcome {
            result,
            violations,
            report,
            outputs,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
