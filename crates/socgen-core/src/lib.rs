//! socgen Core
//!
//! Synthetic security-event scenario generation: load recorded event logs,
//! optionally grow them from seeds, apply named perturbations in order,
//! check the output against a JSON Schema, and summarize it.
//!
//! # Architecture
//!
//! ```text
//! File System → RecordLoader → SeedExpander → ScenarioRunner → SchemaGate → Report
//!                                                  ↑
//!                                        PerturbationRegistry
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use socgen_core::prelude::*;
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let records = RecordLoader::load_ndjson("auth.ndjson")?;
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let result = ScenarioRunner::new().run(
//!     &records,
//!     &["timestamp_drift", "identity_shift"],
//!     "noisy_auth",
//!     &ScenarioParams::new(),
//!     &mut rng,
//! )?;
//!
//! SchemaGate::from_path("event.schema.json")?.assert_valid(&result.events)?;
//! result.write_json("noisy_auth.json")?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
pub mod config;
pub mod error;
pub mod expander;
pub mod loader;
pub mod perturbation;
pub mod pipeline;
pub mod record;
pub mod report;
pub mod scenario;
pub mod schema;

// Re-exports for convenience
pub use config::PipelineConfig;
pub use error::{
    ConfigError, LoadError, PerturbationError, ScenarioError, SchemaError, SerializeError,
    SocgenError, SocgenResult,
};
pub use expander::{echo_generator, SeedExpander};
pub use loader::{InputFormat, RecordLoader};
pub use perturbation::{PerturbationFn, PerturbationKind, PerturbationParams, PerturbationRegistry};
pub use pipeline::{Pipeline, PipelineOutcome, PipelineOutputs};
pub use record::{EventRecord, RecordSequence};
pub use report::{basic_report, Report, ReportConfig};
pub use scenario::{
    PerturbationStep, ScenarioParams, ScenarioResult, ScenarioRunner, ScenarioSpec,
};
pub use schema::{SchemaGate, ValidationError};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for running scenarios
    pub use crate::error::{ScenarioError, SchemaError, SocgenError};
    pub use crate::loader::RecordLoader;
    pub use crate::perturbation::{PerturbationParams, PerturbationRegistry};
    pub use crate::record::{EventRecord, RecordSequence};
    pub use crate::report::{basic_report, ReportConfig};
    pub use crate::scenario::{ScenarioParams, ScenarioResult, ScenarioRunner, ScenarioSpec};
    pub use crate::schema::SchemaGate;
}
