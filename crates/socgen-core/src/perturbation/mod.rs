//! Perturbation registry
//!
//! A perturbation is a named, parameterized, order-preserving map over a
//! record sequence. Every perturbation has the same shape:
//!
//! ```text
//! (records, params, rng) -> records
//! ```
//!
//! Perturbations never modify their input: each returns a fresh copy with
//! exactly one output record per input record, in input order. Randomness
//! is always drawn from the injected generator so runs can be replayed
//! from a seed.

mod identity;
mod timestamp;

pub use identity::{identity_shift, IdentityShiftParams};
pub use timestamp::{format_iso8601, parse_iso8601, timestamp_drift, TimestampDriftParams};

use crate::error::{PerturbationError, ScenarioError};
use crate::record::{EventRecord, RecordSequence};
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;

/// Keyword arguments for one perturbation
pub type PerturbationParams = serde_json::Map<String, Value>;

/// Perturbation function signature
pub type PerturbationFn = fn(
    &[EventRecord],
    &PerturbationParams,
    &mut dyn RngCore,
) -> Result<RecordSequence, PerturbationError>;

/// Built-in perturbation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerturbationKind {
    /// Shift ISO-8601 timestamps by a bounded random number of minutes
    TimestampDrift,
    /// Append a random suffix to identity fields
    IdentityShift,
}

impl PerturbationKind {
    /// All built-in kinds
    pub const ALL: [Self; 2] = [Self::TimestampDrift, Self::IdentityShift];

    /// Registry name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TimestampDrift => "timestamp_drift",
            Self::IdentityShift => "identity_shift",
        }
    }

    /// Transformation function
    #[must_use]
    pub fn function(self) -> PerturbationFn {
        match self {
            Self::TimestampDrift => timestamp_drift,
            Self::IdentityShift => identity_shift,
        }
    }
}

/// Name → function table
///
/// The scenario runner only ever looks functions up here; it has no
/// knowledge of what a perturbation does.
#[derive(Debug, Clone)]
pub struct PerturbationRegistry {
    entries: BTreeMap<String, PerturbationFn>,
}

impl PerturbationRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Create registry with the built-in perturbations
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for kind in PerturbationKind::ALL {
            registry
                .entries
                .insert(kind.name().to_string(), kind.function());
        }
        registry
    }

    /// Register a perturbation under `name`
    ///
    /// Rejects empty names and names that are already registered.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        function: PerturbationFn,
    ) -> Result<(), PerturbationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PerturbationError::Registration {
                name,
                reason: "name is empty",
            });
        }
        if self.entries.contains_key(&name) {
            return Err(PerturbationError::Registration {
                name,
                reason: "name already registered",
            });
        }
        tracing::debug!("Registered perturbation '{}'", name);
        self.entries.insert(name, function);
        Ok(())
    }

    /// Look up a perturbation
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<PerturbationFn> {
        self.entries.get(name).copied()
    }

    /// Look up a perturbation, failing with a lookup error
    pub fn resolve(&self, name: &str) -> Result<PerturbationFn, ScenarioError> {
        self.get(name).ok_or_else(|| ScenarioError::UnknownPerturbation {
            name: name.to_string(),
        })
    }

    /// Check if perturbation exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names, sorted
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Number of registered perturbations
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PerturbationRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Decode a parameter mapping into a typed parameter struct
///
/// Parameter structs use `deny_unknown_fields`, so unrecognized keys are
/// reported as [`PerturbationError::InvalidParams`].
pub fn decode_params<T: DeserializeOwned>(
    perturbation: &'static str,
    params: &PerturbationParams,
) -> Result<T, PerturbationError> {
    serde_json::from_value(Value::Object(params.clone()))
        .map_err(|e| PerturbationError::invalid_params(perturbation, e.to_string()))
}
