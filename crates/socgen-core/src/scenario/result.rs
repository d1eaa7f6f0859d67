//! Scenario results and their on-disk forms

use crate::error::SerializeError;
use crate::record::RecordSequence;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Free-form result annotations
pub type Metadata = serde_json::Map<String, Value>;

/// Outcome of a scenario run
///
/// Owns its records outright; nothing in here aliases the runner's input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Transformed records
    pub events: RecordSequence,
    /// Scenario name
    pub name: String,
    /// Perturbations applied, in order, duplicates kept
    pub perturbations: Vec<String>,
    /// Caller annotations (source path, description, ...)
    pub metadata: Metadata,
}

/// Companion manifest written next to the events file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioManifest<'a> {
    /// Scenario name
    pub scenario: &'a str,
    /// Number of records
    pub num_events: usize,
    /// Perturbations applied
    pub perturbations: &'a [String],
    /// Caller annotations
    pub metadata: &'a Metadata,
}

impl ScenarioResult {
    /// Create result without metadata
    #[must_use]
    pub fn new(events: RecordSequence, name: impl Into<String>, perturbations: Vec<String>) -> Self {
        Self {
            events,
            name: name.into(),
            perturbations,
            metadata: Metadata::new(),
        }
    }

    /// With metadata entry
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_metadata(key, value);
        self
    }

    /// Add or replace a metadata entry
    pub fn insert_metadata(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.metadata.insert(key.into(), value.into());
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if there are no records
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Manifest view
    #[must_use]
    pub fn manifest(&self) -> ScenarioManifest<'_> {
        ScenarioManifest {
            scenario: &self.name,
            num_events: self.events.len(),
            perturbations: &self.perturbations,
            metadata: &self.metadata,
        }
    }

    /// Write records as a pretty-printed JSON array
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SerializeError> {
        write_pretty(path.as_ref(), &self.events)
    }

    /// Write the manifest as a pretty-printed JSON object
    pub fn write_manifest(&self, path: impl AsRef<Path>) -> Result<(), SerializeError> {
        write_pretty(path.as_ref(), &self.manifest())
    }
}

/// Pretty-print `value` to `path` as UTF-8 JSON
pub(crate) fn write_pretty<T: Serialize + ?Sized>(
    path: &Path,
    value: &T,
) -> Result<(), SerializeError> {
    let mut body = serde_json::to_string_pretty(value)?;
    body.push('\n');
    std::fs::write(path, body).map_err(|e| SerializeError::io_error(path, e))
}
