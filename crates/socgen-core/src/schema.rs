//! Schema gate
//!
//! Checks record sequences against a JSON Schema (Draft 7). The schema is
//! compiled once at construction and never changes afterwards.
//!
//! Two entry points:
//! - [`SchemaGate::validate`] collects every violation of every record
//! - [`SchemaGate::assert_valid`] escalates to a single error carrying the
//!   first violation

use crate::error::{LoadError, SchemaError};
use crate::record::EventRecord;
use jsonschema::{Draft, JSONSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;

/// One schema violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Zero-based record index
    pub index: usize,
    /// Validator message
    pub message: String,
    /// Dot-joined path to the offending field; empty for the record itself
    pub path: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "record {}: {}", self.index, self.message)
        } else {
            write!(f, "record {} at '{}': {}", self.index, self.path, self.message)
        }
    }
}

/// Compiled schema used as an acceptance check
pub struct SchemaGate {
    schema: Value,
    compiled: JSONSchema,
}

impl SchemaGate {
    /// Compile a schema document
    pub fn new(schema: Value) -> Result<Self, SchemaError> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema)
            .map_err(|e| SchemaError::InvalidSchema(e.to_string()))?;
        Ok(Self { schema, compiled })
    }

    /// Read and compile a schema file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io_error(path, e))?;
        let schema: Value = serde_json::from_str(&content)
            .map_err(|e| LoadError::syntax_error(path, format!("JSON parse error: {e}")))?;
        Self::new(schema)
    }

    /// Schema document
    #[inline]
    #[must_use]
    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Collect all violations, ordered by record index then validator order
    #[must_use]
    pub fn validate(&self, records: &[EventRecord]) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        for (index, record) in records.iter().enumerate() {
            let instance = Value::Object(record.clone());
            let outcome = self.compiled.validate(&instance);
            if let Err(violations) = outcome {
                errors.extend(violations.map(|err| ValidationError {
                    index,
                    message: err.to_string(),
                    path: err.instance_path.clone().into_vec().join("."),
                }));
            }
        }
        if !errors.is_empty() {
            tracing::warn!(
                "{} schema violations across {} records",
                errors.len(),
                records.len()
            );
        }
        errors
    }

    /// Fail with the first violation if there is any
    pub fn assert_valid(&self, records: &[EventRecord]) -> Result<(), SchemaError> {
        let mut errors = self.validate(records);
        if errors.is_empty() {
            return Ok(());
        }
        let total = errors.len();
        Err(SchemaError::ValidationFailed {
            first: errors.swap_remove(0),
            total,
        })
    }
}

impl fmt::Debug for SchemaGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaGate")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(values: Value) -> Vec<EventRecord> {
        values
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().cloned().unwrap())
            .collect()
    }

    #[test]
    fn required_violation_reports_index() {
        let gate = SchemaGate::new(json!({"required": ["event_id"]})).unwrap();
        let errors = gate.validate(&records(json!([{"event_id": 1}, {}])));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].index, 1);
        assert!(errors[0].message.contains("event_id"));
        assert_eq!(errors[0].path, "");
    }

    #[test]
    fn assert_valid_carries_first_message() {
        let gate = SchemaGate::new(json!({"required": ["event_id"]})).unwrap();
        let input = records(json!([{"event_id": 1}, {}]));
        let first = gate.validate(&input).remove(0);

        let err = gate.assert_valid(&input).unwrap_err();
        assert!(err.to_string().contains(&first.message));
        match err {
            SchemaError::ValidationFailed { first: reported, total } => {
                assert_eq!(reported, first);
                assert_eq!(total, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn collects_all_errors_for_all_records() {
        let gate = SchemaGate::new(json!({
            "type": "object",
            "required": ["event_id", "user"],
            "properties": {"event_id": {"type": "string"}}
        }))
        .unwrap();
        let errors = gate.validate(&records(json!([
            {"event_id": 5},
            {"event_id": "ok", "user": "u"},
            {}
        ])));

        let indices: Vec<_> = errors.iter().map(|e| e.index).collect();
        assert_eq!(indices, vec![0, 0, 2, 2]);
        assert!(errors.iter().any(|e| e.path == "event_id"));
    }

    #[test]
    fn nested_paths_are_dot_joined() {
        let gate = SchemaGate::new(json!({
            "properties": {
                "host": {"properties": {"ip": {"type": "string"}}}
            }
        }))
        .unwrap();
        let errors = gate.validate(&records(json!([{"host": {"ip": 10}}])));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "host.ip");
    }

    #[test]
    fn composition_keywords() {
        let gate = SchemaGate::new(json!({
            "anyOf": [{"required": ["user"]}, {"required": ["account"]}],
            "not": {"required": ["debug"]},
            "properties": {"severity": {"enum": ["low", "high"]}}
        }))
        .unwrap();
        let errors = gate.validate(&records(json!([
            {"user": "a", "severity": "low"},
            {"severity": "mid"},
            {"account": "b", "debug": true}
        ])));
        let indices: Vec<_> = errors.iter().map(|e| e.index).collect();
        assert!(!indices.contains(&0));
        assert_eq!(indices.iter().filter(|i| **i == 1).count(), 2);
        assert_eq!(indices.iter().filter(|i| **i == 2).count(), 1);
    }

    #[test]
    fn valid_input_passes() {
        let gate = SchemaGate::new(json!({"required": ["event_id"]})).unwrap();
        let input = records(json!([{"event_id": 1}]));
        assert!(gate.validate(&input).is_empty());
        assert!(gate.assert_valid(&input).is_ok());
        assert!(gate.assert_valid(&[]).is_ok());
    }

    #[test]
    fn invalid_schema_rejected() {
        let err = SchemaGate::new(json!({"type": 12})).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchema(_)));
    }

    #[test]
    fn display_includes_path() {
        let err = ValidationError {
            index: 3,
            message: "bad".to_string(),
            path: "a.b".to_string(),
        };
        assert_eq!(err.to_string(), "record 3 at 'a.b': bad");
    }
}
