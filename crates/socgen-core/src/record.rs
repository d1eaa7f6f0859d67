//! Event records
//!
//! An event record is one structured log entry: an untyped JSON object.
//! Fields referenced by perturbations and reports are optional and may
//! hold any JSON value.

use serde_json::Value;

/// One log entry
pub type EventRecord = serde_json::Map<String, Value>;

/// Ordered list of event records; order is significant
pub type RecordSequence = Vec<EventRecord>;

/// Keep only object values, preserving order
///
/// Returns the kept records and how many values were dropped.
#[must_use]
pub fn retain_objects(values: impl IntoIterator<Item = Value>) -> (RecordSequence, usize) {
    let mut dropped = 0;
    let records = values
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(map) => Some(map),
            _ => {
                dropped += 1;
                None
            }
        })
        .collect();
    (records, dropped)
}

/// JSON type name of a value, for diagnostics
#[must_use]
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
