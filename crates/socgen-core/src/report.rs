//! Summary reports over record sequences

use crate::error::SerializeError;
use crate::record::{EventRecord, RecordSequence};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Number of most frequent ids kept in a report
pub const TOP_EVENT_IDS: usize = 5;

/// Number of records copied into a report
pub const SAMPLE_EVENTS: usize = 3;

/// Fields inspected by the reporter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Field whose absence counts as a missing timestamp
    pub timestamp_field: String,
    /// Field holding the event id
    pub id_field: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timestamp_field: "@timestamp".to_string(),
            id_field: "event_id".to_string(),
        }
    }
}

/// Aggregate statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Record count
    pub num_events: usize,
    /// Records without the timestamp field
    pub missing_timestamps: usize,
    /// Distinct non-null ids
    pub unique_event_ids: usize,
    /// Most frequent ids with counts; ties keep first-seen order
    pub top_event_ids: Vec<(String, usize)>,
    /// Leading records, unmodified
    pub sample_events: RecordSequence,
}

impl Report {
    /// Write as pretty-printed JSON
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), SerializeError> {
        crate::scenario::write_pretty(path.as_ref(), self)
    }
}

/// Compute a report over `events`
#[must_use]
pub fn basic_report(events: &[EventRecord], config: &ReportConfig) -> Report {
    let missing_timestamps = events
        .iter()
        .filter(|e| !e.contains_key(&config.timestamp_field))
        .count();

    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for id in events.iter().filter_map(|e| e.get(&config.id_field)) {
        if let Some(key) = id_key(id) {
            *counts.entry(key).or_insert(0) += 1;
        }
    }
    let unique_event_ids = counts.len();

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    // stable: equal counts stay in first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(TOP_EVENT_IDS);

    Report {
        num_events: events.len(),
        missing_timestamps,
        unique_event_ids,
        top_event_ids: ranked,
        sample_events: events.iter().take(SAMPLE_EVENTS).cloned().collect(),
    }
}

/// Stringified id; strings are used verbatim, other values as compact JSON
fn id_key(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
