//! Testing utilities for socgen workspace
//!
//! Shared fixtures: sample event logs, schemas and seeded generators.

#![allow(missing_docs)]

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use socgen_core::{EventRecord, RecordSequence};

pub const BASE_TIMESTAMP: &str = "2024-01-01T00:00:00Z";

pub fn record(value: Value) -> EventRecord {
    match value {
        Value::Object(map) => map,
        other => panic!("fixture is not an object: {other}"),
    }
}

pub fn records(values: Value) -> RecordSequence {
    match values {
        Value::Array(items) => items.into_iter().map(record).collect(),
        other => panic!("fixture is not an array: {other}"),
    }
}

/// Small Windows-style authentication log
pub fn auth_events() -> RecordSequence {
    records(json!([
        {
            "@timestamp": BASE_TIMESTAMP,
            "event_id": "4624",
            "user": "alice",
            "host": "ws-01",
            "outcome": "success"
        },
        {
            "@timestamp": "2024-01-01T00:05:00Z",
            "event_id": "4625",
            "username": "bob",
            "account": "svc_backup",
            "host": "ws-02",
            "outcome": "failure"
        },
        {
            "event_id": "4624",
            "user": "carol",
            "host": "dc-01",
            "outcome": "success"
        },
        {
            "@timestamp": "garbage",
            "event_id": null,
            "user": 1001,
            "host": "ws-03"
        }
    ]))
}

/// Draft-7 schema the auth fixture is expected to satisfy
pub fn auth_schema() -> Value {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": ["event_id", "host"],
        "properties": {
            "event_id": {"type": ["string", "null"]},
            "host": {"type": "string", "pattern": "^[a-z]+-[0-9]+$"},
            "outcome": {"enum": ["success", "failure"]}
        }
    })
}

pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn write_json(dir: &std::path::Path, name: &str, value: &Value) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

pub fn write_text(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}
