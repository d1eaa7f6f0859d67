//! Record loader
//!
//! Parses recorded event logs into a [`RecordSequence`]:
//! - JSON documents: a single object or an array of objects
//! - NDJSON streams: one JSON value per non-blank line

use crate::error::LoadError;
use crate::record::{kind_name, retain_objects, RecordSequence};
use serde_json::Value;
use std::path::Path;

/// Input format of a record file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// Pick by file extension
    #[default]
    Auto,
    /// Single JSON document
    Json,
    /// Newline-delimited JSON
    Ndjson,
}

impl InputFormat {
    /// Resolve `Auto` against a path's extension
    #[must_use]
    pub fn resolve(self, path: &Path) -> Self {
        match self {
            Self::Auto => match path.extension().and_then(|e| e.to_str()) {
                Some("ndjson" | "jsonl") => Self::Ndjson,
                _ => Self::Json,
            },
            other => other,
        }
    }
}

/// JSON and NDJSON record loader
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordLoader;

impl RecordLoader {
    /// Load a JSON document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<RecordSequence, LoadError> {
        let path = path.as_ref();
        let content = read(path)?;
        Self::parse_json(&content, path)
    }

    /// Load an NDJSON stream from disk
    pub fn load_ndjson(path: impl AsRef<Path>) -> Result<RecordSequence, LoadError> {
        let path = path.as_ref();
        let content = read(path)?;
        Self::parse_ndjson(&content, path)
    }

    /// Load using the given format, resolving `Auto` by extension
    pub fn load_as(path: impl AsRef<Path>, format: InputFormat) -> Result<RecordSequence, LoadError> {
        let path = path.as_ref();
        match format.resolve(path) {
            InputFormat::Ndjson => Self::load_ndjson(path),
            _ => Self::load(path),
        }
    }

    /// Load choosing the format from the extension
    pub fn load_auto(path: impl AsRef<Path>) -> Result<RecordSequence, LoadError> {
        Self::load_as(path, InputFormat::Auto)
    }

    /// Parse a JSON document; `origin` is used in error messages only
    pub fn parse_json(content: &str, origin: &Path) -> Result<RecordSequence, LoadError> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| LoadError::syntax_error(origin, format!("JSON parse error: {e}")))?;

        match value {
            Value::Object(map) => Ok(vec![map]),
            Value::Array(items) => {
                let (records, dropped) = retain_objects(items);
                if dropped > 0 {
                    tracing::warn!(
                        "Dropped {} non-object elements from {}",
                        dropped,
                        origin.display()
                    );
                }
                Ok(records)
            }
            other => Err(LoadError::UnsupportedShape {
                path: origin.to_path_buf(),
                found: kind_name(&other),
            }),
        }
    }

    /// Parse an NDJSON stream; blank lines are skipped, non-objects dropped
    pub fn parse_ndjson(content: &str, origin: &Path) -> Result<RecordSequence, LoadError> {
        let mut records = RecordSequence::new();
        for (idx, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(line).map_err(|e| LoadError::LineSyntax {
                path: origin.to_path_buf(),
                line: idx + 1,
                message: e.to_string(),
            })?;
            if let Value::Object(map) = value {
                records.push(map);
            }
        }
        Ok(records)
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| LoadError::io_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn origin() -> PathBuf {
        PathBuf::from("input.json")
    }

    #[test]
    fn single_object_is_wrapped() {
        let records = RecordLoader::parse_json(r#"{"event_id": "a"}"#, &origin()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["event_id"], "a");
    }

    #[test]
    fn array_keeps_only_objects_in_order() {
        let records =
            RecordLoader::parse_json(r#"[{"n": 1}, 2, "x", null, {"n": 2}]"#, &origin()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["n"], 1);
        assert_eq!(records[1]["n"], 2);
    }

    #[test]
    fn scalar_top_level_is_format_error() {
        let err = RecordLoader::parse_json("42", &origin()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedShape { found: "number", .. }));
    }

    #[test]
    fn invalid_json_is_syntax_error() {
        let err = RecordLoader::parse_json(r#"{"a":}"#, &origin()).unwrap_err();
        assert!(matches!(err, LoadError::Syntax { .. }));
    }

    #[test]
    fn ndjson_skips_blank_lines_and_non_objects() {
        let content = "{\"n\": 1}\n\n   \n[1,2]\n{\"n\": 2}\n";
        let records = RecordLoader::parse_ndjson(content, &origin()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["n"], 2);
    }

    #[test]
    fn ndjson_reports_line_number() {
        let content = "{\"n\": 1}\n\n{broken\n";
        let err = RecordLoader::parse_ndjson(content, &origin()).unwrap_err();
        assert!(matches!(err, LoadError::LineSyntax { line: 3, .. }));
    }

    #[test]
    fn format_resolution() {
        assert_eq!(
            InputFormat::Auto.resolve(Path::new("a.ndjson")),
            InputFormat::Ndjson
        );
        assert_eq!(
            InputFormat::Auto.resolve(Path::new("a.jsonl")),
            InputFormat::Ndjson
        );
        assert_eq!(InputFormat::Auto.resolve(Path::new("a.json")), InputFormat::Json);
        assert_eq!(
            InputFormat::Json.resolve(Path::new("a.ndjson")),
            InputFormat::Json
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = RecordLoader::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
