//! Error types for socgen
//!
//! Provides error handling for:
//! - Load operations (file → records)
//! - Perturbation parameter handling
//! - Scenario runs (lookup and step failures)
//! - Schema gate construction and assertion
//! - Pipeline configuration

use std::path::PathBuf;

/// Errors while loading records or scenario files (format errors)
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document is not valid JSON
    #[error("syntax error in {path}: {message}")]
    Syntax { path: PathBuf, message: String },

    /// NDJSON line is not valid JSON
    #[error("syntax error in {path} at line {line}: {message}")]
    LineSyntax {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Top-level JSON value is neither an object nor an array
    #[error("unsupported JSON format: {path} (top-level {found})")]
    UnsupportedShape { path: PathBuf, found: &'static str },

    /// Scenario description is not valid YAML or has the wrong shape
    #[error("invalid scenario description {path}: {message}")]
    Scenario { path: PathBuf, message: String },
}

impl LoadError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create syntax error for path
    pub fn syntax_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Syntax {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Errors raised by a single perturbation invocation
#[derive(Debug, thiserror::Error)]
pub enum PerturbationError {
    /// Parameter mapping did not match the perturbation's keyword arguments
    #[error("invalid parameters for '{perturbation}': {message}")]
    InvalidParams {
        perturbation: &'static str,
        message: String,
    },

    /// Name was empty or already taken at registration
    #[error("cannot register perturbation '{name}': {reason}")]
    Registration { name: String, reason: &'static str },
}

impl PerturbationError {
    /// Create invalid parameters error
    pub fn invalid_params(perturbation: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParams {
            perturbation,
            message: message.into(),
        }
    }
}

/// Errors aborting a scenario run
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    /// Perturbation name not present in the registry
    #[error("unknown perturbation: '{name}'")]
    UnknownPerturbation { name: String },

    /// A step failed while transforming records
    #[error("step {step} ('{name}') failed: {source}")]
    StepFailed {
        step: usize,
        name: String,
        #[source]
        source: PerturbationError,
    },

    /// Scenario description could not be read
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl ScenarioError {
    /// Check if error is a lookup failure
    #[inline]
    #[must_use]
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::UnknownPerturbation { .. })
    }
}

/// Errors from the schema gate
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Schema document is not a valid Draft-7 schema
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// Schema file could not be read
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Records violated the schema; carries the first violation only
    #[error("schema validation failed ({total} violations): {first}")]
    ValidationFailed {
        first: crate::schema::ValidationError,
        total: usize,
    },
}

/// Errors in pipeline configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config
    #[error("io error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config is not valid TOML
    #[error("invalid config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Required setting missing
    #[error("missing required setting: {0}")]
    Missing(&'static str),
}

/// Errors while writing results (egress)
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// Value could not be rendered as JSON
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error during file write
    #[error("io error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SerializeError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Combined socgen error
#[derive(Debug, thiserror::Error)]
pub enum SocgenError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    #[error("perturbation error: {0}")]
    Perturbation(#[from] PerturbationError),

    #[error("scenario error: {0}")]
    Scenario(#[from] ScenarioError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialize error: {0}")]
    Serialize(#[from] SerializeError),
}

/// Result type alias for socgen operations
pub type SocgenResult<T> = Result<T, SocgenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_perturbation_display() {
        let err = ScenarioError::UnknownPerturbation {
            name: "nonexistent".to_string(),
        };
        assert_eq!(err.to_string(), "unknown perturbation: 'nonexistent'");
        assert!(err.is_lookup());
    }

    #[test]
    fn unsupported_shape_display() {
        let err = LoadError::UnsupportedShape {
            path: PathBuf::from("events.json"),
            found: "number",
        };
        assert!(err.to_string().contains("unsupported JSON format"));
    }

    #[test]
    fn step_failure_is_not_lookup() {
        let err = ScenarioError::StepFailed {
            step: 0,
            name: "identity_shift".to_string(),
            source: PerturbationError::invalid_params("identity_shift", "empty suffix_pool"),
        };
        assert!(!err.is_lookup());
        assert!(err.to_string().contains("empty suffix_pool"));
    }

    #[test]
    fn error_conversions() {
        let load_err = LoadError::syntax_error("a.json", "eof");
        let err: SocgenError = load_err.into();
        assert!(matches!(err, SocgenError::Load(_)));
    }
}
