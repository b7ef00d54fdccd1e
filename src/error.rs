//! Error types for schema inference
//!
//! This module defines the error hierarchy for the whole engine.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Engine errors are scoped to a single case: a batch run records them
//! against the failing case and keeps going.

use crate::schema::JsonType;
use thiserror::Error;

/// The main error type for the inference engine
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Inference Errors
    // ============================================================================
    #[error("Unsupported root type: expected object, found {found}")]
    UnsupportedRootType { found: JsonType },

    #[error("Maximum nesting depth ({max_depth}) exceeded at '{path}'")]
    MaxDepthExceeded { max_depth: usize, path: String },

    #[error("Cannot infer a schema from an empty sample set")]
    NoSamples,

    // ============================================================================
    // Schema Document Errors
    // ============================================================================
    #[error("Malformed schema at '{path}': {message}")]
    MalformedSchema { path: String, message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Execution Errors
    // ============================================================================
    #[error("Validation worker failed: {message}")]
    Worker { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a malformed schema error
    pub fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedSchema {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a max depth error
    pub fn max_depth(max_depth: usize, path: impl Into<String>) -> Self {
        Self::MaxDepthExceeded {
            max_depth,
            path: path.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a worker error
    pub fn worker(message: impl Into<String>) -> Self {
        Self::Worker {
            message: message.into(),
        }
    }

    /// Check if this error belongs to a single case rather than the whole run
    pub fn is_case_local(&self) -> bool {
        matches!(
            self,
            Error::UnsupportedRootType { .. }
                | Error::MaxDepthExceeded { .. }
                | Error::MalformedSchema { .. }
                | Error::NoSamples
                | Error::Worker { .. }
        )
    }
}

/// Result type alias for the inference engine
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnsupportedRootType {
            found: JsonType::Array,
        };
        assert_eq!(
            err.to_string(),
            "Unsupported root type: expected object, found array"
        );

        let err = Error::max_depth(4, "a.b.c");
        assert_eq!(
            err.to_string(),
            "Maximum nesting depth (4) exceeded at 'a.b.c'"
        );

        let err = Error::malformed("/properties/age", "unknown type 'int'");
        assert_eq!(
            err.to_string(),
            "Malformed schema at '/properties/age': unknown type 'int'"
        );
    }

    #[test]
    fn test_is_case_local() {
        assert!(Error::UnsupportedRootType {
            found: JsonType::String
        }
        .is_case_local());
        assert!(Error::max_depth(1, "").is_case_local());
        assert!(Error::malformed("", "bad").is_case_local());
        assert!(Error::worker("panicked").is_case_local());

        assert!(!Error::config("bad").is_case_local());
        assert!(!Error::Other("x".to_string()).is_case_local());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
