//! Error types for configuration resolution
//!
//! Every error is terminal for a resolution attempt: no partial configuration
//! is ever returned alongside one.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error raised by user-supplied hooks and listeners
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the resolver
#[derive(Error, Debug)]
pub enum Error {
    // === Resolution Errors ===
    #[error("Invalid value for '{field}': {reason}")]
    Validation { field: String, reason: String },

    #[error("Lifecycle hook failed: {0}")]
    Hook(#[source] BoxError),

    // === Source Errors ===
    #[error("Configuration source '{path}' not found or unreadable: {error}")]
    SourceNotFound { path: String, error: String },

    #[error("Invalid configuration file '{path}': {reason}")]
    ConfigParse { path: String, reason: String },

    #[error("Unsupported configuration format for '{0}'. Use .toml, .json, .yaml or .yml")]
    UnsupportedFormat(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error for a named field
    pub fn validation(field: &str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a validation error for a field holding the wrong type
    pub fn wrong_type(field: &str, expected: &str, found: &serde_json::Value) -> Self {
        Self::validation(
            field,
            format!("expected {}, found {}", expected, type_name(found)),
        )
    }

    /// Create a hook error from any error-like cause
    pub fn hook(cause: impl Into<BoxError>) -> Self {
        Self::Hook(cause.into())
    }

    /// Create a parse error for a source file
    pub fn config_parse(path: &str, reason: impl ToString) -> Self {
        Self::ConfigParse {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Whether this is a ValidationError
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether this is a HookError
    pub fn is_hook(&self) -> bool {
        matches!(self, Self::Hook(_))
    }
}

fn type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a sequence",
        serde_json::Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wrong_type_names_field_and_found_type() {
        let err = Error::wrong_type("videosFolder", "a path string", &json!(3));
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "Invalid value for 'videosFolder': expected a path string, found a number"
        );
    }

    #[test]
    fn test_hook_error_keeps_source() {
        let err = Error::hook("listener exploded");
        assert!(err.is_hook());
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("listener exploded"));
    }
}
