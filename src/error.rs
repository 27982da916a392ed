//! Typed errors for record construction and pretty-printing.

use std::fmt;
use thiserror::Error;

/// What went wrong with a single field during record construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required field is absent.
    Missing,
    /// The field exists but has the wrong JSON type.
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    /// The value at this path should have been a JSON object.
    NotAnObject { found: &'static str },
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "field required"),
            Self::WrongType { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            Self::NotAnObject { found } => write!(f, "expected object, found {}", found),
        }
    }
}

/// A record could not be built from untyped data.
///
/// `path` names the offending field, e.g. `finalState` or
/// `transitions[1].nextState`. An empty path refers to the top-level value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("validation failed for {record} at '{path}': {kind}")]
pub struct ValidationError {
    pub record: &'static str,
    pub path: String,
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    pub fn new(record: &'static str, path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            record,
            path: path.into(),
            kind,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.kind == ValidationErrorKind::Missing
    }
}

/// Pretty-printing was handed something outside its supported input set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Unsupported type for pretty printing: {found}. Supported types: str, PromptFlow, ProcessDescription, dict"
)]
pub struct UnsupportedTypeError {
    pub found: &'static str,
}

/// Crate-level error for the pure (non-LLM) operations.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedTypeError),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Human-readable JSON type name, used in error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_message_names_path() {
        let err = ValidationError::new("PromptFlow", "finalState", ValidationErrorKind::Missing);
        let msg = err.to_string();
        assert!(msg.contains("finalState"));
        assert!(msg.contains("field required"));
        assert!(err.is_missing());
    }

    #[test]
    fn test_wrong_type_message() {
        let err = ValidationError::new(
            "PromptFlow",
            "transitions[0].event",
            ValidationErrorKind::WrongType {
                expected: "string",
                found: "number",
            },
        );
        assert_eq!(
            err.to_string(),
            "validation failed for PromptFlow at 'transitions[0].event': expected string, found number"
        );
    }

    #[test]
    fn test_unsupported_type_lists_supported_set() {
        let err = UnsupportedTypeError { found: "number" };
        let msg = err.to_string();
        assert!(msg.contains("Supported types: str, PromptFlow, ProcessDescription, dict"));
        assert!(msg.contains("number"));
    }
}
