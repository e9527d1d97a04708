//! Dataset loading errors

use crate::model::Field;

/// Error type for loading a [`Dataset`](crate::model::Dataset) from JSON.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    /// The input is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The input could not be read.
    #[error("Failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    /// The top-level JSON value is not an array.
    #[error("Dataset must be a JSON array of records, got {actual}")]
    NotAnArray { actual: &'static str },

    /// A dataset element is not a JSON object.
    #[error("Record {index} must be a JSON object, got {actual}")]
    NotAnObject { index: usize, actual: &'static str },

    /// A known field holds an array or object instead of a scalar.
    #[error("Record {index} field '{field}' must be a scalar, got {actual}")]
    NonScalar {
        index: usize,
        field: Field,
        actual: &'static str,
    },
}

impl DatasetError {
    /// Creates a new non-scalar field error.
    pub fn non_scalar(index: usize, field: Field, actual: &'static str) -> Self {
        Self::NonScalar {
            index,
            field,
            actual,
        }
    }
}

/// Returns the JSON type name of a value, for error messages.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
