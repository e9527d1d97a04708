//! FieldError for field key parsing

/// Error type for resolving a field from its accessor key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The accessor key does not name a catalog field.
    #[error("Unknown field '{name}'")]
    Unknown { name: String },
}

impl FieldError {
    /// Creates a new unknown field error.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::Unknown { name: name.into() }
    }
}
