//! Column registry errors

/// Error type for building a [`ColumnRegistry`](crate::column::ColumnRegistry).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// A registry needs at least one column.
    #[error("Column registry is empty")]
    Empty,

    /// Two descriptors share the same column id.
    #[error("Duplicate column id '{id}'")]
    DuplicateColumn { id: String },
}

impl RegistryError {
    /// Creates a new duplicate column error.
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateColumn { id: id.into() }
    }
}
