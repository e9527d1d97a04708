//! View configuration errors

/// Error type for validating a [`ViewConfig`](crate::view::ViewConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration is not valid JSON for a `ViewConfig`.
    #[error("Invalid view config: {0}")]
    Json(#[from] serde_json::Error),

    /// Page sizes must be greater than zero.
    #[error("Page size must be greater than zero")]
    InvalidPageSize,

    /// The group key separator must not be empty.
    #[error("Group key separator must not be empty")]
    EmptySeparator,

    /// The price range has `min` greater than `max`.
    #[error("Price range minimum {min} exceeds maximum {max}")]
    InvertedPriceRange { min: String, max: String },
}
