//! View configuration

use serde::Deserialize;
use serde::Serialize;

use super::PriceRange;
use crate::error::ConfigError;

/// Defaults and tunables for a [`ViewState`](super::ViewState).
///
/// # Example
///
/// ```
/// use datagrid_lib::view::{PriceRange, ViewConfig};
///
/// let config = ViewConfig::default()
///     .with_page_size(20)
///     .with_default_price_range(PriceRange::new(0, 500));
///
/// let from_json = ViewConfig::from_json_str(r#"{"pageSize": 20}"#).unwrap();
/// assert_eq!(from_json.page_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewConfig {
    /// Price range a new view starts with.
    ///
    /// Default: `[0, 1000]`
    pub default_price_range: PriceRange,

    /// Separator between group-by values in a group key.
    ///
    /// Default: `"|"`
    pub group_key_separator: String,

    /// Rows per page a new view starts with.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Page sizes offered to the user.
    ///
    /// Default: `[10, 20, 30]`
    pub page_size_options: Vec<usize>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_price_range: PriceRange::default(),
            group_key_separator: "|".to_string(),
            page_size: 10,
            page_size_options: vec![10, 20, 30],
        }
    }
}

impl ViewConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a config from JSON. Missing keys take defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ViewConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values a view cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 || self.page_size_options.contains(&0) {
            return Err(ConfigError::InvalidPageSize);
        }
        if self.group_key_separator.is_empty() {
            return Err(ConfigError::EmptySeparator);
        }
        let range = &self.default_price_range;
        if range.min > range.max {
            return Err(ConfigError::InvertedPriceRange {
                min: range.min.to_string(),
                max: range.max.to_string(),
            });
        }
        Ok(())
    }

    /// Sets the initial price range.
    pub fn with_default_price_range(mut self, range: PriceRange) -> Self {
        self.default_price_range = range;
        self
    }

    /// Sets the group key separator.
    pub fn with_group_key_separator(mut self, separator: impl Into<String>) -> Self {
        self.group_key_separator = separator.into();
        self
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the page sizes offered to the user.
    pub fn with_page_size_options(mut self, options: Vec<usize>) -> Self {
        self.page_size_options = options;
        self
    }
}
