//! Catalog field keys

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::FieldError;

/// A field of a catalog record.
///
/// Records are keyed by this closed set instead of arbitrary strings, so
/// filters, sorting and grouping always operate on known fields. Each field
/// has the accessor key it is stored under in the source JSON.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::Field;
///
/// let field: Field = "sale_price".parse().unwrap();
/// assert_eq!(field, Field::SalePrice);
/// assert_eq!(Field::CreatedAt.key(), "createdAt");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Category,
    Subcategory,
    CreatedAt,
    UpdatedAt,
    Price,
    #[serde(rename = "sale_price")]
    SalePrice,
}

/// How a field's value is interpreted for range checks and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Compared as case-insensitive text.
    Text,
    /// Parsed as a date/time.
    Date,
    /// Parsed as a decimal amount.
    Money,
}

impl Field {
    /// All fields in record order.
    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::Category,
        Field::Subcategory,
        Field::CreatedAt,
        Field::UpdatedAt,
        Field::Price,
        Field::SalePrice,
    ];

    /// Returns the accessor key used in the source JSON.
    pub fn key(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Category => "category",
            Field::Subcategory => "subcategory",
            Field::CreatedAt => "createdAt",
            Field::UpdatedAt => "updatedAt",
            Field::Price => "price",
            Field::SalePrice => "sale_price",
        }
    }

    /// Returns how values of this field are interpreted.
    pub fn kind(&self) -> FieldKind {
        match self {
            Field::CreatedAt | Field::UpdatedAt => FieldKind::Date,
            Field::Price | Field::SalePrice => FieldKind::Money,
            Field::Name | Field::Category | Field::Subcategory => FieldKind::Text,
        }
    }
}

impl FromStr for Field {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.key() == s)
            .ok_or_else(|| FieldError::unknown(s))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
