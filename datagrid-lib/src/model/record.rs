//! Catalog record

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use rust_decimal::Decimal;

use super::Field;
use super::FieldKind;
use super::Value;

/// Display text of a field that is absent from a record.
pub const MISSING_TEXT: &str = "undefined";

/// One catalog entry.
///
/// Records hold the fields present in the source as a `BTreeMap<Field, Value>`
/// so iteration follows [`Field::ALL`] order. Date and money fields are parsed
/// once, when the value is inserted; a value that does not parse stays
/// available as text but has no typed view.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{Field, Record};
///
/// let record = Record::new()
///     .set(Field::Name, "Desk Lamp")
///     .set(Field::Price, "24.50");
///
/// assert_eq!(record.display_text(Field::Name), "Desk Lamp");
/// assert_eq!(record.display_text(Field::Category), "undefined");
/// assert_eq!(record.price().map(|p| p.to_string()), Some("24.50".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub(crate) fields: BTreeMap<Field, Value>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    price: Option<Decimal>,
    sale_price: Option<Decimal>,
}

impl Record {
    /// Creates a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: Field) -> Option<&Value> {
        self.fields.get(&field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    /// Iterates over the present fields in field order.
    pub fn fields(&self) -> impl Iterator<Item = (Field, &Value)> {
        self.fields.iter().map(|(field, value)| (*field, value))
    }

    /// Returns the present fields in field order.
    pub fn present_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.keys().copied()
    }

    /// Returns the number of present fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if no field is present.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the text used for matching and grouping.
    ///
    /// Absent fields render as [`MISSING_TEXT`].
    pub fn display_text(&self, field: Field) -> Cow<'_, str> {
        match self.fields.get(&field) {
            None => Cow::Borrowed(MISSING_TEXT),
            Some(Value::Text(s)) => Cow::Borrowed(s.as_str()),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: Field, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Inserts a field value, refreshing its typed view.
    pub fn insert(&mut self, field: Field, value: impl Into<Value>) {
        let value = value.into();
        match field {
            Field::CreatedAt => self.created_at = parse_date(&value),
            Field::UpdatedAt => self.updated_at = parse_date(&value),
            Field::Price => self.price = parse_money(&value),
            Field::SalePrice => self.sale_price = parse_money(&value),
            Field::Name | Field::Category | Field::Subcategory => {}
        }
        self.fields.insert(field, value);
    }

    // =========================================================================
    // Typed getters
    //
    // Return None if the field is missing or does not parse.
    // =========================================================================

    /// Returns the parsed `createdAt` timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the parsed `updatedAt` timestamp.
    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the parsed `price`.
    pub fn price(&self) -> Option<Decimal> {
        self.price
    }

    /// Returns the parsed `sale_price`.
    pub fn sale_price(&self) -> Option<Decimal> {
        self.sale_price
    }

    /// Returns the parsed timestamp of a date field.
    pub fn date(&self, field: Field) -> Option<DateTime<Utc>> {
        match field {
            Field::CreatedAt => self.created_at,
            Field::UpdatedAt => self.updated_at,
            _ => None,
        }
    }

    /// Returns the parsed amount of a money field.
    pub fn money(&self, field: Field) -> Option<Decimal> {
        match field {
            Field::Price => self.price,
            Field::SalePrice => self.sale_price,
            _ => None,
        }
    }

    /// Returns `true` if a date or money field holds a value that parses.
    pub fn is_parsed(&self, field: Field) -> bool {
        match field.kind() {
            FieldKind::Date => self.date(field).is_some(),
            FieldKind::Money => self.money(field).is_some(),
            FieldKind::Text => self.contains(field),
        }
    }
}

/// Parses a date-like value.
///
/// Accepts RFC 3339, naive date-times (read as UTC), plain `YYYY-MM-DD`
/// dates (midnight UTC) and numeric epoch milliseconds.
pub fn parse_date(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Text(s) => parse_date_str(s.trim()),
        Value::Number(ms) if ms.is_finite() => DateTime::from_timestamp_millis(*ms as i64),
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Parses a money-like value: a JSON number or numeric text.
pub fn parse_money(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Decimal::try_from(*n).ok(),
        Value::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            Decimal::from_str(s)
                .or_else(|_| Decimal::from_scientific(s))
                .ok()
        }
        Value::Null | Value::Bool(_) => None,
    }
}
