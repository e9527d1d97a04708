//! Filter criteria: per-column text filters, date range and price range.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use crate::column::ColumnRegistry;
use crate::model::MISSING_TEXT;
use crate::model::Record;

/// Per-column "contains" filters, keyed by column id.
///
/// Setting an empty value keeps the entry but removes the constraint, the
/// same way the control panel clears a text box.
///
/// # Example
///
/// ```
/// use datagrid_lib::view::FilterMap;
///
/// let mut filters = FilterMap::new();
/// filters.set("category", "elec");
/// filters.set("name", "");
///
/// assert_eq!(filters.len(), 2);
/// assert_eq!(filters.active().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterMap {
    entries: BTreeMap<String, String>,
}

impl FilterMap {
    /// Creates an empty filter map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts the filter text for a column.
    pub fn set(&mut self, column_id: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(column_id.into(), value.into());
    }

    /// Returns the filter text for a column, if an entry exists.
    pub fn get(&self, column_id: &str) -> Option<&str> {
        self.entries.get(column_id).map(|s| s.as_str())
    }

    /// Iterates over all entries, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterates over the entries that constrain rows.
    pub fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(_, value)| !value.is_empty())
    }

    /// Returns the number of entries, including empty ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A `createdAt` window, exclusive at both ends.
///
/// The range only constrains rows when both bounds are set; a single bound
/// on its own has no effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }

    /// Creates a range with both bounds set.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Creates an unconstrained range.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Returns the bounds if the range constrains rows.
    pub fn bounds(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        self.start.zip(self.end)
    }

    /// Returns `true` if the range constrains rows.
    pub fn is_active(&self) -> bool {
        self.bounds().is_some()
    }

    /// Returns `true` if a timestamp passes the range.
    ///
    /// A missing timestamp only passes an inactive range.
    pub fn contains(&self, at: Option<DateTime<Utc>>) -> bool {
        match self.bounds() {
            None => true,
            Some((start, end)) => at.is_some_and(|at| start < at && at < end),
        }
    }
}

/// An inclusive `price` window. Always active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    /// Creates a range from its bounds.
    pub fn new(min: impl Into<Decimal>, max: impl Into<Decimal>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Returns `true` if a price passes the range.
    ///
    /// A missing or unparsable price never passes.
    pub fn contains(&self, price: Option<Decimal>) -> bool {
        price.is_some_and(|price| self.min <= price && price <= self.max)
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(0, 1000)
    }
}

/// Returns the text a column shows for a record.
///
/// Column ids missing from the registry read as [`MISSING_TEXT`].
pub fn column_text<'r>(record: &'r Record, registry: &ColumnRegistry, column_id: &str) -> Cow<'r, str> {
    match registry.field(column_id) {
        Some(field) => record.display_text(field),
        None => Cow::Borrowed(MISSING_TEXT),
    }
}

/// Lowercased filter texts, prepared once per derivation.
#[derive(Debug)]
pub(crate) struct TextMatcher<'a> {
    columns: Vec<(&'a str, String)>,
    global: Option<String>,
}

impl<'a> TextMatcher<'a> {
    pub(crate) fn new(filters: &'a FilterMap, global_filter: &str) -> Self {
        Self {
            columns: filters
                .active()
                .map(|(id, value)| (id, value.to_lowercase()))
                .collect(),
            global: (!global_filter.is_empty()).then(|| global_filter.to_lowercase()),
        }
    }

    /// Every active column filter matches.
    pub(crate) fn matches_columns(&self, record: &Record, registry: &ColumnRegistry) -> bool {
        self.columns.iter().all(|(id, needle)| {
            column_text(record, registry, id)
                .to_lowercase()
                .contains(needle.as_str())
        })
    }

    /// Any present field matches the global filter, if one is set.
    pub(crate) fn matches_global(&self, record: &Record) -> bool {
        let Some(needle) = &self.global else {
            return true;
        };
        record
            .present_fields()
            .any(|field| record.display_text(field).to_lowercase().contains(needle.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::model::Field;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_date_range_is_exclusive() {
        let range = DateRange::between(day(1), day(10));
        assert!(!range.contains(Some(day(1))));
        assert!(range.contains(Some(day(5))));
        assert!(!range.contains(Some(day(10))));
        assert!(!range.contains(None));
    }

    #[test]
    fn test_date_range_needs_both_bounds() {
        let range = DateRange::new(Some(day(5)), None);
        assert!(!range.is_active());
        assert!(range.contains(Some(day(1))));
        assert!(range.contains(None));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let range = PriceRange::new(100, 1000);
        assert!(range.contains(Some(Decimal::new(100, 0))));
        assert!(range.contains(Some(Decimal::new(1000, 0))));
        assert!(!range.contains(Some(Decimal::new(9999, 2))));
        assert!(!range.contains(None));
    }

    #[test]
    fn test_column_text_unknown_column() {
        let record = Record::new().set(Field::Name, "Mug");
        let registry = ColumnRegistry::catalog();
        assert_eq!(column_text(&record, &registry, "name"), "Mug");
        assert_eq!(column_text(&record, &registry, "sku"), MISSING_TEXT);
    }

    #[test]
    fn test_matcher_is_case_insensitive() {
        let record = Record::new()
            .set(Field::Name, "Phone")
            .set(Field::Category, "Electronics");
        let registry = ColumnRegistry::catalog();

        let mut filters = FilterMap::new();
        filters.set("category", "TRON");
        let matcher = TextMatcher::new(&filters, "ELEC");
        assert!(matcher.matches_columns(&record, &registry));
        assert!(matcher.matches_global(&record));

        let matcher = TextMatcher::new(&filters, "kitchen");
        assert!(!matcher.matches_global(&record));
    }

    #[test]
    fn test_global_filter_ignores_absent_fields() {
        let record = Record::new().set(Field::Name, "Mug");
        let filters = FilterMap::new();
        let matcher = TextMatcher::new(&filters, "undefined");
        assert!(!matcher.matches_global(&record));
    }
}
