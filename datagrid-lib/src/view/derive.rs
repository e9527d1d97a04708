//! The derivation pass: dataset + criteria → derived row sequence.

use serde::Deserialize;
use serde::Serialize;

use super::DateRange;
use super::DerivedRow;
use super::FilterMap;
use super::GroupSpec;
use super::PriceRange;
use super::filter::TextMatcher;
use super::group::group_rows;
use crate::column::ColumnRegistry;
use crate::model::Dataset;
use crate::model::Record;

/// Every view input that decides which rows are derived, and in which shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Criteria {
    pub date_range: DateRange,
    pub price_range: PriceRange,
    pub filters: FilterMap,
    pub global_filter: String,
    pub grouping: GroupSpec,
}

impl Criteria {
    /// Returns `true` if a record passes every active predicate.
    ///
    /// The predicates are independent, so their order does not matter.
    pub fn matches(&self, record: &Record, registry: &ColumnRegistry) -> bool {
        let matcher = TextMatcher::new(&self.filters, &self.global_filter);
        self.matches_with(&matcher, record, registry)
    }

    fn matches_with(&self, matcher: &TextMatcher<'_>, record: &Record, registry: &ColumnRegistry) -> bool {
        self.date_range.contains(record.created_at())
            && self.price_range.contains(record.price())
            && matcher.matches_columns(record, registry)
            && matcher.matches_global(record)
    }
}

/// Derives the row sequence for a dataset.
///
/// Pure: the same inputs always give the same rows, and the dataset is only
/// read. Records are filtered in dataset order; with grouping active the
/// survivors are flattened into headers and members. The result is not
/// sorted.
pub fn derive_rows(
    dataset: &Dataset,
    registry: &ColumnRegistry,
    criteria: &Criteria,
    separator: &str,
) -> Vec<DerivedRow> {
    let matcher = TextMatcher::new(&criteria.filters, &criteria.global_filter);
    let survivors = dataset
        .iter()
        .enumerate()
        .filter(|(_, record)| criteria.matches_with(&matcher, record, registry))
        .map(|(index, _)| index);

    if criteria.grouping.is_empty() {
        survivors.map(DerivedRow::Record).collect()
    } else {
        group_rows(dataset, registry, &criteria.grouping, survivors, separator)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;
    use crate::model::Field;

    fn catalog() -> Dataset {
        Dataset::from_json_str(
            r#"[
                {"name": "Phone", "category": "Electronics", "createdAt": "2024-01-05", "price": "500"},
                {"name": "Mug", "category": "Kitchen", "createdAt": "2024-01-01", "price": "100"},
                {"name": "Cable", "category": "Electronics", "createdAt": "2024-02-01", "price": "abc"},
                {"name": "Pan", "category": "Kitchen", "createdAt": "2024-01-20", "price": "40"}
            ]"#,
        )
        .unwrap()
    }

    fn indices(rows: &[DerivedRow]) -> Vec<usize> {
        rows.iter().filter_map(DerivedRow::record_index).collect()
    }

    #[test]
    fn test_default_criteria_excludes_unparsable_price() {
        let rows = derive_rows(&catalog(), &ColumnRegistry::catalog(), &Criteria::default(), "|");
        assert_eq!(indices(&rows), vec![0, 1, 3]);
    }

    #[test]
    fn test_price_lower_bound_inclusive() {
        let criteria = Criteria {
            price_range: PriceRange::new(100, 1000),
            ..Criteria::default()
        };
        let rows = derive_rows(&catalog(), &ColumnRegistry::catalog(), &criteria, "|");
        assert_eq!(indices(&rows), vec![0, 1]);
    }

    #[test]
    fn test_date_range_excludes_start() {
        let criteria = Criteria {
            date_range: DateRange::between(
                Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap(),
            ),
            ..Criteria::default()
        };
        let rows = derive_rows(&catalog(), &ColumnRegistry::catalog(), &criteria, "|");
        assert_eq!(indices(&rows), vec![0, 3]);
    }

    #[test]
    fn test_column_and_global_filters() {
        let mut criteria = Criteria::default();
        criteria.filters.set("category", "kitch");
        criteria.global_filter = "PAN".to_string();
        let rows = derive_rows(&catalog(), &ColumnRegistry::catalog(), &criteria, "|");
        assert_eq!(indices(&rows), vec![3]);
    }

    #[test]
    fn test_grouped_after_filters() {
        let criteria = Criteria {
            grouping: GroupSpec::by("category"),
            ..Criteria::default()
        };
        let rows = derive_rows(&catalog(), &ColumnRegistry::catalog(), &criteria, "|");

        assert_eq!(rows.len(), 5);
        let first = rows[0].as_group().unwrap();
        assert_eq!(first.key, "Electronics");
        assert_eq!(first.sub_rows, vec![0]);
        let second = rows[2].as_group().unwrap();
        assert_eq!(second.key, "Kitchen");
        assert_eq!(second.sub_rows, vec![1, 3]);
    }

    #[test]
    fn test_matches_agrees_with_derivation() {
        let dataset = catalog();
        let registry = ColumnRegistry::catalog();
        let mut criteria = Criteria::default();
        criteria.filters.set("name", "a");

        let expected: Vec<usize> = dataset
            .iter()
            .enumerate()
            .filter(|(_, r)| criteria.matches(r, &registry))
            .map(|(i, _)| i)
            .collect();
        let rows = derive_rows(&dataset, &registry, &criteria, "|");
        assert_eq!(indices(&rows), expected);
        assert!(dataset[3].contains(Field::Name));
    }
}
