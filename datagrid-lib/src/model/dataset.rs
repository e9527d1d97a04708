//! Immutable record collection

use std::io::Read;
use std::ops::Index;

use super::Record;
use crate::error::DatasetError;
use crate::error::json_type_name;

/// The raw, unfiltered collection a view is derived from.
///
/// A dataset is validated once when it is loaded and never mutated
/// afterwards; views refer to its records by index.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::{Dataset, Field};
///
/// let dataset = Dataset::from_json_str(r#"[
///     {"name": "Mug", "category": "Kitchen", "price": "8"},
///     {"name": "Lamp", "category": "Lighting", "price": "24.5"}
/// ]"#).unwrap();
///
/// assert_eq!(dataset.len(), 2);
/// assert_eq!(dataset[1].display_text(Field::Name), "Lamp");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Creates a dataset from already-built records.
    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Loads a dataset from a JSON array of objects.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        Self::from_json_value(value)
    }

    /// Loads a dataset from a reader producing a JSON array of objects.
    pub fn from_reader(reader: impl Read) -> Result<Self, DatasetError> {
        let value: serde_json::Value = serde_json::from_reader(reader)?;
        Self::from_json_value(value)
    }

    /// Loads a dataset from a parsed JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, DatasetError> {
        let items = match value {
            serde_json::Value::Array(items) => items,
            other => {
                return Err(DatasetError::NotAnArray {
                    actual: json_type_name(&other),
                });
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match item {
                serde_json::Value::Object(object) => {
                    records.push(Record::from_json_object(index, object)?);
                }
                other => {
                    return Err(DatasetError::NotAnObject {
                        index,
                        actual: json_type_name(&other),
                    });
                }
            }
        }

        log::debug!("[dataset] loaded {} records", records.len());
        Ok(Self { records })
    }

    /// Returns all records in source order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Returns the record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Iterates over the records in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Index<usize> for Dataset {
    type Output = Record;

    fn index(&self, index: usize) -> &Record {
        &self.records[index]
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<Record> for Dataset {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;

    #[test]
    fn test_load_array_of_objects() {
        let dataset = Dataset::from_json_str(
            r#"[{"name": "Mug", "price": 8}, {"name": "Lamp", "extra": [1, 2]}]"#,
        )
        .unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset[0].display_text(Field::Price), "8");
        assert_eq!(dataset[1].len(), 1);
    }

    #[test]
    fn test_reject_non_array() {
        let err = Dataset::from_json_str(r#"{"name": "Mug"}"#).unwrap_err();
        assert!(matches!(err, DatasetError::NotAnArray { actual: "object" }));
    }

    #[test]
    fn test_reject_non_object_element() {
        let err = Dataset::from_json_str(r#"[{"name": "Mug"}, 3]"#).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::NotAnObject {
                index: 1,
                actual: "number"
            }
        ));
    }

    #[test]
    fn test_reject_invalid_json() {
        let err = Dataset::from_json_str("[{").unwrap_err();
        assert!(matches!(err, DatasetError::Json(_)));
    }

    #[test]
    fn test_from_reader() {
        let bytes = br#"[{"category": "Kitchen"}]"#;
        let dataset = Dataset::from_reader(&bytes[..]).unwrap();
        assert_eq!(dataset[0].display_text(Field::Category), "Kitchen");
    }
}
