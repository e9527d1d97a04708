//! Custom serialization for Record.
//!
//! Records serialize as a flat JSON object keyed by accessor key, in field
//! order. Deserialization accepts the same shape:
//! - known keys must hold a scalar (`null`, bool, number, string);
//! - unknown keys are skipped, so a source file may carry extra columns.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Field;
use super::Record;
use super::Value;
use crate::error::DatasetError;
use crate::error::json_type_name;

// =============================================================================
// Serialization
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.key(), value)?;
        }
        map.end()
    }
}

// =============================================================================
// Deserialization
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a catalog record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();

        while let Some(key) = map.next_key::<String>()? {
            let json: serde_json::Value = map.next_value()?;
            let Ok(field) = key.parse::<Field>() else {
                log::trace!("[dataset] skipping unknown key '{}'", key);
                continue;
            };
            match json_value_to_value(json) {
                Ok(value) => record.insert(field, value),
                Err(actual) => {
                    return Err(de::Error::custom(format!(
                        "field '{}' must be a scalar, got {}",
                        field, actual
                    )));
                }
            }
        }

        Ok(record)
    }
}

impl Record {
    /// Builds a record from one element of a dataset array.
    ///
    /// `index` is the element's position and is only used for error reports.
    pub(crate) fn from_json_object(
        index: usize,
        object: serde_json::Map<String, serde_json::Value>,
    ) -> Result<Record, DatasetError> {
        let mut record = Record::new();

        for (key, json) in object {
            let Ok(field) = key.parse::<Field>() else {
                log::trace!("[dataset] record {} skipping unknown key '{}'", index, key);
                continue;
            };
            let value = json_value_to_value(json)
                .map_err(|actual| DatasetError::non_scalar(index, field, actual))?;
            record.insert(field, value);
        }

        Ok(record)
    }
}

/// Converts a scalar serde_json::Value to our Value enum.
///
/// Returns the JSON type name for arrays and objects.
fn json_value_to_value(json: serde_json::Value) -> Result<Value, &'static str> {
    match json {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_json::Value::Number(n) => Ok(n.as_f64().map(Value::Number).unwrap_or(Value::Null)),
        serde_json::Value::String(s) => Ok(Value::Text(s)),
        other => Err(json_type_name(&other)),
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn test_serialize_uses_accessor_keys() {
        let record = Record::new()
            .set(Field::Name, "Mug")
            .set(Field::SalePrice, 4.5);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"name":"Mug","sale_price":4.5}"#);
    }

    #[test]
    fn test_deserialize_simple_fields() {
        let json = r#"{"name": "Mug", "price": "9.99", "createdAt": "2023-01-02"}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.display_text(Field::Name), "Mug");
        assert_eq!(record.price(), Some(Decimal::new(999, 2)));
        assert!(record.created_at().is_some());
    }

    #[test]
    fn test_deserialize_skips_unknown_keys() {
        let json = r#"{"id": 7, "name": "Mug"}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.len(), 1);
        assert_eq!(record.display_text(Field::Name), "Mug");
    }

    #[test]
    fn test_deserialize_rejects_nested_values() {
        let json = r#"{"category": ["a", "b"]}"#;
        let err = serde_json::from_str::<Record>(json).unwrap_err();
        assert!(err.to_string().contains("must be a scalar"));
    }

    #[test]
    fn test_from_json_object_reports_index() {
        let object = serde_json::json!({"price": {"amount": 3}});
        let serde_json::Value::Object(object) = object else {
            unreachable!()
        };

        let err = Record::from_json_object(4, object).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::NonScalar {
                index: 4,
                field: Field::Price,
                actual: "object"
            }
        ));
    }
}
