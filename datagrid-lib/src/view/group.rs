//! Grouping: group specs, synthetic group header rows and the flattening pass.

use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::filter::column_text;
use crate::column::ColumnRegistry;
use crate::model::Dataset;

/// One entry of a [`GroupSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupKey {
    /// The column id to group by.
    pub id: String,
}

/// Ordered column ids to group by.
///
/// The control panel produces zero or one key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupSpec {
    keys: Vec<GroupKey>,
}

impl GroupSpec {
    /// Creates an empty spec (no grouping).
    pub fn none() -> Self {
        Self::default()
    }

    /// Groups by a single column.
    pub fn by(id: impl Into<String>) -> Self {
        Self::none().then_by(id)
    }

    /// Adds another group-by column.
    pub fn then_by(mut self, id: impl Into<String>) -> Self {
        self.keys.push(GroupKey { id: id.into() });
        self
    }

    /// Returns the keys in order.
    pub fn keys(&self) -> &[GroupKey] {
        &self.keys
    }

    /// Iterates over the group-by column ids.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(|k| k.id.as_str())
    }

    /// Returns `true` if grouping is off.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// The value of one group-by column for a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupValue {
    pub column_id: String,
    pub text: String,
}

/// Synthetic row marking the start of a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupHeader {
    /// `group-<key>`.
    pub id: String,
    /// Group-by texts joined with the configured separator.
    pub key: String,
    /// Group-by column values shared by every member.
    pub values: Vec<GroupValue>,
    /// Member record indices in first-seen order.
    pub sub_rows: Vec<usize>,
}

impl GroupHeader {
    /// Always `true`; distinguishes headers from records in serialized output.
    pub fn is_grouped(&self) -> bool {
        true
    }

    /// Returns the number of member records.
    pub fn member_count(&self) -> usize {
        self.sub_rows.len()
    }
}

/// One entry of the derived row sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DerivedRow {
    /// A group header, followed in the sequence by its members.
    Group(GroupHeader),
    /// A dataset record, by index.
    Record(usize),
}

impl DerivedRow {
    /// Returns `true` for group headers.
    pub fn is_group(&self) -> bool {
        matches!(self, DerivedRow::Group(_))
    }

    /// Returns the dataset index of a record row.
    pub fn record_index(&self) -> Option<usize> {
        match self {
            DerivedRow::Record(index) => Some(*index),
            DerivedRow::Group(_) => None,
        }
    }

    /// Returns the header of a group row.
    pub fn as_group(&self) -> Option<&GroupHeader> {
        match self {
            DerivedRow::Group(header) => Some(header),
            DerivedRow::Record(_) => None,
        }
    }
}

/// Returns the group key of a record.
pub fn group_key(
    dataset: &Dataset,
    registry: &ColumnRegistry,
    spec: &GroupSpec,
    index: usize,
    separator: &str,
) -> String {
    let record = &dataset[index];
    spec.ids()
        .map(|id| column_text(record, registry, id))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Partitions `indices` by group key and flattens the groups.
///
/// Groups appear in order of first encounter, members keep their relative
/// order, and each header is immediately followed by its members.
pub fn group_rows(
    dataset: &Dataset,
    registry: &ColumnRegistry,
    spec: &GroupSpec,
    indices: impl IntoIterator<Item = usize>,
    separator: &str,
) -> Vec<DerivedRow> {
    let mut groups: Vec<GroupHeader> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for index in indices {
        let key = group_key(dataset, registry, spec, index, separator);
        match positions.get(&key) {
            Some(&position) => groups[position].sub_rows.push(index),
            None => {
                let record = &dataset[index];
                let values = spec
                    .ids()
                    .map(|id| GroupValue {
                        column_id: id.to_string(),
                        text: column_text(record, registry, id).into_owned(),
                    })
                    .collect();
                positions.insert(key.clone(), groups.len());
                groups.push(GroupHeader {
                    id: format!("group-{}", key),
                    key,
                    values,
                    sub_rows: vec![index],
                });
            }
        }
    }

    let member_total: usize = groups.iter().map(GroupHeader::member_count).sum();
    let mut rows = Vec::with_capacity(groups.len() + member_total);
    for header in groups {
        let members: Vec<DerivedRow> = header.sub_rows.iter().map(|&i| DerivedRow::Record(i)).collect();
        rows.push(DerivedRow::Group(header));
        rows.extend(members);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Field;
    use crate::model::Record;

    fn dataset(categories: &[&str]) -> Dataset {
        categories
            .iter()
            .map(|c| Record::new().set(Field::Category, *c))
            .collect()
    }

    #[test]
    fn test_groups_in_first_seen_order() {
        let data = dataset(&["B", "A", "B"]);
        let registry = ColumnRegistry::catalog();
        let rows = group_rows(&data, &registry, &GroupSpec::by("category"), 0..3, "|");

        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].as_group().unwrap().id, "group-B");
        assert_eq!(rows[1], DerivedRow::Record(0));
        assert_eq!(rows[2], DerivedRow::Record(2));
        assert_eq!(rows[3].as_group().unwrap().id, "group-A");
        assert_eq!(rows[4], DerivedRow::Record(1));
    }

    #[test]
    fn test_multi_column_key() {
        let data: Dataset = vec![
            Record::new().set(Field::Category, "A").set(Field::Subcategory, "x"),
            Record::new().set(Field::Category, "A"),
        ]
        .into_iter()
        .collect();
        let registry = ColumnRegistry::catalog();
        let spec = GroupSpec::by("category").then_by("subcategory");

        assert_eq!(group_key(&data, &registry, &spec, 0, "|"), "A|x");
        assert_eq!(group_key(&data, &registry, &spec, 1, "|"), "A|undefined");

        let rows = group_rows(&data, &registry, &spec, 0..2, "|");
        let header = rows[0].as_group().unwrap();
        assert_eq!(header.values.len(), 2);
        assert_eq!(header.values[1].text, "x");
        assert_eq!(header.member_count(), 1);
    }

    #[test]
    fn test_empty_input_has_no_groups() {
        let data = dataset(&[]);
        let registry = ColumnRegistry::catalog();
        let rows = group_rows(&data, &registry, &GroupSpec::by("category"), Vec::new(), "|");
        assert!(rows.is_empty());
    }
}
