//! Sort keys and record ordering.

use std::cmp::Ordering;

use serde::Deserialize;
use serde::Serialize;

use crate::column::ColumnRegistry;
use crate::model::Field;
use crate::model::FieldKind;
use crate::model::Record;

/// Sort direction for a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9, oldest first).
    Asc,
    /// Descending order (Z-A, 9-0, newest first).
    Desc,
}

/// One entry of a [`SortSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    /// The column id to sort by.
    pub id: String,
    /// `true` for descending order.
    pub desc: bool,
}

impl SortKey {
    /// Returns the direction of this key.
    pub fn direction(&self) -> Direction {
        if self.desc { Direction::Desc } else { Direction::Asc }
    }
}

/// Ordered sort keys, primary first.
///
/// The control panel only ever produces zero or one key, but the
/// representation allows secondary keys.
///
/// # Example
///
/// ```
/// use datagrid_lib::view::{Direction, SortSpec};
///
/// let spec = SortSpec::desc("price").then_asc("name");
/// assert_eq!(spec.direction_of("price"), Some(Direction::Desc));
/// assert_eq!(spec.direction_of("category"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortSpec {
    keys: Vec<SortKey>,
}

impl SortSpec {
    /// Creates an empty spec (no sorting).
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates an ascending order on a column.
    pub fn asc(id: impl Into<String>) -> Self {
        Self::none().then_asc(id)
    }

    /// Creates a descending order on a column.
    pub fn desc(id: impl Into<String>) -> Self {
        Self::none().then_desc(id)
    }

    /// Adds a secondary ascending order on a column.
    pub fn then_asc(mut self, id: impl Into<String>) -> Self {
        self.keys.push(SortKey {
            id: id.into(),
            desc: false,
        });
        self
    }

    /// Adds a secondary descending order on a column.
    pub fn then_desc(mut self, id: impl Into<String>) -> Self {
        self.keys.push(SortKey {
            id: id.into(),
            desc: true,
        });
        self
    }

    /// Returns the keys, primary first.
    pub fn keys(&self) -> &[SortKey] {
        &self.keys
    }

    /// Returns `true` if no key is set.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the direction a column is sorted in, if it is a key.
    pub fn direction_of(&self, id: &str) -> Option<Direction> {
        self.keys.iter().find(|k| k.id == id).map(SortKey::direction)
    }

    /// Returns the spec after a header click on `id`.
    ///
    /// Cycles that column through ascending, descending and unsorted. Any
    /// other key is dropped.
    pub fn toggled(&self, id: &str) -> Self {
        match self.direction_of(id) {
            None => Self::asc(id),
            Some(Direction::Asc) => Self::desc(id),
            Some(Direction::Desc) => Self::none(),
        }
    }

    /// Compares two records under this spec.
    ///
    /// Keys whose column id is not in the registry are skipped.
    pub fn compare(&self, registry: &ColumnRegistry, a: &Record, b: &Record) -> Ordering {
        self.keys
            .iter()
            .filter_map(|key| registry.field(&key.id).map(|field| (field, key.desc)))
            .map(|(field, desc)| compare_field(a, b, field, desc))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

/// Compares one field; missing or unparsable values go last in both directions.
fn compare_field(a: &Record, b: &Record, field: Field, desc: bool) -> Ordering {
    match field.kind() {
        FieldKind::Money => compare_present(a.money(field), b.money(field), desc),
        FieldKind::Date => compare_present(a.date(field), b.date(field), desc),
        FieldKind::Text => compare_present(text_key(a, field), text_key(b, field), desc),
    }
}

fn text_key(record: &Record, field: Field) -> Option<String> {
    record.get(field).map(|value| value.to_string().to_lowercase())
}

fn compare_present<T: Ord>(a: Option<T>, b: Option<T>, desc: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if desc => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
