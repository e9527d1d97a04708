//! Column descriptors and the static column registry.
//!
//! The registry is fixed when a view is built. It maps the column ids used
//! by the control panel and the renderer to record [`Field`]s.

use serde::Deserialize;
use serde::Serialize;

use crate::error::RegistryError;
use crate::model::Field;

/// Static metadata describing one displayable/filterable column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    /// Unique column id.
    pub id: String,
    /// Header label shown by the renderer.
    pub header: String,
    /// The record field this column reads.
    pub accessor_key: Field,
    /// Whether the column starts out visible.
    #[serde(default = "default_show")]
    pub show: bool,
}

fn default_show() -> bool {
    true
}

impl ColumnDescriptor {
    /// Creates a visible column.
    pub fn new(id: impl Into<String>, header: impl Into<String>, accessor_key: Field) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            accessor_key,
            show: true,
        }
    }

    /// Marks the column as initially hidden (builder pattern).
    pub fn hidden(mut self) -> Self {
        self.show = false;
        self
    }
}

/// Ordered, immutable set of column descriptors with unique ids.
///
/// # Example
///
/// ```
/// use datagrid_lib::column::ColumnRegistry;
/// use datagrid_lib::model::Field;
///
/// let registry = ColumnRegistry::catalog();
/// assert_eq!(registry.len(), 7);
/// assert_eq!(registry.get("salePrice").unwrap().accessor_key, Field::SalePrice);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRegistry {
    columns: Vec<ColumnDescriptor>,
}

impl ColumnRegistry {
    /// Creates a registry, rejecting empty or duplicate-id column lists.
    pub fn new(columns: Vec<ColumnDescriptor>) -> Result<Self, RegistryError> {
        if columns.is_empty() {
            return Err(RegistryError::Empty);
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.id == column.id) {
                return Err(RegistryError::duplicate(&column.id));
            }
        }
        Ok(Self { columns })
    }

    /// The seven catalog columns, all initially visible.
    pub fn catalog() -> Self {
        Self {
            columns: vec![
                ColumnDescriptor::new("name", "Name", Field::Name),
                ColumnDescriptor::new("category", "Category", Field::Category),
                ColumnDescriptor::new("subcategory", "Subcategory", Field::Subcategory),
                ColumnDescriptor::new("createdAt", "Created At", Field::CreatedAt),
                ColumnDescriptor::new("updatedAt", "Updated At", Field::UpdatedAt),
                ColumnDescriptor::new("price", "Price", Field::Price),
                ColumnDescriptor::new("salePrice", "Sale Price", Field::SalePrice),
            ],
        }
    }

    /// Returns the descriptor with the given id.
    pub fn get(&self, id: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.id == id)
    }

    /// Returns the field read by the column with the given id.
    pub fn field(&self, id: &str) -> Option<Field> {
        self.get(id).map(|c| c.accessor_key)
    }

    /// Returns `true` if a column with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Iterates over the descriptors in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, ColumnDescriptor> {
        self.columns.iter()
    }

    /// Iterates over the column ids in registry order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.id.as_str())
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Always `false`; an empty registry cannot be built.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for ColumnRegistry {
    fn default() -> Self {
        Self::catalog()
    }
}

impl<'a> IntoIterator for &'a ColumnRegistry {
    type Item = &'a ColumnDescriptor;
    type IntoIter = std::slice::Iter<'a, ColumnDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_in_order() {
        let registry = ColumnRegistry::catalog();
        let ids: Vec<&str> = registry.ids().collect();
        assert_eq!(
            ids,
            vec![
                "name",
                "category",
                "subcategory",
                "createdAt",
                "updatedAt",
                "price",
                "salePrice"
            ]
        );
    }

    #[test]
    fn test_reject_duplicate_ids() {
        let err = ColumnRegistry::new(vec![
            ColumnDescriptor::new("name", "Name", Field::Name),
            ColumnDescriptor::new("name", "Title", Field::Name),
        ])
        .unwrap_err();
        assert_eq!(err, RegistryError::duplicate("name"));
    }

    #[test]
    fn test_reject_empty() {
        assert_eq!(ColumnRegistry::new(Vec::new()), Err(RegistryError::Empty));
    }

    #[test]
    fn test_descriptor_deserialize() {
        let json = r#"{"id": "salePrice", "header": "Sale Price", "accessorKey": "sale_price"}"#;
        let column: ColumnDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(column.accessor_key, Field::SalePrice);
        assert!(column.show);
    }
}
