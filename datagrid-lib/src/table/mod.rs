//! Renderer-facing projection of a [`ViewState`].
//!
//! A [`TableView`] is what a table widget draws: the visible headers with
//! their sort indicators, then one page of rows. Sorting happens here, after
//! derivation:
//!
//! - without grouping, records are sorted as a whole;
//! - with grouping, groups keep first-seen order and each group's members
//!   are sorted among themselves.
//!
//! Members of collapsed groups are left out before paginating, so the
//! page count follows what is actually shown.

mod page;

use std::borrow::Cow;

pub use page::PageInfo;
pub use page::Pagination;

use crate::column::ColumnDescriptor;
use crate::model::Record;
use crate::view::DerivedRow;
use crate::view::Direction;
use crate::view::GroupHeader;
use crate::view::ViewState;

/// A visible column with its current sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub column: &'a ColumnDescriptor,
    pub sort: Option<Direction>,
}

/// One row of a rendered page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TableRow<'a> {
    /// A group header row.
    Group {
        header: &'a GroupHeader,
        expanded: bool,
    },
    /// A record row.
    Record {
        /// Dataset index of the record.
        index: usize,
        record: &'a Record,
        /// `true` when the record is shown under a group header.
        grouped: bool,
    },
}

impl<'a> TableRow<'a> {
    /// Returns the cell text of a record row, or `None` for a group header.
    pub fn cell(&self, column: &ColumnDescriptor) -> Option<Cow<'a, str>> {
        match *self {
            TableRow::Record { record, .. } => Some(record.display_text(column.accessor_key)),
            TableRow::Group { .. } => None,
        }
    }

    /// Returns the record, if this is a record row.
    pub fn record(&self) -> Option<&'a Record> {
        match *self {
            TableRow::Record { record, .. } => Some(record),
            TableRow::Group { .. } => None,
        }
    }
}

/// One page of a table, ready to render.
#[derive(Debug, Clone)]
pub struct TableView<'a> {
    headers: Vec<Header<'a>>,
    rows: Vec<TableRow<'a>>,
    page: PageInfo,
}

impl<'a> TableView<'a> {
    /// Projects the current page of a view.
    pub fn from_state(state: &'a ViewState) -> Self {
        let headers = state
            .visible_columns()
            .map(|column| Header {
                column,
                sort: state.sorting().direction_of(&column.id),
            })
            .collect();

        let ordered = ordered_rows(state);
        let pagination = state.pagination();
        let page = pagination.info(ordered.len());
        let range = pagination.range(ordered.len());
        log::trace!(
            "[table] page {}/{} rows {:?} of {}",
            page.page_index + 1,
            page.page_count,
            range,
            page.total_rows
        );
        let rows = ordered[range].to_vec();

        Self {
            headers,
            rows,
            page,
        }
    }

    /// Returns the visible headers in column order.
    pub fn headers(&self) -> &[Header<'a>] {
        &self.headers
    }

    /// Returns the rows of this page.
    pub fn rows(&self) -> &[TableRow<'a>] {
        &self.rows
    }

    /// Returns the page metadata.
    pub fn page(&self) -> PageInfo {
        self.page
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the number of rows on this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Sorted, collapse-aware rows across all pages.
fn ordered_rows(state: &ViewState) -> Vec<TableRow<'_>> {
    let dataset = state.dataset();
    let registry = state.registry();
    let sorting = state.sorting();

    let sort = move |indices: &mut Vec<usize>| {
        if !sorting.is_empty() {
            indices.sort_by(|a, b| sorting.compare(registry, &dataset[*a], &dataset[*b]));
        }
    };
    let record_row = move |index: usize, grouped: bool| TableRow::Record {
        index,
        record: &dataset[index],
        grouped,
    };

    let derived = state.rows();
    let mut rows = Vec::with_capacity(derived.len());

    if state.grouping().is_empty() {
        let mut indices: Vec<usize> = derived.iter().filter_map(DerivedRow::record_index).collect();
        sort(&mut indices);
        rows.extend(indices.into_iter().map(|index| record_row(index, false)));
        return rows;
    }

    // Member rows in the derived sequence duplicate each header's sub_rows.
    for header in derived.iter().filter_map(DerivedRow::as_group) {
        let expanded = state.is_group_expanded(&header.id);
        rows.push(TableRow::Group { header, expanded });
        if expanded {
            let mut members = header.sub_rows.clone();
            sort(&mut members);
            rows.extend(members.into_iter().map(|index| record_row(index, true)));
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Dataset;
    use crate::model::Field;
    use crate::view::GroupSpec;
    use crate::view::SortSpec;

    fn view() -> ViewState {
        let dataset = Dataset::from_json_str(
            r#"[
                {"name": "Phone", "category": "Electronics", "price": "500"},
                {"name": "Mug", "category": "Kitchen", "price": "8"},
                {"name": "Radio", "category": "Electronics", "price": "45"},
                {"name": "Pan", "category": "Kitchen", "price": "30"}
            ]"#,
        )
        .unwrap();
        ViewState::with_catalog(dataset)
    }

    fn names(table: &TableView<'_>) -> Vec<String> {
        table
            .rows()
            .iter()
            .map(|row| match row {
                TableRow::Group { header, .. } => format!("[{}]", header.key),
                TableRow::Record { record, .. } => record.display_text(Field::Name).into_owned(),
            })
            .collect()
    }

    #[test]
    fn test_headers_carry_sort_direction() {
        let mut view = view();
        view.toggle_sort("price");
        view.set_column_visible("updatedAt", false);

        let table = view.table();
        assert_eq!(table.headers().len(), 6);
        let price = table.headers().iter().find(|h| h.column.id == "price").unwrap();
        assert_eq!(price.sort, Some(Direction::Asc));
        assert_eq!(table.headers()[0].sort, None);
    }

    #[test]
    fn test_sort_without_grouping() {
        let mut view = view();
        view.set_sort(SortSpec::desc("price"));
        assert_eq!(names(&view.table()), vec!["Phone", "Radio", "Pan", "Mug"]);
    }

    #[test]
    fn test_sort_within_groups() {
        let mut view = view();
        view.set_group(GroupSpec::by("category"));
        view.set_sort(SortSpec::asc("price"));
        assert_eq!(
            names(&view.table()),
            vec!["[Electronics]", "Radio", "Phone", "[Kitchen]", "Mug", "Pan"]
        );
    }

    #[test]
    fn test_collapsed_group_hides_members() {
        let mut view = view();
        view.set_group(GroupSpec::by("category"));
        view.toggle_group_expanded("group-Electronics");

        let table = view.table();
        assert_eq!(names(&table), vec!["[Electronics]", "[Kitchen]", "Mug", "Pan"]);
        assert!(matches!(table.rows()[0], TableRow::Group { expanded: false, .. }));
        assert_eq!(table.page().total_rows, 4);
    }

    #[test]
    fn test_pagination_slices_rows() {
        let mut view = view();
        view.set_page_size(3);
        view.set_page_index(1);

        let table = view.table();
        assert_eq!(names(&table), vec!["Pan"]);
        assert_eq!(table.page().page_count, 2);
        assert!(!table.page().has_next());
    }

    #[test]
    fn test_cell_text() {
        let view = view();
        let table = view.table();
        let column = view.registry().get("price").unwrap();
        assert_eq!(table.rows()[1].cell(column).unwrap(), "8");
    }
}
