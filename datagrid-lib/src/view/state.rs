//! The view-state holder.

use std::collections::BTreeSet;
use std::collections::HashSet;
use std::sync::Arc;

use super::Criteria;
use super::DateRange;
use super::DerivedRow;
use super::FilterMap;
use super::GroupSpec;
use super::PriceRange;
use super::SortSpec;
use super::ViewConfig;
use super::derive_rows;
use crate::column::ColumnDescriptor;
use crate::column::ColumnRegistry;
use crate::model::Dataset;
use crate::model::Record;
use crate::table::Pagination;
use crate::table::TableView;

/// Owns every user-controlled table parameter and the rows derived from them.
///
/// Each setter replaces one piece of state. Setters that affect which rows
/// are derived (filters, ranges, grouping) recompute [`rows`](Self::rows)
/// before returning; visibility and sorting do not, since they only change
/// how the renderer presents the same rows.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::Dataset;
/// use datagrid_lib::view::{GroupSpec, ViewState};
///
/// let dataset = Dataset::from_json_str(r#"[
///     {"name": "Phone", "category": "Electronics", "price": "500"},
///     {"name": "Mug", "category": "Kitchen", "price": "8"},
///     {"name": "Radio", "category": "Electronics", "price": "45"}
/// ]"#).unwrap();
///
/// let mut view = ViewState::with_catalog(dataset);
/// view.set_global_filter("elec");
/// assert_eq!(view.rows().len(), 2);
///
/// view.set_group(GroupSpec::by("category"));
/// assert_eq!(view.rows().len(), 3);
/// assert!(view.rows()[0].is_group());
/// ```
#[derive(Debug, Clone)]
pub struct ViewState {
    dataset: Arc<Dataset>,
    registry: ColumnRegistry,
    config: ViewConfig,
    visible: BTreeSet<String>,
    sorting: SortSpec,
    criteria: Criteria,
    pagination: Pagination,
    collapsed: HashSet<String>,
    rows: Vec<DerivedRow>,
}

impl ViewState {
    /// Creates a view over a dataset.
    ///
    /// Columns marked `show` start visible; the price range and page size
    /// come from `config`.
    pub fn new(dataset: impl Into<Arc<Dataset>>, registry: ColumnRegistry, config: ViewConfig) -> Self {
        let visible = registry
            .iter()
            .filter(|c| c.show)
            .map(|c| c.id.clone())
            .collect();
        let criteria = Criteria {
            price_range: config.default_price_range,
            ..Criteria::default()
        };
        let pagination = Pagination::new(config.page_size);

        let mut state = Self {
            dataset: dataset.into(),
            registry,
            config,
            visible,
            sorting: SortSpec::none(),
            criteria,
            pagination,
            collapsed: HashSet::new(),
            rows: Vec::new(),
        };
        state.recompute();
        state
    }

    /// Creates a view with the catalog columns and the default config.
    pub fn with_catalog(dataset: impl Into<Arc<Dataset>>) -> Self {
        Self::new(dataset, ColumnRegistry::catalog(), ViewConfig::default())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the dataset rows are derived from.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Returns the record at a dataset index.
    pub fn record(&self, index: usize) -> Option<&Record> {
        self.dataset.get(index)
    }

    /// Returns the column registry.
    pub fn registry(&self) -> &ColumnRegistry {
        &self.registry
    }

    /// Returns the config the view was built with.
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Returns the derived row sequence.
    pub fn rows(&self) -> &[DerivedRow] {
        &self.rows
    }

    /// Returns the current derivation inputs.
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Returns the visible columns in registry order.
    pub fn visible_columns(&self) -> impl Iterator<Item = &ColumnDescriptor> {
        self.registry.iter().filter(|c| self.visible.contains(&c.id))
    }

    /// Returns `true` if a column is visible.
    pub fn is_column_visible(&self, column_id: &str) -> bool {
        self.visible.contains(column_id)
    }

    /// Returns the sort spec.
    pub fn sorting(&self) -> &SortSpec {
        &self.sorting
    }

    /// Returns the group spec.
    pub fn grouping(&self) -> &GroupSpec {
        &self.criteria.grouping
    }

    /// Returns the per-column filters.
    pub fn filters(&self) -> &FilterMap {
        &self.criteria.filters
    }

    /// Returns the global filter text.
    pub fn global_filter(&self) -> &str {
        &self.criteria.global_filter
    }

    /// Returns the date range.
    pub fn date_range(&self) -> DateRange {
        self.criteria.date_range
    }

    /// Returns the price range.
    pub fn price_range(&self) -> PriceRange {
        self.criteria.price_range
    }

    /// Returns the pagination state.
    pub fn pagination(&self) -> Pagination {
        self.pagination
    }

    /// Returns `true` unless the group with this id was collapsed.
    pub fn is_group_expanded(&self, group_id: &str) -> bool {
        !self.collapsed.contains(group_id)
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Replaces the dataset and recomputes.
    pub fn set_dataset(&mut self, dataset: impl Into<Arc<Dataset>>) {
        self.dataset = dataset.into();
        self.recompute();
    }

    /// Shows or hides a column. Unknown ids are ignored.
    pub fn set_column_visible(&mut self, column_id: &str, visible: bool) {
        if !self.registry.contains(column_id) {
            log::debug!("[view] ignoring visibility change for unknown column '{}'", column_id);
            return;
        }
        log::trace!("[view] column '{}' visible={}", column_id, visible);
        if visible {
            self.visible.insert(column_id.to_string());
        } else {
            self.visible.remove(column_id);
        }
    }

    /// Flips a column's visibility. Unknown ids are ignored.
    pub fn toggle_column_visibility(&mut self, column_id: &str) {
        let visible = self.is_column_visible(column_id);
        self.set_column_visible(column_id, !visible);
    }

    /// Replaces the sort spec.
    pub fn set_sort(&mut self, spec: SortSpec) {
        log::trace!("[view] sorting={:?}", spec);
        self.sorting = spec;
    }

    /// Cycles a column's sort direction, as a header click does.
    pub fn toggle_sort(&mut self, column_id: &str) {
        let spec = self.sorting.toggled(column_id);
        self.set_sort(spec);
    }

    /// Replaces the group spec and recomputes.
    pub fn set_group(&mut self, spec: GroupSpec) {
        log::trace!("[view] grouping={:?}", spec);
        self.criteria.grouping = spec;
        self.recompute();
    }

    /// Sets one column's filter text and recomputes.
    ///
    /// An empty value keeps the entry but stops constraining rows.
    pub fn set_column_filter(&mut self, column_id: &str, value: impl Into<String>) {
        let value = value.into();
        log::trace!("[view] filter '{}'={:?}", column_id, value);
        self.criteria.filters.set(column_id, value);
        self.recompute();
    }

    /// Replaces the global filter text and recomputes.
    pub fn set_global_filter(&mut self, value: impl Into<String>) {
        self.criteria.global_filter = value.into();
        log::trace!("[view] global filter={:?}", self.criteria.global_filter);
        self.recompute();
    }

    /// Replaces the date range and recomputes.
    pub fn set_date_range(&mut self, range: DateRange) {
        log::trace!("[view] date range={:?}", range);
        self.criteria.date_range = range;
        self.recompute();
    }

    /// Replaces the price range and recomputes.
    pub fn set_price_range(&mut self, range: PriceRange) {
        log::trace!("[view] price range={}..={}", range.min, range.max);
        self.criteria.price_range = range;
        self.recompute();
    }

    /// Collapses an expanded group or expands a collapsed one.
    pub fn toggle_group_expanded(&mut self, group_id: &str) {
        if !self.collapsed.remove(group_id) {
            self.collapsed.insert(group_id.to_string());
        }
    }

    /// Moves to a page. Out-of-range indices are clamped when the page is built.
    pub fn set_page_index(&mut self, page_index: usize) {
        self.pagination.page_index = page_index;
    }

    /// Changes the rows per page. Zero is ignored.
    pub fn set_page_size(&mut self, page_size: usize) {
        if page_size == 0 {
            log::debug!("[view] ignoring page size 0");
            return;
        }
        self.pagination.page_size = page_size;
    }

    /// Builds the renderer-facing page for the current state.
    pub fn table(&self) -> TableView<'_> {
        TableView::from_state(self)
    }

    fn recompute(&mut self) {
        self.rows = derive_rows(
            &self.dataset,
            &self.registry,
            &self.criteria,
            &self.config.group_key_separator,
        );
        self.pagination.page_index = 0;
        log::debug!(
            "[view] derived {} rows from {} records",
            self.rows.len(),
            self.dataset.len()
        );
    }
}
