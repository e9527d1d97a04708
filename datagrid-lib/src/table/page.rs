//! Pagination state and page metadata.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// Current page position and size.
///
/// The index is kept as set; it is clamped against the row count whenever a
/// page is computed, so shrinking the row set never yields an empty page
/// past the end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_index: usize,
    pub page_size: usize,
}

impl Pagination {
    /// Creates pagination on the first page.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    /// Returns the number of pages for `total` rows; at least one.
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Returns the page index clamped to the last page.
    pub fn clamped_index(&self, total: usize) -> usize {
        self.page_index.min(self.page_count(total) - 1)
    }

    /// Returns the row range of the current page.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.clamped_index(total) * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    /// Returns page metadata for `total` rows.
    pub fn info(&self, total: usize) -> PageInfo {
        PageInfo {
            page_index: self.clamped_index(total),
            page_size: self.page_size,
            page_count: self.page_count(total),
            total_rows: total,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Metadata of the page a [`TableView`](super::TableView) holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Zero-based index of this page, after clamping.
    pub page_index: usize,
    /// Rows per page.
    pub page_size: usize,
    /// Total number of pages; at least one.
    pub page_count: usize,
    /// Rows across all pages.
    pub total_rows: usize,
}

impl PageInfo {
    /// Returns `true` if there is a page before this one.
    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    /// Returns `true` if there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page_index + 1 < self.page_count
    }
}
