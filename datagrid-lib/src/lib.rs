//! Headless catalog table engine
//!
//! Column visibility, sorting, grouping with expand/collapse, global and
//! per-column text filters, a date-range filter and a price-range filter over
//! an in-memory dataset. [`view::ViewState`] holds the state and derives the
//! rows; [`table::TableView`] turns them into a page a renderer can draw.

pub mod column;
pub mod error;
pub mod model;
pub mod table;
pub mod view;

pub use column::ColumnDescriptor;
pub use column::ColumnRegistry;
pub use model::Dataset;
pub use view::ViewConfig;
pub use view::ViewState;
