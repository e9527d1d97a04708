//! The view-state reducer.
//!
//! [`ViewState`] holds the user-controlled parameters of a table and the
//! row sequence derived from them:
//!
//! - [`FilterMap`], global filter text, [`DateRange`] and [`PriceRange`]
//!   decide which records survive;
//! - [`GroupSpec`] reshapes survivors into [`GroupHeader`]s and members;
//! - [`SortSpec`] and column visibility are carried for the renderer.
//!
//! [`derive_rows`] is the pure derivation the state calls after each change.

mod config;
mod derive;
mod filter;
mod group;
mod order;
mod state;

pub use config::ViewConfig;
pub use derive::Criteria;
pub use derive::derive_rows;
pub use filter::DateRange;
pub use filter::FilterMap;
pub use filter::PriceRange;
pub use filter::column_text;
pub use group::DerivedRow;
pub use group::GroupHeader;
pub use group::GroupKey;
pub use group::GroupSpec;
pub use group::GroupValue;
pub use group::group_key;
pub use group::group_rows;
pub use order::Direction;
pub use order::SortKey;
pub use order::SortSpec;
pub use state::ViewState;
