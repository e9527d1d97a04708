//! Error types

mod config;
mod dataset;
mod field;
mod registry;

pub use config::*;
pub use dataset::*;
pub use field::*;
pub use registry::*;
