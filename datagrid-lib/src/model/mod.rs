//! Typed models

mod dataset;
mod field;
mod record;
mod record_serde;
mod value;

pub use dataset::*;
pub use field::*;
pub use record::*;
pub use value::*;
