//! Core types, normalization, and query vocabulary for the pandemic
//! statistics service.

pub mod error;
pub mod limits;
pub mod normalize;
pub mod query;
pub mod record;

pub use error::{Error, Result};
pub use normalize::*;
pub use query::*;
pub use record::*;
