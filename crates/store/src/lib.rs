//! Relational record store for the pandemic statistics service.
//!
//! One table, one row per country, keyed by country name. Writes go
//! through [`reconcile`], which wraps a whole batch in one transaction;
//! reads go through the functions in [`query`].

pub mod client;
pub mod config;
pub mod entity;
pub mod health;
pub mod query;
pub mod reconcile;
pub mod schema;

pub use client::*;
pub use config::*;
pub use query::*;
pub use reconcile::*;
