//! Ingestion pipeline: upstream fetch, normalization, reconciliation.

pub mod ingestor;

pub use ingestor::*;
