//! Shared helpers for the service's end-to-end tests.
//!
//! Tests drive the real axum router over an in-memory SQLite store, with a
//! [`mocks::MockSource`] standing in for the upstream API.

pub mod fixtures;
pub mod mocks;
pub mod setup;
