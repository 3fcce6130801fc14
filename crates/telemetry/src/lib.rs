//! Telemetry for the pandemic statistics service.
//!
//! Structured logging setup, process-global counters, and the component
//! health registry read by the `/health` endpoints.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
