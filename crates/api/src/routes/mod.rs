//! API routes.

pub mod fetch;
pub mod health;
pub mod records;
pub mod stats;

use axum::{routing::get, Router};
use telemetry::metrics;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use crate::response::ApiError;
use crate::state::AppState;

/// Creates the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/fetch-data", get(fetch::fetch_data_handler))
        .route("/api/records", get(records::records_handler))
        .route("/api/statistics", get(stats::statistics_handler))
        .route("/api/continents", get(stats::continents_handler))
        .route("/api/top-countries", get(stats::top_countries_handler))
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .route("/health/live", get(health::live_handler))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Counts a read query and converts its error.
pub(crate) fn served<T>(op: &'static str, result: stats_core::Result<T>) -> Result<T, ApiError> {
    match result {
        Ok(value) => {
            metrics().queries_served.inc();
            Ok(value)
        }
        Err(e) => {
            metrics().query_errors.inc();
            error!(op = op, "Query failed: {}", e);
            Err(e.into())
        }
    }
}
