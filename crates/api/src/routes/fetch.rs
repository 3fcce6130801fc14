//! Ingestion trigger endpoint.

use axum::{extract::State, Json};
use tracing::error;

use crate::response::{ApiError, FetchResponse};
use crate::state::AppState;

/// GET /api/fetch-data - Pull upstream statistics into the store.
///
/// A storage failure still answers 200 with `records_count: 0` and
/// `rolled_back: true`; only a failed fetch is a 500.
pub async fn fetch_data_handler(
    State(state): State<AppState>,
) -> Result<Json<FetchResponse>, ApiError> {
    let report = state.ingestor.run().await.map_err(|e| {
        error!("Ingestion aborted: {}", e);
        ApiError::internal("Failed to fetch data from API")
    })?;

    Ok(Json(FetchResponse::from(&report)))
}
