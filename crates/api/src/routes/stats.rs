//! Aggregate endpoints.

use axum::{extract::State, Json};
use stats_core::Statistics;

use crate::extractors::TopParams;
use crate::response::{ApiError, ContinentsResponse, TopCountriesResponse};
use crate::routes::served;
use crate::state::AppState;

/// GET /api/statistics - Store-wide totals.
pub async fn statistics_handler(
    State(state): State<AppState>,
) -> Result<Json<Statistics>, ApiError> {
    let stats = served("statistics", store::statistics(&state.store).await)?;
    Ok(Json(stats))
}

/// GET /api/continents - Distinct known continents.
pub async fn continents_handler(
    State(state): State<AppState>,
) -> Result<Json<ContinentsResponse>, ApiError> {
    let continents = served("continents", store::continents(&state.store).await)?;
    Ok(Json(ContinentsResponse { continents }))
}

/// GET /api/top-countries - Highest records by a metric.
pub async fn top_countries_handler(
    State(state): State<AppState>,
    TopParams(query): TopParams,
) -> Result<Json<TopCountriesResponse>, ApiError> {
    let countries = served("top-countries", store::top_records(&state.store, &query).await)?;
    Ok(Json(TopCountriesResponse { countries }))
}
