//! Record listing endpoint.

use axum::{extract::State, Json};

use crate::extractors::ListParams;
use crate::response::{ApiError, RecordsResponse};
use crate::routes::served;
use crate::state::AppState;

/// GET /api/records - Filtered, sorted, paginated records.
pub async fn records_handler(
    State(state): State<AppState>,
    ListParams(query): ListParams,
) -> Result<Json<RecordsResponse>, ApiError> {
    let page = served("records", store::list_records(&state.store, &query).await)?;
    Ok(Json(RecordsResponse::from(page)))
}
