//! Health check endpoints.

use axum::{extract::State, http::StatusCode, Json};
use telemetry::{health, metrics};

use crate::response::HealthResponse;
use crate::state::AppState;

/// Pings the store and records the result in the health registry.
async fn probe_store(state: &AppState) -> bool {
    let connected = store::health::check_connection(&state.store).await;
    if connected {
        health().store.set_healthy();
    } else {
        health().store.set_unhealthy("store ping failed");
    }
    connected
}

/// GET /health - Full health check.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_connected = probe_store(&state).await;
    let report = health().report();

    Json(HealthResponse {
        status: report.status.as_str().to_string(),
        store_connected,
        upstream_healthy: health().upstream.is_healthy(),
        ingestions_completed: metrics().ingestions_completed.get(),
    })
}

/// GET /health/ready - Readiness probe (store reachable).
pub async fn ready_handler(State(state): State<AppState>) -> StatusCode {
    probe_store(&state).await;
    if health().is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

/// GET /health/live - Liveness probe (service is running).
pub async fn live_handler() -> StatusCode {
    if health().is_alive() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}
