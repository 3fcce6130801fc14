//! Tests for health check endpoints.
//!
//! The health registry is process-global, so only one test here changes
//! upstream health.

use axum::http::StatusCode;
use integration_tests::{fixtures, setup::TestContext};
use serde_json::Value;

/// Test /health endpoint returns proper structure
#[tokio::test]
async fn test_health_endpoint_structure() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();

    let status = body["status"].as_str().unwrap_or("");
    assert!(
        status == "healthy" || status == "degraded",
        "In-memory store should keep the service serving, got '{}'",
        status
    );
    assert_eq!(body["store_connected"], true);
    assert!(body["upstream_healthy"].is_boolean());
    assert!(body["ingestions_completed"].is_u64());
}

/// Test /health/ready endpoint with a reachable store
#[tokio::test]
async fn test_ready_endpoint() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    server.get("/health/ready").await.assert_status(StatusCode::OK);
}

/// Test /health/live endpoint always returns 200 when service is running
#[tokio::test]
async fn test_live_endpoint() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    server.get("/health/live").await.assert_status(StatusCode::OK);
}

/// Upstream health follows the most recent fetch
#[tokio::test]
async fn test_upstream_health_tracks_fetches() {
    let ctx = TestContext::with_payload(fixtures::payload(fixtures::countries(1))).await;
    let server = ctx.server();

    ctx.set_upstream_failure(true);
    server
        .get("/api/fetch-data")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = server.get("/health").await.json();
    assert_eq!(body["upstream_healthy"], false);
    assert_eq!(body["status"], "degraded");

    ctx.set_upstream_failure(false);
    assert_eq!(ctx.ingest(&server).await, 1);

    let body: Value = server.get("/health").await.json();
    assert_eq!(body["upstream_healthy"], true);
    assert_eq!(body["status"], "healthy");
    assert!(body["ingestions_completed"].as_u64().unwrap_or_default() >= 1);
}
