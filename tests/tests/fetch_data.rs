//! Tests for the `/api/fetch-data` ingestion trigger.
//!
//! The upstream is mocked; the store is a private in-memory SQLite database
//! per test.

use axum::http::StatusCode;
use integration_tests::{fixtures, setup::TestContext};
use sea_orm::ConnectionTrait;
use serde_json::Value;
use stats_core::{normalize_entry, StoredRecord};

#[tokio::test]
async fn test_fetch_stores_countries_and_skips_aggregates() {
    let ctx = TestContext::with_payload(fixtures::payload(vec![
        fixtures::entry("France", "Europe", 1000),
        fixtures::aggregate_entry(),
        fixtures::entry("Japan", "Asia", 500),
    ]))
    .await;
    let server = ctx.server();

    let response = server.get("/api/fetch-data").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["records_count"], 2);
    assert_eq!(body["message"], "Successfully fetched and stored 2 records");
    assert!(body.get("rolled_back").is_none());
    assert_eq!(ctx.mock_source.fetch_count(), 1);
}

#[tokio::test]
async fn test_repeated_fetch_is_idempotent() {
    let ctx = TestContext::with_payload(fixtures::payload(fixtures::countries(5))).await;
    let server = ctx.server();

    assert_eq!(ctx.ingest(&server).await, 5);
    let first: Value = server.get("/api/statistics").await.json();

    assert_eq!(ctx.ingest(&server).await, 5);
    let second: Value = server.get("/api/statistics").await.json();

    assert_eq!(first, second);
    assert_eq!(second["total_records"], 5);
}

#[tokio::test]
async fn test_refetch_overwrites_changed_values() {
    let ctx = TestContext::with_payload(fixtures::payload(vec![fixtures::entry(
        "France", "Europe", 1000,
    )]))
    .await;
    let server = ctx.server();
    ctx.ingest(&server).await;

    ctx.mock_source
        .set_payload(fixtures::payload(vec![fixtures::entry("France", "Europe", 4000)]));
    ctx.ingest(&server).await;

    let body: Value = server.get("/api/records").await.json();
    assert_eq!(body["total"], 1);
    assert_eq!(body["records"][0]["total_cases"], 4000);
}

#[tokio::test]
async fn test_stored_record_matches_normalized_entry() {
    let entry = fixtures::entry("South Korea", "Asia", 12345);
    let ctx = TestContext::with_payload(fixtures::payload(vec![entry.clone()])).await;
    let server = ctx.server();
    ctx.ingest(&server).await;

    let body: Value = server
        .get("/api/records")
        .add_query_param("country", "korea")
        .await
        .json();
    let stored: StoredRecord = serde_json::from_value(body["records"][0].clone()).unwrap();

    let expected = normalize_entry(&entry).unwrap().unwrap();
    assert_eq!(stored.record, expected);
    assert_eq!(stored.record.country_code, "SOU");
    assert_eq!(stored.record.new_cases, 120);
}

#[tokio::test]
async fn test_payload_without_list_stores_nothing() {
    let ctx = TestContext::with_payload(serde_json::json!({ "errors": ["quota"] })).await;
    let server = ctx.server();

    let body: Value = server.get("/api/fetch-data").await.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["records_count"], 0);
    assert!(body.get("rolled_back").is_none());
}

#[tokio::test]
async fn test_upstream_failure_returns_500() {
    let ctx = TestContext::new().await;
    ctx.set_upstream_failure(true);
    let server = ctx.server();

    let response = server.get("/api/fetch-data").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to fetch data from API");
}

#[tokio::test]
async fn test_storage_failure_reports_rollback() {
    let ctx = TestContext::with_payload(fixtures::payload(vec![
        fixtures::entry("France", "Europe", 1000),
        fixtures::entry("Poison", "Europe", 1),
    ]))
    .await;
    ctx.store
        .inner()
        .execute_unprepared(
            "CREATE TRIGGER reject_poison BEFORE INSERT ON stat_records \
             WHEN NEW.country = 'Poison' \
             BEGIN SELECT RAISE(ABORT, 'poisoned row'); END;",
        )
        .await
        .unwrap();
    let server = ctx.server();

    let response = server.get("/api/fetch-data").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["records_count"], 0);
    assert_eq!(body["rolled_back"], true);

    let stats: Value = server.get("/api/statistics").await.json();
    assert_eq!(stats["total_records"], 0);
}
