//! Tests for the aggregate endpoints: statistics, continents, top countries.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::{fixtures, setup::TestContext};
use serde_json::{json, Value};

async fn seeded(entries: Vec<Value>) -> (TestContext, TestServer) {
    let ctx = TestContext::with_payload(fixtures::payload(entries)).await;
    let server = ctx.server();
    ctx.ingest(&server).await;
    (ctx, server)
}

#[tokio::test]
async fn test_statistics_active_cases() {
    let (_ctx, server) = seeded(vec![fixtures::entry_with_totals(
        "Portugal", "Europe", 100, 10, 50,
    )])
    .await;

    let response = server.get("/api/statistics").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(
        body,
        json!({
            "total_records": 1,
            "total_cases": 100,
            "total_deaths": 10,
            "total_recovered": 50,
            "active_cases": 40
        })
    );
}

#[tokio::test]
async fn test_statistics_on_empty_store() {
    let ctx = TestContext::new().await;
    let server = ctx.server();

    let body: Value = server.get("/api/statistics").await.json();
    assert_eq!(body["total_records"], 0);
    assert_eq!(body["total_cases"], 0);
    assert_eq!(body["active_cases"], 0);
}

#[tokio::test]
async fn test_active_cases_may_go_negative() {
    let (_ctx, server) = seeded(vec![fixtures::entry_with_totals(
        "Oddland", "Europe", 10, 5, 20,
    )])
    .await;

    let body: Value = server.get("/api/statistics").await.json();
    assert_eq!(body["active_cases"], -15);
}

#[tokio::test]
async fn test_continents_are_distinct_and_known() {
    let (_ctx, server) = seeded(vec![
        fixtures::entry("Japan", "Asia", 10),
        fixtures::entry("India", "Asia", 20),
        fixtures::entry("France", "Europe", 30),
        json!({ "country": "MS-Zaandam", "continent": null }),
    ])
    .await;

    let body: Value = server.get("/api/continents").await.json();
    assert_eq!(body, json!({ "continents": ["Asia", "Europe"] }));
}

#[tokio::test]
async fn test_top_countries_limit_and_order() {
    let (_ctx, server) = seeded(fixtures::countries(5)).await;

    let response = server
        .get("/api/top-countries")
        .add_query_param("limit", 3)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    let cases: Vec<i64> = body["countries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["total_cases"].as_i64().unwrap())
        .collect();
    assert_eq!(cases, vec![500, 400, 300]);
}

#[tokio::test]
async fn test_top_countries_by_other_metric() {
    let (_ctx, server) = seeded(vec![
        fixtures::entry_with_totals("A", "Europe", 100, 9, 0),
        fixtures::entry_with_totals("B", "Europe", 900, 1, 0),
    ])
    .await;

    let body: Value = server
        .get("/api/top-countries")
        .add_query_param("metric", "total_deaths")
        .await
        .json();
    assert_eq!(body["countries"][0]["country"], "A");
}

#[tokio::test]
async fn test_top_countries_rejects_bad_params() {
    let (_ctx, server) = seeded(fixtures::countries(2)).await;

    let response = server
        .get("/api/top-countries")
        .add_query_param("metric", "nonexistent")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body.get("error").is_some());

    server
        .get("/api/top-countries")
        .add_query_param("limit", 0)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
