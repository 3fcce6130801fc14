//! Common test setup functions.

use api::{router, state::AppState};
use axum::Router;
use axum_test::TestServer;
use serde_json::Value;
use std::sync::Arc;
use store::StoreClient;
use upstream::StatsSource;

use crate::mocks::MockSource;

/// Test context with a mock upstream and an in-memory store.
///
/// This provides the same production code paths by:
/// - Using the real Axum router with all middleware
/// - Using MockSource which implements the StatsSource trait
/// - Using a private in-memory SQLite database per context
pub struct TestContext {
    pub store: Arc<StoreClient>,
    pub mock_source: Arc<MockSource>,
    pub router: Router,
}

impl TestContext {
    /// Create a new test context with all components initialized.
    pub async fn new() -> Self {
        Self::with_payload(crate::fixtures::payload(Vec::new())).await
    }

    /// Create a context whose upstream serves `payload`.
    pub async fn with_payload(payload: Value) -> Self {
        let store = Arc::new(
            StoreClient::in_memory()
                .await
                .expect("Failed to open in-memory store"),
        );

        let mock_source = Arc::new(MockSource::new(payload));

        let state = AppState::new(mock_source.clone() as Arc<dyn StatsSource>, store.clone());
        let router = router(state);

        Self {
            store,
            mock_source,
            router,
        }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router.clone()).expect("Failed to create test server")
    }

    /// Runs `/api/fetch-data` and returns the stored count.
    pub async fn ingest(&self, server: &TestServer) -> u64 {
        let response = server.get("/api/fetch-data").await;
        response.assert_status_ok();
        let body: Value = response.json();
        body["records_count"].as_u64().unwrap_or_default()
    }

    /// Set the mock upstream to fail (for error testing).
    pub fn set_upstream_failure(&self, should_fail: bool) {
        self.mock_source.set_should_fail(should_fail);
    }
}
