//! Mock implementations for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use stats_core::Result;
use std::sync::Arc;
use upstream::StatsSource;

/// Mock upstream that serves a canned payload.
///
/// Implements the same `StatsSource` trait as the real `RapidApiClient`,
/// so the router and ingestor run their production code paths without
/// reaching the network.
#[derive(Clone)]
pub struct MockSource {
    /// Payload returned by the next fetch.
    payload: Arc<Mutex<Value>>,
    /// Number of fetches served or refused.
    fetches: Arc<Mutex<usize>>,
    /// Simulate failures if set.
    should_fail: Arc<Mutex<bool>>,
}

impl MockSource {
    pub fn new(payload: Value) -> Self {
        Self {
            payload: Arc::new(Mutex::new(payload)),
            fetches: Arc::new(Mutex::new(0)),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Replace the payload served by later fetches.
    pub fn set_payload(&self, payload: Value) {
        *self.payload.lock() = payload;
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock()
    }

    /// Set failure mode for testing error handling.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

impl Default for MockSource {
    fn default() -> Self {
        Self::new(crate::fixtures::payload(Vec::new()))
    }
}

#[async_trait]
impl StatsSource for MockSource {
    async fn fetch(&self) -> Result<Value> {
        *self.fetches.lock() += 1;

        if *self.should_fail.lock() {
            return Err(stats_core::Error::fetch("Mock upstream failure"));
        }

        Ok(self.payload.lock().clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[tokio::test]
    async fn test_mock_source_serves_payload() {
        let mock = MockSource::new(fixtures::payload(vec![fixtures::entry("France", "Europe", 10)]));

        let body = mock.fetch().await.unwrap();
        assert_eq!(body["response"][0]["country"], "France");
        assert_eq!(mock.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_source_failure_mode() {
        let mock = MockSource::default();
        mock.set_should_fail(true);

        assert!(mock.fetch().await.is_err());
        assert_eq!(mock.fetch_count(), 1);
    }
}
