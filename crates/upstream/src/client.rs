//! Statistics source abstraction and its RapidAPI implementation.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use stats_core::{Error, Result};
use tracing::{debug, warn};

use crate::config::UpstreamConfig;

/// Source of raw per-country statistics payloads.
///
/// Implemented by [`RapidApiClient`] in production and by mocks in tests.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetches one full payload.
    ///
    /// Transport errors, non-2xx answers and undecodable bodies are all
    /// reported as [`Error::Fetch`].
    async fn fetch(&self) -> Result<Value>;

    /// Name for logs.
    fn name(&self) -> &str;
}

/// HTTP client for the RapidAPI statistics endpoint.
#[derive(Clone)]
pub struct RapidApiClient {
    http_client: reqwest::Client,
    url: String,
    host: String,
    api_key: Option<String>,
}

impl RapidApiClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let host = config.host()?;
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        if config.api_key.is_none() {
            warn!("No upstream API key configured; requests will be unauthenticated");
        }

        Ok(Self {
            http_client,
            url: config.url.clone(),
            host,
            api_key: config.api_key.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatsSource for RapidApiClient {
    async fn fetch(&self) -> Result<Value> {
        debug!(url = %self.url, "Fetching upstream statistics");

        let mut request = self
            .http_client
            .get(&self.url)
            .header("X-RapidAPI-Host", &self.host);
        if let Some(key) = &self.api_key {
            request = request.header("X-RapidAPI-Key", key);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Upstream request failed");
            Error::fetch(format!("upstream unavailable: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(status = %status, "Upstream returned error");
            return Err(Error::fetch(format!("upstream returned {}", status)));
        }

        response.json::<Value>().await.map_err(|e| {
            warn!(error = %e, "Failed to decode upstream body");
            Error::fetch(format!("invalid upstream body: {}", e))
        })
    }

    fn name(&self) -> &str {
        "rapidapi"
    }
}
