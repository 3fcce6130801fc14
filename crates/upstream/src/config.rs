//! Upstream API configuration.

use serde::{Deserialize, Serialize};
use stats_core::{Error, Result};
use url::Url;

/// Upstream statistics API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Statistics endpoint
    #[serde(default = "default_url")]
    pub url: String,
    /// Value sent as `X-RapidAPI-Key`
    #[serde(default)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_url() -> String {
    "https://covid-193.p.rapidapi.com/statistics".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl UpstreamConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Checks the endpoint is an absolute http(s) URL with a host.
    pub fn validate(&self) -> Result<Url> {
        let url = Url::parse(&self.url)
            .map_err(|e| Error::config(format!("invalid upstream url '{}': {}", self.url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "upstream url must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(Error::config("upstream url has no host"));
        }

        Ok(url)
    }

    /// Host name sent as `X-RapidAPI-Host`.
    pub fn host(&self) -> Result<String> {
        let url = self.validate()?;
        Ok(url.host_str().unwrap_or_default().to_string())
    }
}
