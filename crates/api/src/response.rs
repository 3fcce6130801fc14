//! API response bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pipeline::IngestReport;
use serde::{Deserialize, Serialize};
use stats_core::{Page, StoredRecord};

/// Body of `/api/fetch-data`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FetchResponse {
    pub success: bool,
    pub message: String,
    pub records_count: usize,
    /// Present only when the batch failed and nothing was stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolled_back: Option<bool>,
}

impl From<&IngestReport> for FetchResponse {
    fn from(report: &IngestReport) -> Self {
        Self {
            success: true,
            message: format!("Successfully fetched and stored {} records", report.stored),
            records_count: report.stored,
            rolled_back: report.rolled_back.then_some(true),
        }
    }
}

/// Body of `/api/records`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordsResponse {
    pub records: Vec<StoredRecord>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub pages: u64,
}

impl From<Page<StoredRecord>> for RecordsResponse {
    fn from(page: Page<StoredRecord>) -> Self {
        Self {
            records: page.items,
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            pages: page.pages,
        }
    }
}

/// Body of `/api/continents`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ContinentsResponse {
    pub continents: Vec<String>,
}

/// Body of `/api/top-countries`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TopCountriesResponse {
    pub countries: Vec<StoredRecord>,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store_connected: bool,
    pub upstream_healthy: bool,
    pub ingestions_completed: u64,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// API error rendered as `{ "error": ... }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ErrorResponse,
}

impl ApiError {
    pub fn with_status(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            response: ErrorResponse::new(msg),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_status(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<stats_core::Error> for ApiError {
    fn from(err: stats_core::Error) -> Self {
        let status =
            StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        ApiError::with_status(status, err.to_string())
    }
}
