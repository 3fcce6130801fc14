//! Unified error types for the statistics service.
//!
//! Every failure surfaces to HTTP callers as `{ "error": <message> }`; the
//! variant only decides the status code.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the statistics service.
#[derive(Debug, Error)]
pub enum Error {
    /// Upstream statistics API could not be reached or answered non-2xx.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Relational store failure.
    #[error("database error: {0}")]
    Database(String),

    /// Caller supplied a sort or metric name that is not a record attribute.
    #[error("invalid field: {0}")]
    InvalidField(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn invalid_field(field: impl Into<String>) -> Self {
        Self::InvalidField(field.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the HTTP status code for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidField(_) => 400,
            Self::Validation(_) => 400,
            Self::Fetch(_) => 500,
            Self::Database(_) => 500,
            Self::Config(_) => 500,
            Self::Serialization(_) => 500,
            Self::Internal(_) => 500,
        }
    }

    /// Whether the caller, not the service, is at fault.
    pub fn is_caller_error(&self) -> bool {
        self.http_status() < 500
    }
}
