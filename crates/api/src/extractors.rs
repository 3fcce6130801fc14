//! Query-string extractors.
//!
//! Integer parameters are lenient: a value that does not parse as an
//! integer falls back to its default. Parsed values are then bounds-checked
//! and rejected with 400 when out of range.

use std::collections::HashMap;

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use stats_core::limits::{DEFAULT_PAGE, DEFAULT_PER_PAGE, DEFAULT_TOP_LIMIT};
use stats_core::{ListQuery, RecordFilter, SortField, SortOrder, TopQuery};

use crate::response::ApiError;

type RawParams = HashMap<String, String>;

async fn raw_params<S>(parts: &mut Parts, state: &S) -> Result<RawParams, ApiError>
where
    S: Send + Sync,
{
    let Query(params) = Query::<RawParams>::from_request_parts(parts, state)
        .await
        .map_err(|e| ApiError::bad_request(e.body_text()))?;
    Ok(params)
}

/// Integer parameter with fallback. Negative values become zero so that
/// range validation rejects them.
fn int_param(params: &RawParams, key: &str, default: u64) -> u64 {
    params
        .get(key)
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .map_or(default, |n| u64::try_from(n).unwrap_or(0))
}

fn text_param(params: &RawParams, key: &str) -> Option<String> {
    params.get(key).cloned()
}

fn field_param(params: &RawParams, key: &str) -> Result<SortField, ApiError> {
    match params.get(key) {
        Some(name) => Ok(name.parse()?),
        None => Ok(SortField::default()),
    }
}

/// Validated `/api/records` parameters.
#[derive(Debug, Clone)]
pub struct ListParams(pub ListQuery);

#[async_trait]
impl<S> FromRequestParts<S> for ListParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = raw_params(parts, state).await?;

        let order = params
            .get("order")
            .map(|raw| SortOrder::parse_lenient(raw))
            .unwrap_or_default();

        let query = ListQuery::new(
            int_param(&params, "page", DEFAULT_PAGE),
            int_param(&params, "per_page", DEFAULT_PER_PAGE),
        )
        .with_filter(RecordFilter::from_params(
            text_param(&params, "country"),
            text_param(&params, "continent"),
        ))
        .with_sort(field_param(&params, "sort_by")?, order)
        .checked()?;

        Ok(ListParams(query))
    }
}

/// Validated `/api/top-countries` parameters.
#[derive(Debug, Clone)]
pub struct TopParams(pub TopQuery);

#[async_trait]
impl<S> FromRequestParts<S> for TopParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = raw_params(parts, state).await?;

        let query = TopQuery::new(
            field_param(&params, "metric")?,
            int_param(&params, "limit", DEFAULT_TOP_LIMIT),
        )
        .checked()?;

        Ok(TopParams(query))
    }
}
