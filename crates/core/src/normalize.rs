//! Normalization of upstream payloads into [`StatRecord`]s.
//!
//! The upstream payload is loosely typed: numbers arrive as JSON numbers or
//! as strings (`"+1234"` for daily deltas, `"5678"` for per-million rates),
//! and any field may be missing or null. Normalization is a single pass of
//! a fallible per-entry transform; entries that fail are collected as
//! errors and the pass continues.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::limits::{
    EXCLUDED_COUNTRY_NAMES, MAX_UPSTREAM_ENTRIES, UNKNOWN_CONTINENT, UNKNOWN_COUNTRY,
    UPSTREAM_LIST_FIELD,
};
use crate::record::{derive_country_code, StatRecord};

type Group = Map<String, Value>;

/// Output of a normalization pass.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    /// Records in upstream order.
    pub records: Vec<StatRecord>,
    /// Entries dropped because they could not be read.
    pub rejected: Vec<Error>,
    /// Aggregate or placeholder rows ("All", "Unknown") that were skipped.
    pub excluded: usize,
    /// Entries inspected, after applying the entry cap.
    pub considered: usize,
}

impl NormalizedBatch {
    /// Total entries that did not produce a record.
    pub fn skipped(&self) -> usize {
        self.rejected.len() + self.excluded
    }
}

/// Normalizes a raw upstream payload.
///
/// A payload without a list-valued `response` field yields an empty batch.
pub fn normalize_payload(payload: &Value) -> NormalizedBatch {
    let entries = match payload.get(UPSTREAM_LIST_FIELD) {
        Some(Value::Array(entries)) => entries,
        Some(Value::Null) | None => return NormalizedBatch::default(),
        Some(_) => {
            debug!(field = UPSTREAM_LIST_FIELD, "Upstream list field is not an array");
            return NormalizedBatch::default();
        }
    };

    let considered = entries.len().min(MAX_UPSTREAM_ENTRIES);
    let mut batch = NormalizedBatch {
        records: Vec::with_capacity(considered),
        considered,
        ..Default::default()
    };

    for (i, entry) in entries.iter().take(MAX_UPSTREAM_ENTRIES).enumerate() {
        match normalize_entry(entry) {
            Ok(Some(record)) => batch.records.push(record),
            Ok(None) => batch.excluded += 1,
            Err(e) => {
                debug!(index = i, error = %e, "Skipping upstream entry");
                batch
                    .rejected
                    .push(Error::validation(format!("entry[{}]: {}", i, e)));
            }
        }
    }

    batch
}

/// Normalizes a single upstream entry.
///
/// Returns `Ok(None)` for aggregate and placeholder rows.
pub fn normalize_entry(entry: &Value) -> Result<Option<StatRecord>> {
    let entry = entry
        .as_object()
        .ok_or_else(|| Error::validation("entry is not an object"))?;

    let raw_country = match entry.get("country") {
        None => UNKNOWN_COUNTRY,
        Some(Value::String(name)) => name.as_str(),
        Some(other) => {
            return Err(Error::validation(format!(
                "country is not a string: {}",
                other
            )))
        }
    };

    if EXCLUDED_COUNTRY_NAMES.contains(&raw_country) {
        return Ok(None);
    }

    let cases = group(entry, "cases")?;
    let deaths = group(entry, "deaths")?;
    let tests = group(entry, "tests")?;

    Ok(Some(StatRecord {
        country: raw_country.trim().to_string(),
        country_code: derive_country_code(raw_country),
        continent: continent(entry)?,
        population: int_field(entry.get("population"), "population")?,
        total_cases: int_in(cases, "total", "cases.total")?,
        new_cases: int_in(cases, "new", "cases.new")?,
        total_deaths: int_in(deaths, "total", "deaths.total")?,
        new_deaths: int_in(deaths, "new", "deaths.new")?,
        total_recovered: int_in(cases, "recovered", "cases.recovered")?,
        active_cases: int_in(cases, "active", "cases.active")?,
        critical_cases: int_in(cases, "critical", "cases.critical")?,
        cases_per_million: float_in(cases, "1M_pop", "cases.1M_pop")?,
        deaths_per_million: float_in(deaths, "1M_pop", "deaths.1M_pop")?,
        total_tests: int_in(tests, "total", "tests.total")?,
        tests_per_million: float_in(tests, "1M_pop", "tests.1M_pop")?,
    }))
}

/// Nested numeric group; a missing group reads as empty.
fn group<'a>(entry: &'a Group, name: &str) -> Result<Option<&'a Group>> {
    match entry.get(name) {
        None => Ok(None),
        Some(Value::Object(group)) => Ok(Some(group)),
        Some(other) => Err(Error::validation(format!(
            "{} is not an object: {}",
            name, other
        ))),
    }
}

fn continent(entry: &Group) -> Result<String> {
    match entry.get("continent") {
        None | Some(Value::Null) => Ok(UNKNOWN_CONTINENT.to_string()),
        Some(Value::String(name)) => Ok(name.clone()),
        Some(other) => Err(Error::validation(format!(
            "continent is not a string: {}",
            other
        ))),
    }
}

fn int_in(group: Option<&Group>, key: &str, path: &str) -> Result<i64> {
    int_field(group.and_then(|g| g.get(key)), path)
}

fn float_in(group: Option<&Group>, key: &str, path: &str) -> Result<f64> {
    float_field(group.and_then(|g| g.get(key)), path)
}

/// Reads an integer statistic. Missing, null and empty values are zero;
/// negative values clamp to zero.
fn int_field(value: Option<&Value>, path: &str) -> Result<i64> {
    let parsed = match value {
        None | Some(Value::Null) => Some(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Some(Value::String(s)) => parse_int(s),
        Some(_) => None,
    };

    parsed
        .map(|n| n.max(0))
        .ok_or_else(|| type_mismatch(path, value))
}

/// Reads a floating point statistic. Missing, null and empty values are
/// zero; negative values clamp to zero.
fn float_field(value: Option<&Value>, path: &str) -> Result<f64> {
    let parsed = match value {
        None | Some(Value::Null) => Some(0.0),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => parse_float(s),
        Some(_) => None,
    };

    parsed
        .filter(|f| f.is_finite())
        .map(|f| f.max(0.0))
        .ok_or_else(|| type_mismatch(path, value))
}

fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = strip_sign(raw);
    if trimmed.is_empty() {
        return Some(0);
    }
    trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| f as i64)
    })
}

fn parse_float(raw: &str) -> Option<f64> {
    let trimmed = strip_sign(raw);
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok()
}

/// Drops surrounding whitespace and a leading `+`.
fn strip_sign(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed.strip_prefix('+').unwrap_or(trimmed)
}

fn type_mismatch(path: &str, value: Option<&Value>) -> Error {
    let shown = value.map(|v| v.to_string()).unwrap_or_default();
    Error::validation(format!("{} is not numeric: {}", path, shown))
}
