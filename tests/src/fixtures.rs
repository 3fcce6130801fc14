//! Upstream payload fixtures.

use serde_json::{json, Value};

/// Wraps entries in the upstream envelope.
pub fn payload(entries: Vec<Value>) -> Value {
    json!({
        "get": "statistics",
        "parameters": [],
        "errors": [],
        "results": entries.len(),
        "response": entries
    })
}

/// A well-formed upstream entry with string-encoded deltas and rates.
pub fn entry(country: &str, continent: &str, total_cases: i64) -> Value {
    json!({
        "continent": continent,
        "country": country,
        "population": 1_000_000,
        "cases": {
            "new": "+120",
            "active": total_cases / 10,
            "critical": 3,
            "recovered": total_cases / 2,
            "1M_pop": "4521",
            "total": total_cases
        },
        "deaths": {
            "new": "+2",
            "1M_pop": "31",
            "total": total_cases / 100
        },
        "tests": {
            "1M_pop": "98000.5",
            "total": total_cases * 4
        },
        "day": "2024-03-01",
        "time": "2024-03-01T12:00:00+00:00"
    })
}

/// Entry with explicit totals for aggregate checks.
pub fn entry_with_totals(
    country: &str,
    continent: &str,
    cases: i64,
    deaths: i64,
    recovered: i64,
) -> Value {
    json!({
        "continent": continent,
        "country": country,
        "cases": { "total": cases, "recovered": recovered },
        "deaths": { "total": deaths }
    })
}

/// Aggregate row the service never stores.
pub fn aggregate_entry() -> Value {
    json!({
        "continent": "All",
        "country": "All",
        "cases": { "total": 700_000_000 },
        "deaths": { "total": 7_000_000 }
    })
}

/// `count` distinct countries with ascending case totals.
pub fn countries(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| entry(&format!("Country-{:02}", i), "Europe", (i as i64) * 100))
        .collect()
}
