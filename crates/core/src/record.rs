//! Canonical statistics records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One country's statistics after normalization.
///
/// Every numeric field is present; absent upstream values become zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRecord {
    pub country: String,
    pub country_code: String,
    pub continent: String,
    pub population: i64,
    pub total_cases: i64,
    pub new_cases: i64,
    pub total_deaths: i64,
    pub new_deaths: i64,
    pub total_recovered: i64,
    pub active_cases: i64,
    pub critical_cases: i64,
    pub cases_per_million: f64,
    pub deaths_per_million: f64,
    pub total_tests: i64,
    pub tests_per_million: f64,
}

impl StatRecord {
    /// Creates a record for `country` with every statistic zeroed.
    pub fn empty(country: impl Into<String>) -> Self {
        let country = country.into();
        Self {
            country_code: derive_country_code(&country),
            country,
            continent: crate::limits::UNKNOWN_CONTINENT.to_string(),
            population: 0,
            total_cases: 0,
            new_cases: 0,
            total_deaths: 0,
            new_deaths: 0,
            total_recovered: 0,
            active_cases: 0,
            critical_cases: 0,
            cases_per_million: 0.0,
            deaths_per_million: 0.0,
            total_tests: 0,
            tests_per_million: 0.0,
        }
    }
}

/// A record as persisted in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: i64,
    #[serde(flatten)]
    pub record: StatRecord,
    /// Time of the most recent ingestion touching this row.
    #[serde(rename = "date_recorded", with = "recorded_at_format")]
    pub recorded_at: DateTime<Utc>,
}

/// Uppercased prefix of the raw country name.
///
/// Not an ISO lookup: "United Kingdom" becomes "UNI".
pub fn derive_country_code(raw_country: &str) -> String {
    raw_country
        .chars()
        .take(crate::limits::COUNTRY_CODE_LEN)
        .collect::<String>()
        .to_uppercase()
}

mod recorded_at_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::limits::RECORDED_AT_FORMAT;

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(RECORDED_AT_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, RECORDED_AT_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(serde::de::Error::custom)
    }
}
