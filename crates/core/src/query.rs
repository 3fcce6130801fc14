//! Query vocabulary shared by the store and the HTTP layer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{Error, Result};
use crate::limits::{ALL_CONTINENTS, DEFAULT_PAGE, DEFAULT_PER_PAGE, DEFAULT_TOP_LIMIT};

/// Record attribute usable for ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortField {
    Id,
    Country,
    CountryCode,
    Continent,
    Population,
    #[default]
    TotalCases,
    NewCases,
    TotalDeaths,
    NewDeaths,
    TotalRecovered,
    ActiveCases,
    CriticalCases,
    CasesPerMillion,
    DeathsPerMillion,
    TotalTests,
    TestsPerMillion,
    RecordedAt,
}

impl SortField {
    pub const ALL: [SortField; 17] = [
        Self::Id,
        Self::Country,
        Self::CountryCode,
        Self::Continent,
        Self::Population,
        Self::TotalCases,
        Self::NewCases,
        Self::TotalDeaths,
        Self::NewDeaths,
        Self::TotalRecovered,
        Self::ActiveCases,
        Self::CriticalCases,
        Self::CasesPerMillion,
        Self::DeathsPerMillion,
        Self::TotalTests,
        Self::TestsPerMillion,
        Self::RecordedAt,
    ];

    /// Attribute name as it appears in serialized records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Country => "country",
            Self::CountryCode => "country_code",
            Self::Continent => "continent",
            Self::Population => "population",
            Self::TotalCases => "total_cases",
            Self::NewCases => "new_cases",
            Self::TotalDeaths => "total_deaths",
            Self::NewDeaths => "new_deaths",
            Self::TotalRecovered => "total_recovered",
            Self::ActiveCases => "active_cases",
            Self::CriticalCases => "critical_cases",
            Self::CasesPerMillion => "cases_per_million",
            Self::DeathsPerMillion => "deaths_per_million",
            Self::TotalTests => "total_tests",
            Self::TestsPerMillion => "tests_per_million",
            Self::RecordedAt => "date_recorded",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s == "recorded_at" {
            return Ok(Self::RecordedAt);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| Error::invalid_field(format!("unknown record field '{}'", s)))
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Only the literal `desc` sorts descending; anything else is ascending.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw == "desc" {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// Row filters for listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring of the country name.
    pub country: Option<String>,
    /// Exact continent name.
    pub continent: Option<String>,
}

impl RecordFilter {
    /// Builds a filter from raw query values.
    ///
    /// Empty values are ignored and the continent value `all` disables
    /// continent filtering.
    pub fn from_params(country: Option<String>, continent: Option<String>) -> Self {
        Self {
            country: country.filter(|c| !c.is_empty()),
            continent: continent.filter(|c| !c.is_empty() && c != ALL_CONTINENTS),
        }
    }
}

/// Paginated, filtered, sorted listing request.
#[derive(Debug, Clone, Validate)]
pub struct ListQuery {
    #[validate(range(min = 1, message = "page must be >= 1"))]
    pub page: u64,
    #[validate(range(min = 1, max = 500, message = "per_page must be between 1 and 500"))]
    pub per_page: u64,
    pub filter: RecordFilter,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
            filter: RecordFilter::default(),
            sort_by: SortField::default(),
            order: SortOrder::default(),
        }
    }
}

impl ListQuery {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self {
            page,
            per_page,
            ..Default::default()
        }
    }

    pub fn with_filter(mut self, filter: RecordFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_sort(mut self, sort_by: SortField, order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.order = order;
        self
    }

    /// Validates bounds, mapping failures to [`Error::Validation`].
    pub fn checked(self) -> Result<Self> {
        self.validate()
            .map_err(|e| Error::validation(e.to_string()))?;
        Ok(self)
    }

    /// Rows skipped before the requested page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.per_page)
    }
}

/// Top-N ranking request.
#[derive(Debug, Clone, Validate)]
pub struct TopQuery {
    pub metric: SortField,
    #[validate(range(min = 1, max = 500, message = "limit must be between 1 and 500"))]
    pub limit: u64,
}

impl Default for TopQuery {
    fn default() -> Self {
        Self {
            metric: SortField::default(),
            limit: DEFAULT_TOP_LIMIT,
        }
    }
}

impl TopQuery {
    pub fn new(metric: SortField, limit: u64) -> Self {
        Self { metric, limit }
    }

    pub fn checked(self) -> Result<Self> {
        self.validate()
            .map_err(|e| Error::validation(e.to_string()))?;
        Ok(self)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub pages: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, page: u64, per_page: u64) -> Self {
        Self {
            items,
            total,
            page,
            per_page,
            pages: page_count(total, per_page),
        }
    }
}

/// `ceil(total / per_page)`; zero when there is nothing to page through.
pub fn page_count(total: u64, per_page: u64) -> u64 {
    if per_page == 0 {
        return 0;
    }
    total.div_ceil(per_page)
}

/// Store-wide aggregates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_records: u64,
    pub total_cases: i64,
    pub total_deaths: i64,
    pub total_recovered: i64,
    /// `total_cases - total_deaths - total_recovered`; may be negative.
    pub active_cases: i64,
}

impl Statistics {
    pub fn new(
        total_records: u64,
        total_cases: i64,
        total_deaths: i64,
        total_recovered: i64,
    ) -> Self {
        Self {
            total_records,
            total_cases,
            total_deaths,
            total_recovered,
            active_cases: total_cases
                .saturating_sub(total_deaths)
                .saturating_sub(total_recovered),
        }
    }
}
