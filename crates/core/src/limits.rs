//! Size limits and defaults for ingestion and queries.
//!
//! Limits bound the work a single request can cause. Defaults match the
//! query-string defaults of the HTTP surface.
//!
//! The `#[validate]` derive macro requires literal values in attributes,
//! so `MAX_PER_PAGE` and `MAX_TOP_LIMIT` are duplicated in `query.rs`.
//! Keep both in sync when modifying.

// === Ingestion Limits ===

/// Maximum upstream entries considered per ingestion.
///
/// Entries past this index are ignored without being inspected.
pub const MAX_UPSTREAM_ENTRIES: usize = 500;

/// Upstream payload field holding the per-country list.
pub const UPSTREAM_LIST_FIELD: &str = "response";

/// Country names that denote aggregate or placeholder rows.
pub const EXCLUDED_COUNTRY_NAMES: [&str; 2] = ["All", "Unknown"];

/// Country name assumed when the upstream omits one.
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Continent stored when the upstream omits one.
pub const UNKNOWN_CONTINENT: &str = "Unknown";

/// Length of the derived country code, in characters.
pub const COUNTRY_CODE_LEN: usize = 3;

// === Query Limits ===

/// Default page number.
pub const DEFAULT_PAGE: u64 = 1;

/// Default page size.
pub const DEFAULT_PER_PAGE: u64 = 10;

/// Maximum page size.
pub const MAX_PER_PAGE: u64 = 500;

/// Default number of rows for the top-N ranking.
pub const DEFAULT_TOP_LIMIT: u64 = 10;

/// Maximum number of rows for the top-N ranking.
pub const MAX_TOP_LIMIT: u64 = 500;

/// Continent filter value that disables continent filtering.
pub const ALL_CONTINENTS: &str = "all";

/// Timestamp format used when serializing `date_recorded`.
pub const RECORDED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
