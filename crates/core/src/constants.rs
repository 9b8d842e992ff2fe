//! Shared constants for Valora Earth.

/// Number of yearly values in every financial projection series.
pub const PROJECTION_YEARS: usize = 10;

/// Conversion factor used when a lot size is given in hectares.
pub const ACRES_PER_HECTARE: f64 = 2.47105;

/// Maximum length of an inquiry address.
pub const MAX_ADDRESS_LEN: usize = 500;

/// Maximum length of an inquiry region.
pub const MAX_REGION_LEN: usize = 100;

/// Number of free-text questionnaire steps after the landing form.
pub const QUESTIONNAIRE_STEPS: u8 = 4;

/// Maximum number of rows for any list query.
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Default number of rows when the caller gives no limit.
pub const DEFAULT_QUERY_LIMIT: usize = 20;

/// SQLite connection pool: maximum connections.
pub const DB_POOL_MAX_CONNECTIONS: u32 = 5;

/// SQLite connection pool: acquire timeout in seconds.
pub const DB_POOL_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Default timeout for the outbound LLM call in seconds.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 30;
