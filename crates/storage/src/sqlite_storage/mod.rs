//! SQLite storage backend using sqlx.
//!
//! Split into modular files by table.

mod analysis_logs;
mod estimates;
mod inquiries;

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::DeserializeOwned;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use valora_core::{DB_POOL_ACQUIRE_TIMEOUT_SECS, DB_POOL_MAX_CONNECTIONS, env_parse_with_default};

use crate::error::StorageError;
use crate::migrations::run_migrations;

#[derive(Clone, Debug)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Open (creating if needed) the database file at `path` and bootstrap the schema.
    pub async fn new(path: &Path) -> Result<Self, StorageError> {
        let max_connections =
            env_parse_with_default("VALORA_DB_MAX_CONNECTIONS", DB_POOL_MAX_CONNECTIONS).max(1);
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(DB_POOL_ACQUIRE_TIMEOUT_SECS))
            .connect_with(options)
            .await?;
        tracing::info!(path = %path.display(), max_connections, "SqliteStorage initialized");
        Self::bootstrap(pool).await
    }

    /// Private in-memory database. A single connection that never expires,
    /// since the data lives only as long as that connection.
    pub async fn in_memory() -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        Self::bootstrap(pool).await
    }

    async fn bootstrap(pool: SqlitePool) -> Result<Self, StorageError> {
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Current time truncated to microseconds, so a value survives the
/// round trip through its TEXT column unchanged.
pub(crate) fn timestamp_now() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp_micros(now.timestamp_micros()).unwrap_or(now)
}

/// Fixed-width RFC 3339 so that TEXT ordering matches time ordering.
pub(crate) fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn timestamp_column(
    row: &SqliteRow,
    column: &str,
) -> Result<DateTime<Utc>, StorageError> {
    let raw: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StorageError::corrupt(format!("invalid timestamp in {column}: {raw}"), e))
}

pub(crate) fn json_column<T: DeserializeOwned>(
    row: &SqliteRow,
    column: &str,
) -> Result<T, StorageError> {
    let raw: String = row.try_get(column)?;
    serde_json::from_str(&raw)
        .map_err(|e| StorageError::corrupt(format!("invalid JSON in {column}"), e))
}

/// Convert `usize` to `i64` for SQL LIMIT binds.
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}
