//! Idempotent SQLite schema bootstrap.

use sqlx::SqlitePool;

use crate::error::StorageError;

const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS inquiries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        address TEXT NOT NULL,
        lot_size REAL NOT NULL CHECK (lot_size > 0),
        lot_size_unit TEXT NOT NULL DEFAULT 'acres',
        current_property TEXT NOT NULL,
        property_goals TEXT NOT NULL,
        investment_capacity TEXT NOT NULL,
        preferences_concerns TEXT NOT NULL,
        region TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_inquiries_created ON inquiries (created_at DESC)",
    r"
    CREATE TABLE IF NOT EXISTS estimates (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        inquiry_id INTEGER NOT NULL UNIQUE
            REFERENCES inquiries (id) ON DELETE CASCADE,
        project_name TEXT NOT NULL,
        project_description TEXT NOT NULL,
        confidence_score REAL NOT NULL,
        factors_considered TEXT NOT NULL DEFAULT '[]',
        recommendations TEXT NOT NULL DEFAULT '[]',
        timeline TEXT NOT NULL,
        risk_assessment TEXT NOT NULL,
        cash_flow_projection TEXT NOT NULL DEFAULT '[]',
        revenue_breakdown TEXT NOT NULL DEFAULT '{}',
        cost_breakdown TEXT NOT NULL DEFAULT '{}',
        ai_response_raw TEXT NOT NULL DEFAULT '{}',
        processing_time REAL NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS analysis_logs (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        inquiry_id INTEGER NOT NULL
            REFERENCES inquiries (id) ON DELETE CASCADE,
        request_data TEXT NOT NULL DEFAULT '{}',
        response_data TEXT NOT NULL DEFAULT '{}',
        model_used TEXT NOT NULL,
        tokens_used INTEGER NOT NULL DEFAULT 0,
        processing_time REAL NOT NULL DEFAULT 0,
        success INTEGER NOT NULL,
        error_message TEXT NOT NULL DEFAULT '',
        created_at TEXT NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_logs_inquiry ON analysis_logs (inquiry_id, created_at)",
];

/// Create every table and index that does not exist yet.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| StorageError::Migration(e.to_string()))?;
    }
    tracing::debug!(statements = SCHEMA.len(), "schema bootstrap complete");
    Ok(())
}
