//! AnalysisLogStore implementation for SqliteStorage.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteExecutor, SqliteRow};
use sqlx::Row;
use valora_core::{AnalysisLog, InquiryId, NewAnalysisLog};

use super::{SqliteStorage, encode_timestamp, json_column, timestamp_column, timestamp_now};
use crate::error::StorageError;
use crate::traits::AnalysisLogStore;

const LOG_COLUMNS: &str = "id, inquiry_id, request_data, response_data, model_used, \
     tokens_used, processing_time, success, error_message, created_at";

fn row_to_log(row: &SqliteRow) -> Result<AnalysisLog, StorageError> {
    let tokens: i64 = row.try_get("tokens_used")?;
    let tokens_used = u32::try_from(tokens)
        .map_err(|e| StorageError::corrupt(format!("tokens_used out of range: {tokens}"), e))?;
    Ok(AnalysisLog {
        id: row.try_get("id")?,
        inquiry_id: row.try_get("inquiry_id")?,
        request_data: json_column(row, "request_data")?,
        response_data: json_column(row, "response_data")?,
        model_used: row.try_get("model_used")?,
        tokens_used,
        processing_time: row.try_get("processing_time")?,
        success: row.try_get("success")?,
        error_message: row.try_get("error_message")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}

/// Insert a log row on any executor, so it can join an open transaction.
pub(super) async fn insert_log<'e, E: SqliteExecutor<'e>>(
    executor: E,
    log: &NewAnalysisLog,
) -> Result<AnalysisLog, StorageError> {
    let created_at = timestamp_now();
    let result = sqlx::query(
        "INSERT INTO analysis_logs (inquiry_id, request_data, response_data, model_used,
            tokens_used, processing_time, success, error_message, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(log.inquiry_id)
    .bind(serde_json::to_string(&log.request_data)?)
    .bind(serde_json::to_string(&log.response_data)?)
    .bind(&log.model_used)
    .bind(i64::from(log.tokens_used))
    .bind(log.processing_time)
    .bind(log.success)
    .bind(&log.error_message)
    .bind(encode_timestamp(&created_at))
    .execute(executor)
    .await?;
    Ok(AnalysisLog::from_new(result.last_insert_rowid(), log.clone(), created_at))
}

#[async_trait]
impl AnalysisLogStore for SqliteStorage {
    async fn append_analysis_log(
        &self,
        log: &NewAnalysisLog,
    ) -> Result<AnalysisLog, StorageError> {
        insert_log(&self.pool, log).await
    }

    async fn list_logs_for_inquiry(
        &self,
        inquiry_id: InquiryId,
    ) -> Result<Vec<AnalysisLog>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {LOG_COLUMNS} FROM analysis_logs WHERE inquiry_id = ? ORDER BY created_at, id"
        ))
        .bind(inquiry_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_log).collect()
    }
}
