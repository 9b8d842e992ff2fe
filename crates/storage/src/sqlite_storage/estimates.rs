//! EstimateStore implementation for SqliteStorage.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteExecutor, SqliteRow};
use sqlx::Row;
use valora_core::{AnalysisLog, Estimate, EstimateContent, InquiryId, NewAnalysisLog, NewEstimate};

use super::analysis_logs::insert_log;
use super::{SqliteStorage, encode_timestamp, json_column, timestamp_column, timestamp_now};
use crate::error::StorageError;
use crate::traits::EstimateStore;

const ESTIMATE_COLUMNS: &str = "id, inquiry_id, project_name, project_description, \
     confidence_score, factors_considered, recommendations, timeline, risk_assessment, \
     cash_flow_projection, revenue_breakdown, cost_breakdown, ai_response_raw, \
     processing_time, created_at";

fn row_to_estimate(row: &SqliteRow) -> Result<Estimate, StorageError> {
    let content = EstimateContent {
        project_name: row.try_get("project_name")?,
        project_description: row.try_get("project_description")?,
        confidence_score: row.try_get("confidence_score")?,
        factors_considered: json_column(row, "factors_considered")?,
        recommendations: json_column(row, "recommendations")?,
        timeline: row.try_get("timeline")?,
        risk_assessment: row.try_get("risk_assessment")?,
        cash_flow_projection: json_column(row, "cash_flow_projection")?,
        revenue_breakdown: json_column(row, "revenue_breakdown")?,
        cost_breakdown: json_column(row, "cost_breakdown")?,
    };
    Ok(Estimate {
        id: row.try_get("id")?,
        inquiry_id: row.try_get("inquiry_id")?,
        content,
        ai_response_raw: json_column(row, "ai_response_raw")?,
        processing_time: row.try_get("processing_time")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}

async fn insert_estimate<'e, E: SqliteExecutor<'e>>(
    executor: E,
    estimate: &NewEstimate,
) -> Result<Estimate, StorageError> {
    let created_at = timestamp_now();
    let c = &estimate.content;
    let result = sqlx::query(
        "INSERT INTO estimates (inquiry_id, project_name, project_description,
            confidence_score, factors_considered, recommendations, timeline, risk_assessment,
            cash_flow_projection, revenue_breakdown, cost_breakdown, ai_response_raw,
            processing_time, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(estimate.inquiry_id)
    .bind(&c.project_name)
    .bind(&c.project_description)
    .bind(c.confidence_score)
    .bind(serde_json::to_string(&c.factors_considered)?)
    .bind(serde_json::to_string(&c.recommendations)?)
    .bind(&c.timeline)
    .bind(&c.risk_assessment)
    .bind(serde_json::to_string(&c.cash_flow_projection)?)
    .bind(serde_json::to_string(&c.revenue_breakdown)?)
    .bind(serde_json::to_string(&c.cost_breakdown)?)
    .bind(serde_json::to_string(&estimate.ai_response_raw)?)
    .bind(estimate.processing_time)
    .bind(encode_timestamp(&created_at))
    .execute(executor)
    .await?;
    Ok(Estimate::from_new(result.last_insert_rowid(), estimate.clone(), created_at))
}

#[async_trait]
impl EstimateStore for SqliteStorage {
    async fn save_estimate(&self, estimate: &NewEstimate) -> Result<Estimate, StorageError> {
        insert_estimate(&self.pool, estimate).await
    }

    async fn save_estimate_with_log(
        &self,
        estimate: &NewEstimate,
        log: &NewAnalysisLog,
    ) -> Result<(Estimate, AnalysisLog), StorageError> {
        let mut tx = self.pool.begin().await?;
        let saved = insert_estimate(&mut *tx, estimate).await?;
        let logged = insert_log(&mut *tx, log).await?;
        tx.commit().await?;
        tracing::debug!(
            inquiry_id = estimate.inquiry_id,
            estimate_id = saved.id,
            log_id = logged.id,
            "estimate and analysis log committed"
        );
        Ok((saved, logged))
    }

    async fn get_estimate_for_inquiry(
        &self,
        inquiry_id: InquiryId,
    ) -> Result<Option<Estimate>, StorageError> {
        let row = sqlx::query(&format!(
            "SELECT {ESTIMATE_COLUMNS} FROM estimates WHERE inquiry_id = ?"
        ))
        .bind(inquiry_id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| row_to_estimate(&r)).transpose()
    }
}
