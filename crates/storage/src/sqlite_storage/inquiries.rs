//! InquiryStore implementation for SqliteStorage.

use async_trait::async_trait;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use valora_core::{Inquiry, InquiryId, InquiryInput, LotSizeUnit};

use super::{SqliteStorage, encode_timestamp, timestamp_column, timestamp_now, usize_to_i64};
use crate::error::StorageError;
use crate::traits::InquiryStore;

const INQUIRY_COLUMNS: &str = "id, address, lot_size, lot_size_unit, current_property, \
     property_goals, investment_capacity, preferences_concerns, region, created_at";

fn row_to_inquiry(row: &SqliteRow) -> Result<Inquiry, StorageError> {
    let unit: String = row.try_get("lot_size_unit")?;
    let lot_size_unit = unit
        .parse::<LotSizeUnit>()
        .map_err(|e| StorageError::corrupt(format!("invalid lot_size_unit: {unit}"), e))?;
    Ok(Inquiry {
        id: row.try_get("id")?,
        address: row.try_get("address")?,
        lot_size: row.try_get("lot_size")?,
        lot_size_unit,
        current_property: row.try_get("current_property")?,
        property_goals: row.try_get("property_goals")?,
        investment_capacity: row.try_get("investment_capacity")?,
        preferences_concerns: row.try_get("preferences_concerns")?,
        region: row.try_get("region")?,
        created_at: timestamp_column(row, "created_at")?,
    })
}

#[async_trait]
impl InquiryStore for SqliteStorage {
    async fn create_inquiry(&self, input: &InquiryInput) -> Result<Inquiry, StorageError> {
        let created_at = timestamp_now();
        let result = sqlx::query(
            "INSERT INTO inquiries (address, lot_size, lot_size_unit, current_property,
                property_goals, investment_capacity, preferences_concerns, region, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&input.address)
        .bind(input.lot_size)
        .bind(input.lot_size_unit.as_str())
        .bind(&input.current_property)
        .bind(&input.property_goals)
        .bind(&input.investment_capacity)
        .bind(&input.preferences_concerns)
        .bind(&input.region)
        .bind(encode_timestamp(&created_at))
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        tracing::debug!(inquiry_id = id, region = %input.region, "inquiry stored");
        Ok(Inquiry::from_input(id, input.clone(), created_at))
    }

    async fn get_inquiry(&self, id: InquiryId) -> Result<Option<Inquiry>, StorageError> {
        let row = sqlx::query(&format!("SELECT {INQUIRY_COLUMNS} FROM inquiries WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| row_to_inquiry(&r)).transpose()
    }

    async fn list_inquiries(&self, limit: usize) -> Result<Vec<Inquiry>, StorageError> {
        let rows = sqlx::query(&format!(
            "SELECT {INQUIRY_COLUMNS} FROM inquiries ORDER BY created_at DESC, id DESC LIMIT ?"
        ))
        .bind(usize_to_i64(limit))
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_inquiry).collect()
    }

    async fn count_inquiries(&self) -> Result<u64, StorageError> {
        let count: i64 =
            sqlx::query("SELECT COUNT(*) FROM inquiries").fetch_one(&self.pool).await?.try_get(0)?;
        Ok(u64::try_from(count).unwrap_or(0))
    }

    async fn delete_inquiry(&self, id: InquiryId) -> Result<bool, StorageError> {
        let result =
            sqlx::query("DELETE FROM inquiries WHERE id = ?").bind(id).execute(&self.pool).await?;
        let deleted = result.rows_affected() > 0;
        if deleted {
            tracing::info!(inquiry_id = id, "inquiry deleted with its estimate and logs");
        }
        Ok(deleted)
    }
}
