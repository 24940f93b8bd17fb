//! Crop batch lookup scoped to the owning farmer

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use shared::{BatchStatus, CropBatch, CropType, StorageType, UnknownCode};

use crate::error::{AppError, AppResult};

/// Batch service for reading crop batches
#[derive(Clone)]
pub struct BatchService {
    db: PgPool,
}

/// Database row for a crop batch; enum columns are stored as text codes
#[derive(Debug, Clone, sqlx::FromRow)]
struct CropBatchRow {
    pub id: Uuid,
    pub farmer_id: Uuid,
    pub crop_type: String,
    pub estimated_weight_kg: Decimal,
    pub harvest_date: NaiveDate,
    pub storage_location: String,
    pub storage_type: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<CropBatchRow> for CropBatch {
    type Error = AppError;

    fn try_from(row: CropBatchRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = |e: UnknownCode| AppError::Internal(format!("Corrupt crop batch {}: {}", id, e));

        Ok(Self {
            id: row.id,
            farmer_id: row.farmer_id,
            crop_type: row.crop_type.parse::<CropType>().map_err(invalid)?,
            estimated_weight_kg: row.estimated_weight_kg,
            harvest_date: row.harvest_date,
            storage_location: row.storage_location,
            storage_type: row.storage_type.parse::<StorageType>().map_err(invalid)?,
            status: row.status.parse::<BatchStatus>().map_err(invalid)?,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl BatchService {
    /// Create a new BatchService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Get a batch owned by the given farmer.
    ///
    /// A batch that exists but belongs to someone else is reported as not
    /// found, so callers cannot discover other farmers' batches.
    pub async fn get_owned_batch(&self, farmer_id: Uuid, batch_id: Uuid) -> AppResult<CropBatch> {
        let row = sqlx::query_as::<_, CropBatchRow>(
            r#"
            SELECT id, farmer_id, crop_type, estimated_weight_kg, harvest_date,
                   storage_location, storage_type, status, notes, created_at, updated_at
            FROM crop_batches
            WHERE id = $1 AND farmer_id = $2
            "#,
        )
        .bind(batch_id)
        .bind(farmer_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Batch".to_string()))?;

        let batch = CropBatch::try_from(row)?;
        tracing::debug!(
            batch_id = %batch.id,
            crop_type = %batch.crop_type,
            storage_type = %batch.storage_type,
            status = %batch.status,
            "Loaded crop batch"
        );
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(storage_type: &str) -> CropBatchRow {
        CropBatchRow {
            id: Uuid::new_v4(),
            farmer_id: Uuid::new_v4(),
            crop_type: "PADDY".to_string(),
            estimated_weight_kg: Decimal::new(12505, 1),
            harvest_date: NaiveDate::from_ymd_opt(2024, 11, 20).unwrap(),
            storage_location: "RAJSHAHI".to_string(),
            storage_type: storage_type.to_string(),
            status: "ACTIVE".to_string(),
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let batch = CropBatch::try_from(row("SILO")).unwrap();
        assert_eq!(batch.storage_type, StorageType::Silo);
        assert_eq!(batch.status, BatchStatus::Active);
        assert_eq!(batch.storage_location, "RAJSHAHI");
        assert_eq!(batch.crop_type.to_string(), "PADDY");
        assert_eq!(batch.status.to_string(), "ACTIVE");
    }

    #[test]
    fn test_unknown_storage_type_is_internal_error() {
        let result = CropBatch::try_from(row("BARN"));
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
