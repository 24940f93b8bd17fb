//! Risk assessment service
//!
//! Runs the ETCL engine for a batch and keeps the latest verdict per batch.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use shared::{calculate_etcl, BatchContext, CropBatch, ForecastPoint, RiskLevel, RiskVerdict};

use crate::error::{AppError, AppResult};

/// Risk service for computing and storing verdicts
#[derive(Clone)]
pub struct RiskService {
    db: PgPool,
}

/// Database row for a stored verdict
#[derive(Debug, Clone, sqlx::FromRow)]
struct RiskPredictionRow {
    pub batch_id: Uuid,
    pub etcl_hours: i32,
    pub risk_level: String,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub version: i32,
    pub computed_at: DateTime<Utc>,
}

/// Last verdict stored for a batch
#[derive(Debug, Clone, Serialize)]
pub struct StoredVerdict {
    pub batch_id: Uuid,
    #[serde(flatten)]
    pub verdict: RiskVerdict,
    pub version: i32,
    pub computed_at: DateTime<Utc>,
}

impl TryFrom<RiskPredictionRow> for StoredVerdict {
    type Error = AppError;

    fn try_from(row: RiskPredictionRow) -> Result<Self, Self::Error> {
        let etcl_hours = u32::try_from(row.etcl_hours).map_err(|_| {
            AppError::Internal(format!(
                "Corrupt risk prediction for batch {}: etcl_hours {}",
                row.batch_id, row.etcl_hours
            ))
        })?;
        let risk_level = row.risk_level.parse::<RiskLevel>().map_err(|e| {
            AppError::Internal(format!(
                "Corrupt risk prediction for batch {}: {}",
                row.batch_id, e
            ))
        })?;

        Ok(Self {
            batch_id: row.batch_id,
            verdict: RiskVerdict {
                etcl_hours,
                risk_level,
                risk_factors: row.risk_factors,
                recommendations: row.recommendations,
            },
            version: row.version,
            computed_at: row.computed_at,
        })
    }
}

impl RiskService {
    /// Create a new RiskService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Assess a batch against a forecast and store the verdict
    pub async fn assess(
        &self,
        batch: &CropBatch,
        forecast: &[ForecastPoint],
    ) -> AppResult<RiskVerdict> {
        let verdict = calculate_etcl(&BatchContext::from(batch), forecast);
        self.save(batch.id, &verdict).await?;
        Ok(verdict)
    }

    /// Store a verdict, replacing any previous one for the batch.
    ///
    /// Returns the new row version.
    pub async fn save(&self, batch_id: Uuid, verdict: &RiskVerdict) -> AppResult<i32> {
        let etcl_hours = i32::try_from(verdict.etcl_hours).map_err(|_| {
            AppError::Internal(format!("ETCL out of range: {}", verdict.etcl_hours))
        })?;

        let version = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO risk_predictions (
                batch_id, etcl_hours, risk_level, risk_factors, recommendations
            )
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (batch_id) DO UPDATE SET
                etcl_hours = EXCLUDED.etcl_hours,
                risk_level = EXCLUDED.risk_level,
                risk_factors = EXCLUDED.risk_factors,
                recommendations = EXCLUDED.recommendations,
                version = risk_predictions.version + 1,
                computed_at = NOW()
            RETURNING version
            "#,
        )
        .bind(batch_id)
        .bind(etcl_hours)
        .bind(verdict.risk_level.as_str())
        .bind(&verdict.risk_factors)
        .bind(&verdict.recommendations)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            batch_id = %batch_id,
            etcl_hours = verdict.etcl_hours,
            risk_level = %verdict.risk_level,
            version,
            "Stored risk prediction"
        );

        Ok(version)
    }

    /// Get the last stored verdict for a batch
    pub async fn get_latest(&self, batch_id: Uuid) -> AppResult<StoredVerdict> {
        let row = sqlx::query_as::<_, RiskPredictionRow>(
            r#"
            SELECT batch_id, etcl_hours, risk_level, risk_factors, recommendations,
                   version, computed_at
            FROM risk_predictions
            WHERE batch_id = $1
            "#,
        )
        .bind(batch_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Risk prediction".to_string()))?;

        StoredVerdict::try_from(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(etcl_hours: i32, risk_level: &str) -> RiskPredictionRow {
        RiskPredictionRow {
            batch_id: Uuid::new_v4(),
            etcl_hours,
            risk_level: risk_level.to_string(),
            risk_factors: vec!["বৃষ্টির উচ্চ ঝুঁকি - নিরাপদ সংরক্ষণ প্রয়োজন".to_string()],
            recommendations: RiskLevel::Critical
                .recommendations()
                .iter()
                .map(|r| r.to_string())
                .collect(),
            version: 3,
            computed_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_conversion() {
        let stored = StoredVerdict::try_from(row(24, "CRITICAL")).unwrap();
        assert_eq!(stored.verdict.etcl_hours, 24);
        assert_eq!(stored.verdict.risk_level, RiskLevel::Critical);
        assert_eq!(stored.version, 3);
    }

    #[test]
    fn test_corrupt_rows_are_internal_errors() {
        assert!(matches!(
            StoredVerdict::try_from(row(-1, "CRITICAL")),
            Err(AppError::Internal(_))
        ));
        assert!(matches!(
            StoredVerdict::try_from(row(24, "SEVERE")),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_stored_verdict_json_is_flat() {
        let stored = StoredVerdict::try_from(row(24, "CRITICAL")).unwrap();
        let value = serde_json::to_value(&stored).unwrap();
        assert_eq!(value["risk_level"], "CRITICAL");
        assert_eq!(value["etcl_hours"], 24);
        assert_eq!(value["version"], 3);
        assert!(value.get("verdict").is_none());
    }
}
