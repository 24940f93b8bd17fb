//! HTTP handlers for weather, advisory and risk endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared::get_bangla_advisory;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::{BatchContext, CropBatch, Forecast, ForecastPoint, ForecastSource, RiskVerdict};
use crate::services::risk::StoredVerdict;
use crate::services::{BatchService, RiskService, WeatherService};
use crate::AppState;

/// Query parameters identifying a batch
#[derive(Debug, Default, Deserialize)]
pub struct BatchQuery {
    pub batch_id: Option<String>,
}

impl BatchQuery {
    /// A missing id is a validation error; an id that cannot name any batch
    /// is reported the same way as a batch the caller does not own.
    pub fn batch_id(&self) -> AppResult<Uuid> {
        let raw = self
            .batch_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::missing_field("batch_id"))?;

        Uuid::parse_str(raw).map_err(|_| AppError::NotFound("Batch".to_string()))
    }
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub batch_id: Uuid,
    pub location: String,
    pub source: ForecastSource,
    pub forecast: Vec<ForecastPoint>,
}

#[derive(Debug, Serialize)]
pub struct AdvisoryResponse {
    pub batch_id: Uuid,
    pub advisories: Vec<String>,
}

async fn owned_batch(state: &AppState, user: &CurrentUser, query: &BatchQuery) -> AppResult<CropBatch> {
    let batch_id = query.batch_id()?;
    BatchService::new(state.db.clone())
        .get_owned_batch(user.0.farmer_id, batch_id)
        .await
}

async fn batch_forecast(
    state: &AppState,
    user: &CurrentUser,
    query: &BatchQuery,
) -> AppResult<(CropBatch, Forecast)> {
    let batch = owned_batch(state, user, query).await?;
    let forecast = state.forecast.get_forecast(&batch.storage_location).await;
    Ok((batch, forecast))
}

/// Get the forecast for a batch's storage location and record it
pub async fn get_weather_forecast(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<BatchQuery>,
) -> AppResult<Json<ForecastResponse>> {
    let (batch, forecast) = batch_forecast(&state, &current_user, &query).await?;

    WeatherService::new(state.db.clone())
        .record_forecast(batch.id, &forecast)
        .await?;

    Ok(Json(ForecastResponse {
        batch_id: batch.id,
        location: forecast.location,
        source: forecast.source,
        forecast: forecast.points,
    }))
}

/// Get Bangla storage advisories for a batch
pub async fn get_weather_advisory(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<BatchQuery>,
) -> AppResult<Json<AdvisoryResponse>> {
    let (batch, forecast) = batch_forecast(&state, &current_user, &query).await?;
    let advisories = get_bangla_advisory(&BatchContext::from(&batch), &forecast.points);

    Ok(Json(AdvisoryResponse {
        batch_id: batch.id,
        advisories,
    }))
}

/// Assess spoilage risk for a batch and store the verdict
pub async fn get_risk_assessment(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<BatchQuery>,
) -> AppResult<Json<RiskVerdict>> {
    let (batch, forecast) = batch_forecast(&state, &current_user, &query).await?;
    let verdict = RiskService::new(state.db.clone())
        .assess(&batch, &forecast.points)
        .await?;
    Ok(Json(verdict))
}

/// Get the last stored verdict for a batch
pub async fn get_risk_prediction(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Query(query): Query<BatchQuery>,
) -> AppResult<Json<StoredVerdict>> {
    let batch = owned_batch(&state, &current_user, &query).await?;
    let stored = RiskService::new(state.db.clone())
        .get_latest(batch.id)
        .await?;
    Ok(Json(stored))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(batch_id: Option<&str>) -> BatchQuery {
        BatchQuery {
            batch_id: batch_id.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_batch_id_is_validation_error() {
        assert!(matches!(
            query(None).batch_id(),
            Err(AppError::Validation { .. })
        ));
        assert!(matches!(
            query(Some("  ")).batch_id(),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_malformed_batch_id_is_not_found() {
        assert!(matches!(
            query(Some("batch-7")).batch_id(),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_valid_batch_id() {
        let id = Uuid::new_v4();
        assert_eq!(query(Some(&id.to_string())).batch_id().unwrap(), id);
    }
}
