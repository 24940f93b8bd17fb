//! Weather service for storing per-batch forecast records

use sqlx::PgPool;
use uuid::Uuid;

use shared::Forecast;

use crate::error::AppResult;

/// Weather service for managing weather data
#[derive(Clone)]
pub struct WeatherService {
    db: PgPool,
}

impl WeatherService {
    /// Create a new WeatherService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Store a forecast against a batch, one row per forecast date.
    ///
    /// Dates already recorded for the batch are overwritten.
    pub async fn record_forecast(&self, batch_id: Uuid, forecast: &Forecast) -> AppResult<usize> {
        let mut tx = self.db.begin().await?;

        for point in &forecast.points {
            sqlx::query(
                r#"
                INSERT INTO weather_data (
                    batch_id, forecast_date, temperature, humidity,
                    rainfall_probability, wind_speed, description, source
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                ON CONFLICT (batch_id, forecast_date) DO UPDATE SET
                    temperature = EXCLUDED.temperature,
                    humidity = EXCLUDED.humidity,
                    rainfall_probability = EXCLUDED.rainfall_probability,
                    wind_speed = EXCLUDED.wind_speed,
                    description = EXCLUDED.description,
                    source = EXCLUDED.source,
                    updated_at = NOW()
                "#,
            )
            .bind(batch_id)
            .bind(point.date)
            .bind(point.temperature)
            .bind(point.humidity)
            .bind(point.rainfall_probability)
            .bind(point.wind_speed)
            .bind(&point.description)
            .bind(forecast.source.as_str())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            batch_id = %batch_id,
            days = forecast.points.len(),
            source = forecast.source.as_str(),
            "Recorded forecast"
        );

        Ok(forecast.points.len())
    }
}
