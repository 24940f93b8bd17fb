//! Weather API client for fetching forecast data
//!
//! Integrates with the OpenWeatherMap 5 day / 3 hour forecast API and reduces
//! it to one forecast point per day.

use std::time::Duration;

use chrono::DateTime;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::{validate_forecast, ForecastPoint};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

/// Upstream entries considered (5 days of 3-hour periods)
const FORECAST_ENTRIES: usize = 40;
/// Stride that picks one 3-hour period per day
const ENTRIES_PER_DAY: usize = 8;
const MPS_TO_KMH: f64 = 3.6;

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// OpenWeatherMap API response for forecast
#[derive(Debug, Deserialize)]
struct OWMForecastResponse {
    city: OWMCity,
    list: Vec<OWMForecastItem>,
}

#[derive(Debug, Deserialize)]
struct OWMCity {
    #[serde(default)]
    timezone: i64,
}

#[derive(Debug, Deserialize)]
struct OWMForecastItem {
    dt: i64,
    main: OWMMain,
    #[serde(default)]
    weather: Vec<OWMWeather>,
    wind: OWMWind,
    #[serde(default)]
    pop: f64,
}

#[derive(Debug, Deserialize)]
struct OWMMain {
    temp: f64,
    humidity: f64,
}

#[derive(Debug, Deserialize)]
struct OWMWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OWMWind {
    speed: f64,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        Self::with_base_url(
            config.api_key.clone(),
            config.api_endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// Create a new WeatherClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Weather HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch a daily forecast by GPS coordinates
    pub async fn get_forecast(
        &self,
        latitude: Decimal,
        longitude: Decimal,
    ) -> AppResult<Vec<ForecastPoint>> {
        let url = format!("{}/forecast", self.base_url);
        let lat = latitude.to_string();
        let lon = longitude.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OWMForecastResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse forecast response: {}", e))
        })?;

        convert_forecast_response(data)
    }
}

/// Convert an OpenWeatherMap forecast response to daily forecast points
fn convert_forecast_response(data: OWMForecastResponse) -> AppResult<Vec<ForecastPoint>> {
    let offset = data.city.timezone;

    let points = data
        .list
        .into_iter()
        .take(FORECAST_ENTRIES)
        .step_by(ENTRIES_PER_DAY)
        .map(|item| -> AppResult<ForecastPoint> {
            let date = item
                .dt
                .checked_add(offset)
                .and_then(|ts| DateTime::from_timestamp(ts, 0))
                .ok_or_else(|| {
                    AppError::ExternalService(format!("Invalid forecast timestamp: {}", item.dt))
                })?
                .date_naive();

            Ok(ForecastPoint {
                date,
                temperature: item.main.temp,
                humidity: item.main.humidity,
                rainfall_probability: item.pop * 100.0,
                wind_speed: item.wind.speed * MPS_TO_KMH,
                description: item
                    .weather
                    .into_iter()
                    .next()
                    .map(|w| w.main)
                    .unwrap_or_default(),
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    if points.is_empty() {
        return Err(AppError::ExternalService(
            "Weather API returned an empty forecast".to_string(),
        ));
    }

    validate_forecast(&points).map_err(|e| AppError::ExternalService(e.to_string()))?;

    Ok(points)
}
