//! Weather forecast models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One forecast period for a storage location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    /// Degrees Celsius
    pub temperature: f64,
    /// Relative humidity, 0-100
    pub humidity: f64,
    /// Probability of precipitation, 0-100
    pub rainfall_probability: f64,
    /// km/h
    pub wind_speed: f64,
    pub description: String,
}

/// Where a forecast came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ForecastSource {
    /// Upstream weather API
    Live,
    /// Deterministic placeholder, served when the upstream is unavailable
    Fallback,
}

impl ForecastSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastSource::Live => "live",
            ForecastSource::Fallback => "fallback",
        }
    }
}

/// A forecast snapshot for one location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    pub location: String,
    pub source: ForecastSource,
    pub points: Vec<ForecastPoint>,
}

impl Forecast {
    pub fn is_fallback(&self) -> bool {
        self.source == ForecastSource::Fallback
    }
}
