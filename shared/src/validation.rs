//! Validation utilities for Harvest Guard
//!
//! Forecast data arrives from third-party APIs and offline clients, so each
//! point is range-checked before it reaches the risk engine.

use crate::models::ForecastPoint;

// ============================================================================
// Forecast Validations
// ============================================================================

/// Validate a percentage is within 0-100
pub fn validate_percentage(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err("Percentage must be between 0 and 100");
    }
    Ok(())
}

/// Validate temperature is physically plausible for surface weather
pub fn validate_temperature(celsius: f64) -> Result<(), &'static str> {
    if !celsius.is_finite() || !(-90.0..=60.0).contains(&celsius) {
        return Err("Temperature must be between -90 and 60 degrees Celsius");
    }
    Ok(())
}

/// Validate wind speed is non-negative
pub fn validate_wind_speed(kmh: f64) -> Result<(), &'static str> {
    if !kmh.is_finite() || kmh < 0.0 {
        return Err("Wind speed cannot be negative");
    }
    Ok(())
}

/// Validate a single forecast point
pub fn validate_forecast_point(point: &ForecastPoint) -> Result<(), &'static str> {
    validate_temperature(point.temperature)?;
    validate_percentage(point.humidity).map_err(|_| "Humidity must be between 0 and 100")?;
    validate_percentage(point.rainfall_probability)
        .map_err(|_| "Rainfall probability must be between 0 and 100")?;
    validate_wind_speed(point.wind_speed)?;
    Ok(())
}

/// Validate every point of a forecast
pub fn validate_forecast(forecast: &[ForecastPoint]) -> Result<(), &'static str> {
    forecast.iter().try_for_each(validate_forecast_point)
}
