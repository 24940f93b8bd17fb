//! WebAssembly module for Harvest Guard
//!
//! Provides client-side computation for:
//! - ETCL risk assessment
//! - Bangla storage advisories
//! - Offline forecast validation
//!
//! Forecasts and results cross the boundary as JSON strings.

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn parse_forecast(forecast_json: &str) -> Result<Vec<ForecastPoint>, String> {
    let forecast: Vec<ForecastPoint> = serde_json::from_str(forecast_json)
        .map_err(|e| format!("Invalid forecast JSON: {}", e))?;
    validate_forecast(&forecast).map_err(|e| e.to_string())?;
    Ok(forecast)
}

fn context(storage_location: &str) -> BatchContext {
    BatchContext {
        batch_id: None,
        storage_location: storage_location.to_string(),
        storage_type: None,
    }
}

fn assess(forecast_json: &str, storage_location: &str) -> Result<String, String> {
    let forecast = parse_forecast(forecast_json)?;
    let verdict = shared::calculate_etcl(&context(storage_location), &forecast);
    serde_json::to_string(&verdict).map_err(|e| e.to_string())
}

fn advise(forecast_json: &str, storage_location: &str) -> Result<String, String> {
    let forecast = parse_forecast(forecast_json)?;
    let advisories = shared::get_bangla_advisory(&context(storage_location), &forecast);
    serde_json::to_string(&advisories).map_err(|e| e.to_string())
}

/// Assess spoilage risk; returns the verdict as JSON
#[wasm_bindgen]
pub fn calculate_etcl(forecast_json: &str, storage_location: &str) -> Result<String, JsValue> {
    assess(forecast_json, storage_location).map_err(|e| JsValue::from_str(&e))
}

/// Generate Bangla advisories; returns a JSON array of strings
#[wasm_bindgen]
pub fn get_bangla_advisory(forecast_json: &str, storage_location: &str) -> Result<String, JsValue> {
    advise(forecast_json, storage_location).map_err(|e| JsValue::from_str(&e))
}

/// Classify an ETCL estimate into a risk level code
#[wasm_bindgen]
pub fn classify_risk_level(etcl_hours: u32) -> String {
    RiskLevel::from_etcl_hours(etcl_hours).to_string()
}

/// Check a forecast JSON document before queueing it for sync
#[wasm_bindgen]
pub fn is_valid_forecast(forecast_json: &str) -> bool {
    parse_forecast(forecast_json).is_ok()
}
