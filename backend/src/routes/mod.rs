//! Route definitions for Harvest Guard

use axum::{middleware, routing::get, Router};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - weather, advisory and risk
        .nest("/weather", weather_routes(state))
}

/// Weather routes (protected)
fn weather_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/forecast", get(handlers::get_weather_forecast))
        .route("/advisory", get(handlers::get_weather_advisory))
        .route("/risk_assessment", get(handlers::get_risk_assessment))
        .route("/risk_prediction", get(handlers::get_risk_prediction))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
