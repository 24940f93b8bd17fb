//! Business logic services for Harvest Guard

pub mod batch;
pub mod forecast;
pub mod risk;
pub mod weather;

pub use batch::BatchService;
pub use forecast::ForecastProvider;
pub use risk::RiskService;
pub use weather::WeatherService;
