//! Bangla storage advisories derived from forecast statistics

use crate::models::{BatchContext, ForecastPoint};

pub const HEAVY_RAIN_ADVISORY: &str =
    "আগামী কয়েক দিন বৃষ্টির সম্ভাবনা বেশি। ধান ঢেকে রাখুন এবং ভালোভাবে বায়ু চলাচল নিশ্চিত করুন।";
pub const HUMIDITY_ADVISORY: &str = "অত্যধিক আর্দ্রতা ছাঁচের ঝুঁকি বাড়ায়। ভেন্টিলেশন বৃদ্ধি করুন।";
pub const NORMAL_ADVISORY: &str = "আবহাওয়া পরিস্থিতি স্বাভাবিক। নিয়মিত পর্যবেক্ষণ চালিয়ে যান।";

/// Points above this rainfall probability count as rainy days
const RAINY_DAY_PROBABILITY: f64 = 75.0;
const RAINY_DAYS_FOR_ADVISORY: usize = 2;
const HEAT_MEAN_TEMPERATURE: f64 = 32.0;
const MOLD_MEAN_HUMIDITY: f64 = 80.0;

/// Heat advisory with the mean temperature rounded to whole degrees
pub fn heat_advisory(mean_temperature: f64) -> String {
    format!(
        "তাপমাত্রা অত্যধিক ({:.0}°C)। ধানের ছাদে ছায়া দিন এবং নিয়মিত আর্দ্রতা পরীক্ষা করুন।",
        mean_temperature
    )
}

/// Aggregate statistics over a forecast window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastSummary {
    pub rainy_days: usize,
    pub mean_temperature: f64,
    pub mean_humidity: f64,
}

impl ForecastSummary {
    /// Returns `None` for an empty forecast
    pub fn from_points(forecast: &[ForecastPoint]) -> Option<Self> {
        if forecast.is_empty() {
            return None;
        }
        let count = forecast.len() as f64;
        Some(Self {
            rainy_days: forecast
                .iter()
                .filter(|p| p.rainfall_probability > RAINY_DAY_PROBABILITY)
                .count(),
            mean_temperature: forecast.iter().map(|p| p.temperature).sum::<f64>() / count,
            mean_humidity: forecast.iter().map(|p| p.humidity).sum::<f64>() / count,
        })
    }
}

/// Generate storage advisories for a batch. All matching advisories are
/// returned in a fixed order; the normal-conditions message appears only
/// when nothing else matched.
pub fn get_bangla_advisory(_batch: &BatchContext, forecast: &[ForecastPoint]) -> Vec<String> {
    let mut advisories = Vec::new();

    if let Some(summary) = ForecastSummary::from_points(forecast) {
        if summary.rainy_days >= RAINY_DAYS_FOR_ADVISORY {
            advisories.push(HEAVY_RAIN_ADVISORY.to_string());
        }
        if summary.mean_temperature > HEAT_MEAN_TEMPERATURE {
            advisories.push(heat_advisory(summary.mean_temperature));
        }
        if summary.mean_humidity > MOLD_MEAN_HUMIDITY {
            advisories.push(HUMIDITY_ADVISORY.to_string());
        }
    }

    if advisories.is_empty() {
        advisories.push(NORMAL_ADVISORY.to_string());
    }

    advisories
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(temperature: f64, humidity: f64, rainfall_probability: f64) -> ForecastPoint {
        ForecastPoint {
            date: NaiveDate::from_ymd_opt(2024, 7, 10).unwrap(),
            temperature,
            humidity,
            rainfall_probability,
            wind_speed: 8.0,
            description: "Rain".to_string(),
        }
    }

    #[test]
    fn test_empty_forecast_gets_normal_advisory() {
        let advisories = get_bangla_advisory(&BatchContext::default(), &[]);
        assert_eq!(advisories, vec![NORMAL_ADVISORY.to_string()]);
    }

    #[test]
    fn test_single_rainy_day_is_not_enough() {
        let forecast = vec![point(25.0, 60.0, 90.0), point(25.0, 60.0, 10.0)];
        let advisories = get_bangla_advisory(&BatchContext::default(), &forecast);
        assert_eq!(advisories, vec![NORMAL_ADVISORY.to_string()]);
    }

    #[test]
    fn test_rain_threshold_is_strict() {
        let forecast = vec![point(25.0, 60.0, 75.0), point(25.0, 60.0, 75.0)];
        let summary = ForecastSummary::from_points(&forecast).unwrap();
        assert_eq!(summary.rainy_days, 0);
    }

    #[test]
    fn test_all_advisories_in_order() {
        let forecast = vec![point(34.0, 85.0, 90.0), point(36.0, 88.0, 80.0)];
        let advisories = get_bangla_advisory(&BatchContext::default(), &forecast);
        assert_eq!(
            advisories,
            vec![
                HEAVY_RAIN_ADVISORY.to_string(),
                heat_advisory(35.0),
                HUMIDITY_ADVISORY.to_string(),
            ]
        );
    }

    #[test]
    fn test_heat_advisory_rounds_mean() {
        assert!(heat_advisory(33.4).contains("(33°C)"));
        assert!(heat_advisory(33.6).contains("(34°C)"));
    }

    #[test]
    fn test_summary_means() {
        let forecast = vec![point(30.0, 70.0, 0.0), point(34.0, 90.0, 0.0)];
        let summary = ForecastSummary::from_points(&forecast).unwrap();
        assert_eq!(summary.mean_temperature, 32.0);
        assert_eq!(summary.mean_humidity, 80.0);
    }
}
