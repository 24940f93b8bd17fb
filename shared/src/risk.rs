//! ETCL (Estimated Time to Critical Loss) risk engine
//!
//! Every forecast point is checked against a static table of threshold
//! rules. Each firing appends the rule's factor and caps the ETCL at the
//! rule's ceiling, so the single worst period in the window dominates.

use serde::{Deserialize, Serialize};

use crate::models::{BatchContext, ForecastPoint, RiskLevel, RiskVerdict, NO_RISK_ETCL_HOURS};

/// Threshold rules known to the engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskRule {
    /// Warm and humid storage air
    Mold,
    /// Likely rain on uncovered or poorly sealed stock
    Rainfall,
}

/// A threshold check and its effect on the verdict
pub struct ThresholdRule {
    pub rule: RiskRule,
    pub applies: fn(&BatchContext, &ForecastPoint) -> bool,
    pub factor: &'static str,
    pub etcl_ceiling: u32,
}

/// Rules in evaluation order
pub static RISK_RULES: [ThresholdRule; 2] = [
    ThresholdRule {
        rule: RiskRule::Mold,
        applies: mold_conditions,
        factor: "উচ্চ তাপমাত্রা এবং আর্দ্রতা - ছাঁচের ঝুঁকি",
        etcl_ceiling: 48,
    },
    ThresholdRule {
        rule: RiskRule::Rainfall,
        applies: heavy_rain_likely,
        factor: "বৃষ্টির উচ্চ ঝুঁকি - নিরাপদ সংরক্ষণ প্রয়োজন",
        etcl_ceiling: 24,
    },
];

fn mold_conditions(_batch: &BatchContext, point: &ForecastPoint) -> bool {
    point.temperature > 28.0 && point.humidity > 75.0
}

fn heavy_rain_likely(_batch: &BatchContext, point: &ForecastPoint) -> bool {
    point.rainfall_probability > 80.0
}

impl RiskRule {
    pub fn threshold(&self) -> &'static ThresholdRule {
        match self {
            RiskRule::Mold => &RISK_RULES[0],
            RiskRule::Rainfall => &RISK_RULES[1],
        }
    }

    /// Factor text recorded each time this rule fires
    pub fn factor(&self) -> &'static str {
        self.threshold().factor
    }
}

/// Rules that fire for a single forecast point, in table order
pub fn triggered_rules<'a>(
    batch: &'a BatchContext,
    point: &'a ForecastPoint,
) -> impl Iterator<Item = &'static ThresholdRule> + 'a {
    RISK_RULES.iter().filter(move |r| (r.applies)(batch, point))
}

/// Assess spoilage risk for a batch over a forecast window.
///
/// Total over every input: an empty forecast yields the no-risk verdict.
pub fn calculate_etcl(batch: &BatchContext, forecast: &[ForecastPoint]) -> RiskVerdict {
    let mut etcl_hours = NO_RISK_ETCL_HOURS;
    let mut risk_factors = Vec::new();

    for point in forecast {
        for rule in triggered_rules(batch, point) {
            risk_factors.push(rule.factor.to_string());
            etcl_hours = etcl_hours.min(rule.etcl_ceiling);
        }
    }

    let risk_level = RiskLevel::from_etcl_hours(etcl_hours);
    let recommendations = risk_level
        .recommendations()
        .iter()
        .map(|r| r.to_string())
        .collect();

    RiskVerdict {
        etcl_hours,
        risk_level,
        risk_factors,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(temperature: f64, humidity: f64, rainfall_probability: f64) -> ForecastPoint {
        ForecastPoint {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            temperature,
            humidity,
            rainfall_probability,
            wind_speed: 10.0,
            description: "Clouds".to_string(),
        }
    }

    #[test]
    fn test_empty_forecast_is_no_risk() {
        let verdict = calculate_etcl(&BatchContext::default(), &[]);
        assert_eq!(verdict, RiskVerdict::no_risk());
    }

    #[test]
    fn test_mold_rule_thresholds_are_strict() {
        let batch = BatchContext::default();
        assert_eq!(triggered_rules(&batch, &point(28.0, 90.0, 0.0)).count(), 0);
        assert_eq!(triggered_rules(&batch, &point(30.0, 75.0, 0.0)).count(), 0);
        assert_eq!(triggered_rules(&batch, &point(28.1, 75.1, 0.0)).count(), 1);
    }

    #[test]
    fn test_rainfall_rule_threshold_is_strict() {
        let batch = BatchContext::default();
        assert_eq!(triggered_rules(&batch, &point(20.0, 50.0, 80.0)).count(), 0);
        let fired: Vec<RiskRule> = triggered_rules(&batch, &point(20.0, 50.0, 80.5))
            .map(|r| r.rule)
            .collect();
        assert_eq!(fired, vec![RiskRule::Rainfall]);
    }

    #[test]
    fn test_rule_lookup_matches_table() {
        for rule in &RISK_RULES {
            assert_eq!(rule.rule.threshold().rule, rule.rule);
            assert_eq!(rule.rule.factor(), rule.factor);
        }
    }

    #[test]
    fn test_repeated_firings_are_not_deduplicated() {
        let forecast = vec![point(31.0, 85.0, 10.0), point(32.0, 90.0, 10.0)];
        let verdict = calculate_etcl(&BatchContext::default(), &forecast);
        assert_eq!(verdict.etcl_hours, 48);
        assert_eq!(verdict.risk_factors.len(), 2);
        assert_eq!(verdict.risk_factors[0], verdict.risk_factors[1]);
    }

    #[test]
    fn test_worst_point_dominates() {
        let forecast = vec![
            point(31.0, 85.0, 10.0),
            point(22.0, 60.0, 95.0),
            point(31.0, 85.0, 10.0),
        ];
        let verdict = calculate_etcl(&BatchContext::default(), &forecast);
        assert_eq!(verdict.etcl_hours, 24);
        assert_eq!(verdict.risk_level, RiskLevel::Critical);
        assert_eq!(
            verdict.risk_factors,
            vec![
                RiskRule::Mold.factor().to_string(),
                RiskRule::Rainfall.factor().to_string(),
                RiskRule::Mold.factor().to_string(),
            ]
        );
    }
}
