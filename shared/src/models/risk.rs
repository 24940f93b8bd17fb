//! Spoilage risk models

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::types::UnknownCode;

/// ETCL value used when no risk rule fires
pub const NO_RISK_ETCL_HOURS: u32 = 999;

/// Ordinal severity classification derived from ETCL
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Classify an ETCL estimate. Thresholds are checked from most to least
    /// severe and the first match wins.
    pub fn from_etcl_hours(etcl_hours: u32) -> Self {
        match etcl_hours {
            0..=24 => RiskLevel::Critical,
            25..=48 => RiskLevel::High,
            49..=120 => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
            RiskLevel::Critical => "CRITICAL",
        }
    }

    /// Fixed Bangla recommendations for this level
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            RiskLevel::Critical => &[
                "জরুরি: আজই ধান কাটুন বা গুদাম দিয়ে সম্পূর্ণভাবে ঢেকে দিন।",
                "নিয়মিত বায়ু চলাচল এবং আর্দ্রতা পর্যবেক্ষণ শুরু করুন।",
            ],
            RiskLevel::High => &[
                "ধান ঢেকে রাখুন এবং অতিরিক্ত বায়ু চলাচলের ব্যবস্থা করুন।",
                "প্রতি ২ ঘণ্টায় আর্দ্রতা পরীক্ষা করুন।",
            ],
            RiskLevel::Medium => &[
                "নিয়মিত পর্যবেক্ষণ চালিয়ে যান।",
                "ভাল বায়ু চলাচল নিশ্চিত করুন।",
            ],
            RiskLevel::Low => &["বর্তমান পরিস্থিতি নিরাপদ। স্ট্যান্ডার্ড সংরক্ষণ পদ্ধতি অনুসরণ করুন।"],
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(RiskLevel::Low),
            "MEDIUM" => Ok(RiskLevel::Medium),
            "HIGH" => Ok(RiskLevel::High),
            "CRITICAL" => Ok(RiskLevel::Critical),
            _ => Err(UnknownCode::new("risk level", s)),
        }
    }
}

/// Result of an ETCL risk assessment for one batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskVerdict {
    pub etcl_hours: u32,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
    pub recommendations: Vec<String>,
}

impl RiskVerdict {
    /// Verdict for a forecast in which no rule fired
    pub fn no_risk() -> Self {
        let risk_level = RiskLevel::from_etcl_hours(NO_RISK_ETCL_HOURS);
        Self {
            etcl_hours: NO_RISK_ETCL_HOURS,
            risk_level,
            risk_factors: Vec::new(),
            recommendations: risk_level
                .recommendations()
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }
}
