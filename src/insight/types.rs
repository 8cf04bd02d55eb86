use serde::{Deserialize, Serialize};
use std::fmt;

/// The six fixed insight categories, in derivation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightCategory {
    SoilHealth,
    CropSuitability,
    WaterManagement,
    PestRisk,
    YieldPotential,
    ClimateAdaptation,
}

impl InsightCategory {
    pub fn all() -> [InsightCategory; 6] {
        [
            InsightCategory::SoilHealth,
            InsightCategory::CropSuitability,
            InsightCategory::WaterManagement,
            InsightCategory::PestRisk,
            InsightCategory::YieldPotential,
            InsightCategory::ClimateAdaptation,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InsightCategory::SoilHealth => "soil_health",
            InsightCategory::CropSuitability => "crop_suitability",
            InsightCategory::WaterManagement => "water_management",
            InsightCategory::PestRisk => "pest_risk",
            InsightCategory::YieldPotential => "yield_potential",
            InsightCategory::ClimateAdaptation => "climate_adaptation",
        }
    }

    /// Water management and pest risk are judged on risk bands; the other
    /// four on quality bands.
    pub fn is_risk_scored(&self) -> bool {
        matches!(
            self,
            InsightCategory::WaterManagement | InsightCategory::PestRisk
        )
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordinal quality label for score-banded categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityRating {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl fmt::Display for QualityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityRating::Poor => write!(f, "poor"),
            QualityRating::Fair => write!(f, "fair"),
            QualityRating::Good => write!(f, "good"),
            QualityRating::Excellent => write!(f, "excellent"),
        }
    }
}

/// Ordinal risk label for factor-counted categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Moderate => write!(f, "moderate"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Overall rating carried by an insight: quality bands or risk bands
/// depending on the category. Serializes as the bare label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverallRating {
    Quality(QualityRating),
    Risk(RiskLevel),
}

impl OverallRating {
    /// True when the category warrants recommendations: quality below good,
    /// or any elevated risk.
    pub fn needs_attention(&self) -> bool {
        match self {
            OverallRating::Quality(rating) => *rating < QualityRating::Good,
            OverallRating::Risk(level) => *level > RiskLevel::Low,
        }
    }
}

impl fmt::Display for OverallRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverallRating::Quality(rating) => rating.fmt(f),
            OverallRating::Risk(level) => level.fmt(f),
        }
    }
}

/// Whether the signals behind an insight came from live reads or synthesized
/// fallback data. Fallback taint is propagated end-to-end so consumers can
/// warn the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataTrust {
    Measured,
    Fallback,
}

/// A categorical, scored judgment derived from one run's source results.
/// Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub category: InsightCategory,
    pub overall: OverallRating,
    pub score: u8,
    pub issues: Vec<String>,
    pub strengths: Vec<String>,
    pub data_trust: DataTrust,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_is_fixed() {
        let all = InsightCategory::all();
        assert_eq!(all[0], InsightCategory::SoilHealth);
        assert_eq!(all[2], InsightCategory::WaterManagement);
        assert_eq!(all.len(), 6);
    }

    #[test]
    fn test_risk_scored_categories() {
        assert!(InsightCategory::WaterManagement.is_risk_scored());
        assert!(InsightCategory::PestRisk.is_risk_scored());
        assert!(!InsightCategory::SoilHealth.is_risk_scored());
        assert!(!InsightCategory::YieldPotential.is_risk_scored());
    }

    #[test]
    fn test_needs_attention_thresholds() {
        assert!(OverallRating::Quality(QualityRating::Poor).needs_attention());
        assert!(OverallRating::Quality(QualityRating::Fair).needs_attention());
        assert!(!OverallRating::Quality(QualityRating::Good).needs_attention());
        assert!(!OverallRating::Quality(QualityRating::Excellent).needs_attention());
        assert!(OverallRating::Risk(RiskLevel::High).needs_attention());
        assert!(OverallRating::Risk(RiskLevel::Moderate).needs_attention());
        assert!(!OverallRating::Risk(RiskLevel::Low).needs_attention());
    }

    #[test]
    fn test_overall_rating_serializes_as_bare_label() {
        let quality = OverallRating::Quality(QualityRating::Poor);
        assert_eq!(serde_json::to_string(&quality).unwrap(), "\"poor\"");
        let risk = OverallRating::Risk(RiskLevel::Moderate);
        assert_eq!(serde_json::to_string(&risk).unwrap(), "\"moderate\"");
    }
}
