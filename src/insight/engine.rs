//! # Insight Derivation Engine
//!
//! Maps one run's aggregated source results into the six fixed insight
//! categories using ordered threshold rules. Synchronous and pure: the only
//! inputs are the normalized payloads, the only outputs are [`Insight`]
//! values, and every threshold is a named constant in [`crate::constants`].

use crate::constants::{scoring, soil, vegetation, weather};
use crate::insight::types::{
    DataTrust, Insight, InsightCategory, OverallRating, QualityRating, RiskLevel,
};
use crate::pipeline::types::DataCollection;
use crate::sources::{EnvironmentalData, ImageryData, WeatherData};

/// Derive the full insight set for one run. Always returns exactly six
/// insights in the fixed category order.
pub fn derive_insights(data: &DataCollection) -> Vec<Insight> {
    let weather = data.weather_data();
    let environmental = data.environmental_data();
    let imagery = data.imagery_data();

    let env_trust = trust_of(&[data.environmental.is_fallback]);
    let env_weather_trust = trust_of(&[data.environmental.is_fallback, data.weather.is_fallback]);
    let weather_imagery_trust = trust_of(&[data.weather.is_fallback, data.imagery.is_fallback]);

    vec![
        soil_health(&environmental, env_trust),
        crop_suitability(&environmental, &weather, env_weather_trust),
        water_management(&environmental, &weather, env_weather_trust),
        pest_risk(&weather, &imagery, weather_imagery_trust),
        yield_potential(&environmental, &weather, env_weather_trust),
        climate_adaptation(&weather, &environmental, env_weather_trust),
    ]
}

fn trust_of(fallback_flags: &[bool]) -> DataTrust {
    if fallback_flags.iter().any(|flag| *flag) {
        DataTrust::Fallback
    } else {
        DataTrust::Measured
    }
}

fn soil_health(env: &EnvironmentalData, trust: DataTrust) -> Insight {
    let mut issues = Vec::new();
    let mut strengths = Vec::new();

    if env.soil_ph < soil::PH_ACIDIC_MAX {
        issues.push(format!("acidic soil (pH {:.1})", env.soil_ph));
    } else if env.soil_ph > soil::PH_ALKALINE_MIN {
        issues.push(format!("alkaline soil (pH {:.1})", env.soil_ph));
    } else {
        strengths.push("balanced soil pH".to_string());
    }

    if env.soil_moisture < soil::MOISTURE_LOW_MAX {
        issues.push("low soil moisture".to_string());
    } else if env.soil_moisture > soil::MOISTURE_HIGH_MIN {
        issues.push("waterlogged soil".to_string());
    } else if (soil::MOISTURE_OPTIMAL_MIN..=soil::MOISTURE_OPTIMAL_MAX)
        .contains(&env.soil_moisture)
    {
        strengths.push("soil moisture in optimal band".to_string());
    }

    if env.organic_carbon_pct < soil::ORGANIC_CARBON_LOW_MAX {
        issues.push("depleted organic matter".to_string());
    } else {
        strengths.push("adequate organic matter".to_string());
    }

    quality_insight(InsightCategory::SoilHealth, issues, strengths, trust)
}

fn crop_suitability(env: &EnvironmentalData, weather_data: &WeatherData, trust: DataTrust) -> Insight {
    let mut issues = Vec::new();
    let mut strengths = Vec::new();

    if weather_data.temperature_c > weather::TEMP_HEAT_STRESS_MIN {
        issues.push("heat stress for most field crops".to_string());
    } else if weather_data.temperature_c < weather::TEMP_COLD_STRESS_MAX {
        issues.push("cold stress limits crop range".to_string());
    } else if (weather::TEMP_OPTIMAL_MIN..=weather::TEMP_OPTIMAL_MAX)
        .contains(&weather_data.temperature_c)
    {
        strengths.push("temperatures in growing-comfort band".to_string());
    }

    if env.ndvi < vegetation::NDVI_SPARSE_MAX {
        issues.push("sparse canopy cover".to_string());
    } else if env.ndvi >= vegetation::NDVI_DENSE_MIN {
        strengths.push("dense, healthy canopy".to_string());
    }

    if env.soil_ph > soil::PH_ALKALINE_MIN {
        issues.push("alkaline soil narrows viable crop list".to_string());
    }

    if env.soil_texture.contains("loam") {
        strengths.push("workable loam-class soil texture".to_string());
    }

    quality_insight(InsightCategory::CropSuitability, issues, strengths, trust)
}

fn water_management(env: &EnvironmentalData, weather_data: &WeatherData, trust: DataTrust) -> Insight {
    let mut factors = Vec::new();
    let mut strengths = Vec::new();

    if env.soil_moisture < soil::MOISTURE_LOW_MAX {
        factors.push("soil moisture deficit".to_string());
    } else if env.soil_moisture > soil::MOISTURE_HIGH_MIN {
        factors.push("excess moisture, drainage needed".to_string());
    } else {
        strengths.push("soil moisture within workable range".to_string());
    }

    if weather_data.expected_rainfall_mm() < weather::EXPECTED_RAINFALL_LOW_MAX_MM {
        factors.push("little rainfall expected".to_string());
    } else {
        strengths.push("rainfall expected in forecast window".to_string());
    }

    if weather_data.temperature_c >= weather::TEMP_WATER_DEMAND_MIN {
        factors.push("high evapotranspiration demand".to_string());
    }

    risk_insight(InsightCategory::WaterManagement, factors, strengths, trust)
}

fn pest_risk(weather_data: &WeatherData, imagery: &ImageryData, trust: DataTrust) -> Insight {
    let mut factors = Vec::new();
    let mut strengths = Vec::new();

    if weather_data.humidity_pct >= weather::HUMIDITY_PEST_MIN {
        factors.push("high humidity favors fungal growth".to_string());
    } else {
        strengths.push("humidity below fungal-pressure threshold".to_string());
    }

    if (weather::PEST_TEMP_MIN..=weather::PEST_TEMP_MAX).contains(&weather_data.temperature_c) {
        factors.push("temperatures in pest activity range".to_string());
    }

    if weather_data.rainfall_mm >= weather::RECENT_RAINFALL_PEST_MIN_MM {
        factors.push("standing moisture from recent rain".to_string());
    }

    if imagery.disease_detected() {
        factors.push("disease signatures detected in field imagery".to_string());
    }

    risk_insight(InsightCategory::PestRisk, factors, strengths, trust)
}

fn yield_potential(env: &EnvironmentalData, weather_data: &WeatherData, trust: DataTrust) -> Insight {
    let mut issues = Vec::new();
    let mut strengths = Vec::new();

    if env.ndvi < vegetation::NDVI_SPARSE_MAX {
        issues.push("sparse canopy limits yield ceiling".to_string());
    } else if env.ndvi >= vegetation::NDVI_DENSE_MIN {
        strengths.push("canopy density tracks a strong season".to_string());
    }

    if env.soil_moisture < soil::MOISTURE_LOW_MAX {
        issues.push("moisture deficit during growth".to_string());
    } else if (soil::MOISTURE_OPTIMAL_MIN..=soil::MOISTURE_OPTIMAL_MAX)
        .contains(&env.soil_moisture)
    {
        strengths.push("moisture supports grain fill".to_string());
    }

    if weather_data.temperature_c > weather::TEMP_HEAT_STRESS_MIN {
        issues.push("heat stress during critical growth stages".to_string());
    } else if (weather::TEMP_OPTIMAL_MIN..=weather::TEMP_OPTIMAL_MAX)
        .contains(&weather_data.temperature_c)
    {
        strengths.push("temperatures favor steady development".to_string());
    }

    quality_insight(InsightCategory::YieldPotential, issues, strengths, trust)
}

fn climate_adaptation(weather_data: &WeatherData, env: &EnvironmentalData, trust: DataTrust) -> Insight {
    let mut issues = Vec::new();
    let mut strengths = Vec::new();

    let lst_delta = env.land_surface_temp_c - weather_data.temperature_c;
    if lst_delta > weather::LST_DELTA_HIGH_C {
        issues.push("bare ground retains surface heat".to_string());
    } else {
        strengths.push("ground cover moderates surface heat".to_string());
    }

    if weather_data.wind_speed_kmh > weather::WIND_HIGH_KMH {
        issues.push("sustained wind exposure".to_string());
    } else {
        strengths.push("low wind exposure".to_string());
    }

    if weather_data.temperature_c > weather::TEMP_HEAT_STRESS_MIN {
        issues.push("extreme heat events".to_string());
    }

    quality_insight(InsightCategory::ClimateAdaptation, issues, strengths, trust)
}

/// Score then band a quality category: base score, fixed penalty per issue,
/// fixed credit per strength, clamped to the score range.
fn quality_insight(
    category: InsightCategory,
    issues: Vec<String>,
    strengths: Vec<String>,
    trust: DataTrust,
) -> Insight {
    let score = compute_score(issues.len(), strengths.len());
    let overall = OverallRating::Quality(quality_band(score));
    Insight {
        category,
        overall,
        score,
        issues,
        strengths,
        data_trust: trust,
    }
}

/// Band a risk category by contributing factor count; the score is kept for
/// display parity with quality categories.
fn risk_insight(
    category: InsightCategory,
    factors: Vec<String>,
    strengths: Vec<String>,
    trust: DataTrust,
) -> Insight {
    let score = compute_score(factors.len(), strengths.len());
    let overall = OverallRating::Risk(risk_band(factors.len()));
    Insight {
        category,
        overall,
        score,
        issues: factors,
        strengths,
        data_trust: trust,
    }
}

fn compute_score(issue_count: usize, strength_count: usize) -> u8 {
    let raw = scoring::BASE_SCORE - scoring::ISSUE_PENALTY * issue_count as i32
        + scoring::STRENGTH_CREDIT * strength_count as i32;
    raw.clamp(scoring::SCORE_MIN, scoring::SCORE_MAX) as u8
}

fn quality_band(score: u8) -> QualityRating {
    let score = i32::from(score);
    if score >= scoring::EXCELLENT_MIN {
        QualityRating::Excellent
    } else if score >= scoring::GOOD_MIN {
        QualityRating::Good
    } else if score >= scoring::FAIR_MIN {
        QualityRating::Fair
    } else {
        QualityRating::Poor
    }
}

fn risk_band(factor_count: usize) -> RiskLevel {
    if factor_count >= scoring::RISK_HIGH_MIN_FACTORS {
        RiskLevel::High
    } else if factor_count >= scoring::RISK_MODERATE_MIN_FACTORS {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{SourceKind, SourcePayload, SourceResult};
    use std::time::Duration;

    fn collection(weather: WeatherData, env: EnvironmentalData) -> DataCollection {
        DataCollection {
            location: SourceResult::fetched(
                SourceKind::Location,
                SourcePayload::Location(crate::sources::LocationData::from_coordinates(
                    21.1458, 79.0882,
                )),
                Duration::ZERO,
            ),
            weather: SourceResult::fetched(
                SourceKind::Weather,
                SourcePayload::Weather(weather),
                Duration::ZERO,
            ),
            environmental: SourceResult::fetched(
                SourceKind::Environmental,
                SourcePayload::Environmental(env),
                Duration::ZERO,
            ),
            imagery: SourceResult::fetched(
                SourceKind::Imagery,
                SourcePayload::Imagery(ImageryData::default()),
                Duration::ZERO,
            ),
        }
    }

    fn nagpur_collection() -> DataCollection {
        let weather = WeatherData {
            temperature_c: 32.0,
            humidity_pct: 85.0,
            ..WeatherData::default()
        };
        let env = EnvironmentalData {
            soil_ph: 5.2,
            soil_moisture: 0.12,
            ..EnvironmentalData::default()
        };
        collection(weather, env)
    }

    fn insight_for(insights: &[Insight], category: InsightCategory) -> &Insight {
        insights
            .iter()
            .find(|i| i.category == category)
            .expect("category missing")
    }

    #[test]
    fn test_always_six_insights_in_fixed_order() {
        let insights = derive_insights(&nagpur_collection());
        assert_eq!(insights.len(), 6);
        for (insight, category) in insights.iter().zip(InsightCategory::all()) {
            assert_eq!(insight.category, category);
        }
    }

    #[test]
    fn test_acidic_dry_soil_scores_poor() {
        let insights = derive_insights(&nagpur_collection());
        let soil = insight_for(&insights, InsightCategory::SoilHealth);
        assert_eq!(soil.overall, OverallRating::Quality(QualityRating::Poor));
        assert_eq!(soil.issues.len(), 2);
        assert!(soil.issues[0].contains("acidic"));
        assert!(soil.issues[1].contains("low soil moisture"));
    }

    #[test]
    fn test_humid_warm_weather_is_moderate_pest_risk() {
        let insights = derive_insights(&nagpur_collection());
        let pest = insight_for(&insights, InsightCategory::PestRisk);
        assert_eq!(pest.overall, OverallRating::Risk(RiskLevel::Moderate));
        assert!(pest.issues.iter().any(|f| f.contains("humidity")));
    }

    #[test]
    fn test_dry_hot_rainless_conditions_are_high_water_risk() {
        let insights = derive_insights(&nagpur_collection());
        let water = insight_for(&insights, InsightCategory::WaterManagement);
        assert_eq!(water.overall, OverallRating::Risk(RiskLevel::High));
        assert_eq!(water.issues.len(), 3);
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let data = nagpur_collection();
        let first = serde_json::to_string(&derive_insights(&data)).unwrap();
        let second = serde_json::to_string(&derive_insights(&data)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fallback_taint_reaches_insights() {
        let mut data = nagpur_collection();
        data.environmental.is_fallback = true;
        let insights = derive_insights(&data);
        let soil = insight_for(&insights, InsightCategory::SoilHealth);
        assert_eq!(soil.data_trust, DataTrust::Fallback);
        // Pest risk does not read environmental data and stays trusted.
        let pest = insight_for(&insights, InsightCategory::PestRisk);
        assert_eq!(pest.data_trust, DataTrust::Measured);
    }

    #[test]
    fn test_disease_in_imagery_raises_pest_factor() {
        let mut data = nagpur_collection();
        data.imagery = SourceResult::fetched(
            SourceKind::Imagery,
            SourcePayload::Imagery(ImageryData {
                assessments: vec![crate::sources::ImageAssessment {
                    image_id: "img-1".to_string(),
                    crop_health: "stressed".to_string(),
                    disease: Some("leaf_rust".to_string()),
                    disease_confidence: 0.9,
                    soil_class: "loam".to_string(),
                }],
            }),
            Duration::ZERO,
        );
        let insights = derive_insights(&data);
        let pest = insight_for(&insights, InsightCategory::PestRisk);
        assert_eq!(pest.overall, OverallRating::Risk(RiskLevel::High));
        assert!(pest.issues.iter().any(|f| f.contains("disease")));
    }

    #[test]
    fn test_benign_conditions_score_well_everywhere() {
        // 19 °C sits in the growing-comfort band but below the pest
        // activity range, so no risk factor fires.
        let weather = WeatherData {
            temperature_c: 19.0,
            humidity_pct: 55.0,
            rainfall_mm: 6.0,
            ..WeatherData::default()
        };
        let env = EnvironmentalData {
            ndvi: 0.68,
            soil_moisture: 0.28,
            soil_ph: 6.5,
            land_surface_temp_c: 24.0,
            ..EnvironmentalData::default()
        };
        let insights = derive_insights(&collection(weather, env));
        for insight in &insights {
            assert!(
                !insight.overall.needs_attention(),
                "{} unexpectedly needs attention: {:?}",
                insight.category,
                insight
            );
        }
    }
}
