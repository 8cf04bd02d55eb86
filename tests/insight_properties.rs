//! Property tests for the insight derivation engine: determinism, fixed
//! category order, score bounds, and band/label consistency across the
//! plausible signal space.

use agrisense_core::insight::{derive_insights, InsightCategory, OverallRating, RiskLevel};
use agrisense_core::pipeline::DataCollection;
use agrisense_core::sources::{
    EnvironmentalData, ImageryData, LocationData, SourceKind, SourcePayload, SourceResult,
    WeatherData,
};
use proptest::prelude::*;
use std::time::Duration;

fn collection(weather: WeatherData, environmental: EnvironmentalData) -> DataCollection {
    DataCollection {
        location: SourceResult::fetched(
            SourceKind::Location,
            SourcePayload::Location(LocationData::from_coordinates(21.1458, 79.0882)),
            Duration::ZERO,
        ),
        weather: SourceResult::fetched(
            SourceKind::Weather,
            SourcePayload::Weather(weather),
            Duration::ZERO,
        ),
        environmental: SourceResult::fetched(
            SourceKind::Environmental,
            SourcePayload::Environmental(environmental),
            Duration::ZERO,
        ),
        imagery: SourceResult::fetched(
            SourceKind::Imagery,
            SourcePayload::Imagery(ImageryData::default()),
            Duration::ZERO,
        ),
    }
}

prop_compose! {
    fn arb_weather()(
        temperature_c in -5.0f64..45.0,
        humidity_pct in 0.0f64..100.0,
        wind_speed_kmh in 0.0f64..50.0,
        rainfall_mm in 0.0f64..40.0,
    ) -> WeatherData {
        WeatherData {
            temperature_c,
            humidity_pct,
            wind_speed_kmh,
            rainfall_mm,
            ..WeatherData::default()
        }
    }
}

prop_compose! {
    fn arb_environmental()(
        ndvi in 0.0f64..1.0,
        land_surface_temp_c in -5.0f64..50.0,
        soil_moisture in 0.0f64..0.6,
        soil_ph in 3.0f64..10.0,
        organic_carbon_pct in 0.0f64..2.0,
    ) -> EnvironmentalData {
        EnvironmentalData {
            ndvi,
            land_surface_temp_c,
            soil_moisture,
            soil_ph,
            organic_carbon_pct,
            ..EnvironmentalData::default()
        }
    }
}

proptest! {
    #[test]
    fn derivation_is_deterministic(weather in arb_weather(), env in arb_environmental()) {
        let data = collection(weather, env);
        let first = serde_json::to_string(&derive_insights(&data)).unwrap();
        let second = serde_json::to_string(&derive_insights(&data)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn always_six_insights_in_fixed_order(weather in arb_weather(), env in arb_environmental()) {
        let insights = derive_insights(&collection(weather, env));
        prop_assert_eq!(insights.len(), 6);
        for (insight, category) in insights.iter().zip(InsightCategory::all()) {
            prop_assert_eq!(insight.category, category);
        }
    }

    #[test]
    fn scores_stay_in_range(weather in arb_weather(), env in arb_environmental()) {
        for insight in derive_insights(&collection(weather, env)) {
            prop_assert!(insight.score <= 100);
        }
    }

    #[test]
    fn risk_labels_track_factor_counts(weather in arb_weather(), env in arb_environmental()) {
        for insight in derive_insights(&collection(weather, env)) {
            if !insight.category.is_risk_scored() {
                continue;
            }
            let expected = match insight.issues.len() {
                n if n >= 3 => RiskLevel::High,
                n if n >= 1 => RiskLevel::Moderate,
                _ => RiskLevel::Low,
            };
            prop_assert_eq!(insight.overall, OverallRating::Risk(expected));
        }
    }

    #[test]
    fn quality_labels_match_score_bands(weather in arb_weather(), env in arb_environmental()) {
        use agrisense_core::insight::QualityRating;
        for insight in derive_insights(&collection(weather, env)) {
            if insight.category.is_risk_scored() {
                continue;
            }
            let expected = match insight.score {
                s if s >= 80 => QualityRating::Excellent,
                s if s >= 60 => QualityRating::Good,
                s if s >= 40 => QualityRating::Fair,
                _ => QualityRating::Poor,
            };
            prop_assert_eq!(insight.overall, OverallRating::Quality(expected));
        }
    }
}
