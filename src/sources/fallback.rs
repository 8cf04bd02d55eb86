//! # Fallback Synthesizer
//!
//! Deterministic, zero-I/O generator of plausible placeholder data per source
//! family, substituted whenever a live fetch fails or times out. Synthesized
//! results always carry `is_fallback = true` so downstream consumers can
//! surface degraded trust end-to-end.

use crate::constants::fallback as baseline;
use crate::pipeline::types::PipelineQuery;
use crate::sources::{
    EnvironmentalData, ForecastDay, ImageAssessment, ImageryData, LocationData, SourceErrorKind,
    SourceKind, SourcePayload, SourceResult, WeatherData,
};

/// Synthesizes placeholder source data. Stateless; every method is a pure
/// function of the source kind and the query's (defaulted) coordinates.
#[derive(Debug, Clone, Default)]
pub struct FallbackSynthesizer;

impl FallbackSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Produce a fallback [`SourceResult`] for the given family. Never fails
    /// and performs no I/O.
    pub fn synthesize(&self, kind: SourceKind, query: &PipelineQuery) -> SourceResult {
        let payload = self.payload_for(kind, query);
        SourceResult {
            source: kind,
            success: false,
            payload: Some(payload),
            is_fallback: true,
            error: None,
            fetch_duration_ms: 0,
        }
    }

    /// Substitute a failed live fetch: fallback payload plus the original
    /// error classification and fetch duration.
    pub fn substitute(
        &self,
        query: &PipelineQuery,
        failed: &SourceResult,
    ) -> SourceResult {
        let mut result = self.synthesize(failed.source, query);
        result.error = failed.error;
        result.fetch_duration_ms = failed.fetch_duration_ms;
        result
    }

    /// Substitute with an explicit classification, for failures observed
    /// outside the executor.
    pub fn substitute_with_error(
        &self,
        kind: SourceKind,
        query: &PipelineQuery,
        error: SourceErrorKind,
    ) -> SourceResult {
        let mut result = self.synthesize(kind, query);
        result.error = Some(error);
        result
    }

    fn payload_for(&self, kind: SourceKind, query: &PipelineQuery) -> SourcePayload {
        let (lat, lon) = query
            .coordinates
            .as_ref()
            .map(|c| (c.latitude, c.longitude))
            .unwrap_or((baseline::DEFAULT_LATITUDE, baseline::DEFAULT_LONGITUDE));
        let seed = seed_hash(kind, lat, lon);

        match kind {
            SourceKind::Location => SourcePayload::Location(LocationData {
                latitude: lat,
                longitude: lon,
                display_name: query
                    .region
                    .clone()
                    .unwrap_or_else(|| "default region".to_string()),
                resolved_from: "default".to_string(),
            }),
            SourceKind::Weather => SourcePayload::Weather(self.weather(seed)),
            SourceKind::Environmental => SourcePayload::Environmental(self.environmental(seed)),
            SourceKind::Imagery => SourcePayload::Imagery(self.imagery()),
        }
    }

    // Offsets are kept small enough that synthesized values never cross the
    // rule thresholds the baselines were chosen to sit on.
    fn weather(&self, seed: u64) -> WeatherData {
        let temperature_c = baseline::WEATHER_TEMPERATURE_C + (seed % 5) as f64 * 0.2;
        let humidity_pct = baseline::WEATHER_HUMIDITY_PCT + ((seed >> 3) % 7) as f64 * 0.5;
        let forecast = (1..=baseline::FORECAST_DAYS)
            .map(|day| ForecastDay {
                date: format!("day_{day}"),
                temp_max_c: temperature_c + 2.0,
                temp_min_c: temperature_c - 6.0,
                rain_mm: ((seed >> (day * 4)) % 3) as f64 * 0.4,
                condition: baseline::WEATHER_CONDITION.to_string(),
            })
            .collect();

        WeatherData {
            temperature_c,
            humidity_pct,
            wind_speed_kmh: baseline::WEATHER_WIND_KMH,
            rainfall_mm: baseline::WEATHER_RAINFALL_MM,
            condition: baseline::WEATHER_CONDITION.to_string(),
            forecast,
        }
    }

    fn environmental(&self, seed: u64) -> EnvironmentalData {
        EnvironmentalData {
            ndvi: baseline::ENV_NDVI + (seed % 7) as f64 * 0.005,
            land_surface_temp_c: baseline::ENV_LAND_SURFACE_TEMP_C + ((seed >> 2) % 4) as f64 * 0.25,
            soil_moisture: baseline::ENV_SOIL_MOISTURE + ((seed >> 5) % 5) as f64 * 0.002,
            soil_ph: baseline::ENV_SOIL_PH,
            soil_texture: baseline::ENV_SOIL_TEXTURE.to_string(),
            organic_carbon_pct: baseline::ENV_ORGANIC_CARBON_PCT,
        }
    }

    fn imagery(&self) -> ImageryData {
        ImageryData {
            assessments: vec![ImageAssessment {
                image_id: "synthesized".to_string(),
                crop_health: baseline::IMAGERY_CROP_HEALTH.to_string(),
                disease: None,
                disease_confidence: 0.0,
                soil_class: baseline::IMAGERY_SOIL_CLASS.to_string(),
            }],
        }
    }
}

/// FNV-1a over the family name and rounded coordinates. Stable across runs
/// and platforms, which is what makes synthesized payloads reproducible.
fn seed_hash(kind: SourceKind, lat: f64, lon: f64) -> u64 {
    const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    let input = format!("{kind}:{lat:.4}:{lon:.4}");
    let mut hash = FNV_OFFSET;
    for byte in input.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::Coordinates;

    fn query_at(lat: f64, lon: f64) -> PipelineQuery {
        PipelineQuery {
            coordinates: Some(Coordinates {
                latitude: lat,
                longitude: lon,
            }),
            ..PipelineQuery::default()
        }
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let synthesizer = FallbackSynthesizer::new();
        let query = query_at(21.1458, 79.0882);
        for kind in SourceKind::all() {
            let first = synthesizer.synthesize(kind, &query);
            let second = synthesizer.synthesize(kind, &query);
            assert_eq!(
                serde_json::to_string(&first).unwrap(),
                serde_json::to_string(&second).unwrap()
            );
        }
    }

    #[test]
    fn test_synthesized_results_are_flagged() {
        let synthesizer = FallbackSynthesizer::new();
        let result = synthesizer.synthesize(SourceKind::Weather, &PipelineQuery::default());
        assert!(result.is_fallback);
        assert!(!result.success);
        assert!(result.payload.is_some());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_substitute_preserves_classification() {
        let synthesizer = FallbackSynthesizer::new();
        let failed = SourceResult::failed(
            SourceKind::Environmental,
            SourceErrorKind::Timeout,
            std::time::Duration::from_millis(1500),
        );
        let substituted = synthesizer.substitute(&PipelineQuery::default(), &failed);
        assert!(substituted.is_fallback);
        assert_eq!(substituted.error, Some(SourceErrorKind::Timeout));
        assert_eq!(substituted.fetch_duration_ms, 1500);
        assert!(substituted.payload.is_some());
    }

    #[test]
    fn test_synthesized_values_stay_inside_plausible_bands() {
        let synthesizer = FallbackSynthesizer::new();
        for (lat, lon) in [(21.1458, 79.0882), (0.0, 0.0), (-33.86, 151.2)] {
            let query = query_at(lat, lon);
            let env = synthesizer.synthesize(SourceKind::Environmental, &query);
            let data = env.payload.unwrap();
            let data = data.as_environmental().unwrap();
            assert!(data.soil_moisture < crate::constants::soil::MOISTURE_LOW_MAX);
            assert!(data.ndvi > 0.0 && data.ndvi < 1.0);

            let weather = synthesizer.synthesize(SourceKind::Weather, &query);
            let payload = weather.payload.unwrap();
            let data = payload.as_weather().unwrap();
            assert!(data.temperature_c < crate::constants::weather::TEMP_WATER_DEMAND_MIN);
            assert!(data.humidity_pct < crate::constants::weather::HUMIDITY_PEST_MIN);
        }
    }
}
