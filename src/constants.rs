//! # Agronomic Constants and Rule Thresholds
//!
//! Named thresholds, weights, and score bands that define the behavior of the
//! insight derivation and recommendation engines. Keeping these as named
//! constants keeps the rule engines independently testable and tunable.

/// Scoring weights and label bands shared by all quality-scored categories.
pub mod scoring {
    /// Every category score starts here before penalties and credits apply.
    pub const BASE_SCORE: i32 = 100;

    /// Penalty applied per detected issue.
    pub const ISSUE_PENALTY: i32 = 35;

    /// Credit applied per detected strength.
    pub const STRENGTH_CREDIT: i32 = 5;

    /// Score floor and ceiling after penalties/credits.
    pub const SCORE_MIN: i32 = 0;
    pub const SCORE_MAX: i32 = 100;

    /// Quality label bands: `>= EXCELLENT_MIN` is excellent, `>= GOOD_MIN`
    /// good, `>= FAIR_MIN` fair, anything below is poor.
    pub const EXCELLENT_MIN: i32 = 80;
    pub const GOOD_MIN: i32 = 60;
    pub const FAIR_MIN: i32 = 40;

    /// Risk label bands by contributing factor count.
    pub const RISK_HIGH_MIN_FACTORS: usize = 3;
    pub const RISK_MODERATE_MIN_FACTORS: usize = 1;
}

/// Soil signal thresholds.
pub mod soil {
    /// Soil pH below this reads as acidic.
    pub const PH_ACIDIC_MAX: f64 = 5.5;

    /// Soil pH above this reads as alkaline.
    pub const PH_ALKALINE_MIN: f64 = 8.5;

    /// Volumetric soil moisture fraction below this is a deficit.
    pub const MOISTURE_LOW_MAX: f64 = 0.15;

    /// Volumetric soil moisture fraction above this risks waterlogging.
    pub const MOISTURE_HIGH_MIN: f64 = 0.45;

    /// Optimal moisture band used as a strength signal.
    pub const MOISTURE_OPTIMAL_MIN: f64 = 0.20;
    pub const MOISTURE_OPTIMAL_MAX: f64 = 0.40;

    /// Organic carbon percentage below this is depleted.
    pub const ORGANIC_CARBON_LOW_MAX: f64 = 0.5;
}

/// Vegetation index thresholds (NDVI).
pub mod vegetation {
    /// NDVI below this indicates sparse or stressed canopy.
    pub const NDVI_SPARSE_MAX: f64 = 0.30;

    /// NDVI at or above this indicates dense, healthy canopy.
    pub const NDVI_DENSE_MIN: f64 = 0.60;
}

/// Weather and climate thresholds.
pub mod weather {
    /// Air temperature above this is heat stress for most field crops.
    pub const TEMP_HEAT_STRESS_MIN: f64 = 35.0;

    /// Air temperature below this is cold stress.
    pub const TEMP_COLD_STRESS_MAX: f64 = 10.0;

    /// Growing-comfort band used as a strength signal.
    pub const TEMP_OPTIMAL_MIN: f64 = 18.0;
    pub const TEMP_OPTIMAL_MAX: f64 = 32.0;

    /// Relative humidity at or above this favors fungal pest pressure.
    pub const HUMIDITY_PEST_MIN: f64 = 80.0;

    /// Pest-activity temperature band.
    pub const PEST_TEMP_MIN: f64 = 20.0;
    pub const PEST_TEMP_MAX: f64 = 35.0;

    /// Total expected rainfall (current + forecast, mm) below this counts as
    /// an irrigation-demand factor.
    pub const EXPECTED_RAINFALL_LOW_MAX_MM: f64 = 5.0;

    /// Recent rainfall (mm) above this leaves standing moisture that favors
    /// pest and disease pressure.
    pub const RECENT_RAINFALL_PEST_MIN_MM: f64 = 20.0;

    /// Air temperature at or above this drives evapotranspiration demand.
    pub const TEMP_WATER_DEMAND_MIN: f64 = 30.0;

    /// Sustained wind above this (km/h) damages canopy and dries topsoil.
    pub const WIND_HIGH_KMH: f64 = 30.0;

    /// Land-surface minus air temperature delta above this indicates poor
    /// ground cover and heat retention.
    pub const LST_DELTA_HIGH_C: f64 = 8.0;
}

/// Deterministic baselines used by the fallback synthesizer. Values sit at
/// plausible mid-season readings for a semi-arid cropping region; soil
/// moisture is deliberately on the dry side so a fully degraded run still
/// surfaces actionable output.
pub mod fallback {
    /// Default coordinate seed (Nagpur reference point) used when a query
    /// carries no resolvable location.
    pub const DEFAULT_LATITUDE: f64 = 21.1458;
    pub const DEFAULT_LONGITUDE: f64 = 79.0882;

    pub const WEATHER_TEMPERATURE_C: f64 = 29.0;
    pub const WEATHER_HUMIDITY_PCT: f64 = 62.0;
    pub const WEATHER_WIND_KMH: f64 = 9.0;
    pub const WEATHER_RAINFALL_MM: f64 = 1.2;
    pub const WEATHER_CONDITION: &str = "partly_cloudy";
    pub const FORECAST_DAYS: usize = 3;

    pub const ENV_NDVI: f64 = 0.48;
    pub const ENV_LAND_SURFACE_TEMP_C: f64 = 31.0;
    pub const ENV_SOIL_MOISTURE: f64 = 0.14;
    pub const ENV_SOIL_PH: f64 = 6.8;
    pub const ENV_SOIL_TEXTURE: &str = "loam";
    pub const ENV_ORGANIC_CARBON_PCT: f64 = 0.9;

    pub const IMAGERY_CROP_HEALTH: &str = "moderate";
    pub const IMAGERY_SOIL_CLASS: &str = "loam";
}

/// Normalization defaults substituted for absent upstream fields so the
/// derivation engines always see a well-formed shape.
pub mod defaults {
    pub const WEATHER_TEMPERATURE_C: f64 = 27.0;
    pub const WEATHER_HUMIDITY_PCT: f64 = 65.0;
    pub const WEATHER_WIND_KMH: f64 = 8.0;
    pub const WEATHER_RAINFALL_MM: f64 = 0.0;
    pub const WEATHER_CONDITION: &str = "clear";

    pub const ENV_NDVI: f64 = 0.52;
    pub const ENV_LAND_SURFACE_TEMP_C: f64 = 28.0;
    pub const ENV_SOIL_MOISTURE: f64 = 0.24;
    pub const ENV_SOIL_PH: f64 = 6.8;
    pub const ENV_SOIL_TEXTURE: &str = "loam";
    pub const ENV_ORGANIC_CARBON_PCT: f64 = 0.9;
}
