//! Weather family normalization: current conditions plus multi-day forecast.

use crate::constants::defaults;
use crate::sources::upstream::{array_field, f64_field, str_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable shape every weather upstream is normalized into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub rainfall_mm: f64,
    pub condition: String,
    pub forecast: Vec<ForecastDay>,
}

/// One forecast day in the normalized shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: String,
    pub temp_max_c: f64,
    pub temp_min_c: f64,
    pub rain_mm: f64,
    pub condition: String,
}

impl Default for WeatherData {
    fn default() -> Self {
        Self {
            temperature_c: defaults::WEATHER_TEMPERATURE_C,
            humidity_pct: defaults::WEATHER_HUMIDITY_PCT,
            wind_speed_kmh: defaults::WEATHER_WIND_KMH,
            rainfall_mm: defaults::WEATHER_RAINFALL_MM,
            condition: defaults::WEATHER_CONDITION.to_string(),
            forecast: Vec::new(),
        }
    }
}

impl WeatherData {
    /// Normalize a loosely-shaped upstream response. Absent or renamed
    /// fields substitute the named defaults so the derivation engines always
    /// see a complete shape.
    pub fn from_upstream(value: &Value) -> Self {
        let forecast = array_field(value, &["forecast", "daily", "forecast.forecastday"])
            .iter()
            .map(ForecastDay::from_upstream)
            .collect();

        Self {
            temperature_c: f64_field(
                value,
                &["temperature_c", "temperature", "temp", "main.temp", "current.temp_c"],
                defaults::WEATHER_TEMPERATURE_C,
            ),
            humidity_pct: f64_field(
                value,
                &["humidity_pct", "humidity", "main.humidity", "current.humidity"],
                defaults::WEATHER_HUMIDITY_PCT,
            ),
            wind_speed_kmh: f64_field(
                value,
                &["wind_speed_kmh", "wind_speed", "wind.speed", "current.wind_kph"],
                defaults::WEATHER_WIND_KMH,
            ),
            rainfall_mm: f64_field(
                value,
                &["rainfall_mm", "rainfall", "rain.1h", "current.precip_mm"],
                defaults::WEATHER_RAINFALL_MM,
            ),
            condition: str_field(
                value,
                &["condition", "weather_condition", "current.condition.text"],
                defaults::WEATHER_CONDITION,
            ),
            forecast,
        }
    }

    /// Total rainfall expected across the current reading and the forecast
    /// window, in millimetres.
    pub fn expected_rainfall_mm(&self) -> f64 {
        self.rainfall_mm + self.forecast.iter().map(|day| day.rain_mm).sum::<f64>()
    }
}

impl ForecastDay {
    fn from_upstream(value: &Value) -> Self {
        Self {
            date: str_field(value, &["date", "dt_txt", "valid_date"], ""),
            temp_max_c: f64_field(
                value,
                &["temp_max_c", "temp_max", "day.maxtemp_c", "max_temp"],
                defaults::WEATHER_TEMPERATURE_C,
            ),
            temp_min_c: f64_field(
                value,
                &["temp_min_c", "temp_min", "day.mintemp_c", "min_temp"],
                defaults::WEATHER_TEMPERATURE_C,
            ),
            rain_mm: f64_field(
                value,
                &["rain_mm", "rain", "day.totalprecip_mm", "precip"],
                defaults::WEATHER_RAINFALL_MM,
            ),
            condition: str_field(
                value,
                &["condition", "day.condition.text", "weather"],
                defaults::WEATHER_CONDITION,
            ),
        }
    }
}
