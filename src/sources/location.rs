//! Location family normalization: free-text or IP geocoding into coordinates.

use crate::constants::fallback;
use crate::sources::upstream::{f64_field, str_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable shape every geocoding upstream is normalized into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationData {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
    /// How the coordinates were obtained: `coordinates` (caller-supplied),
    /// `geocoded`, or `default` (fallback seed).
    pub resolved_from: String,
}

impl LocationData {
    /// Caller-supplied coordinates passed through untouched.
    pub fn from_coordinates(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            display_name: format!("{latitude:.4}, {longitude:.4}"),
            resolved_from: "coordinates".to_string(),
        }
    }

    pub fn from_upstream(value: &Value) -> Self {
        Self {
            latitude: f64_field(
                value,
                &["latitude", "lat", "location.lat"],
                fallback::DEFAULT_LATITUDE,
            ),
            longitude: f64_field(
                value,
                &["longitude", "lon", "lng", "location.lon"],
                fallback::DEFAULT_LONGITUDE,
            ),
            display_name: str_field(value, &["display_name", "name", "formatted"], "unknown"),
            resolved_from: "geocoded".to_string(),
        }
    }
}

impl Default for LocationData {
    fn default() -> Self {
        Self {
            latitude: fallback::DEFAULT_LATITUDE,
            longitude: fallback::DEFAULT_LONGITUDE,
            display_name: "default region".to_string(),
            resolved_from: "default".to_string(),
        }
    }
}
