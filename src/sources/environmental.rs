//! Environmental/satellite family normalization: vegetation index, land
//! surface temperature, and soil properties.

use crate::constants::defaults;
use crate::sources::upstream::{f64_field, str_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable shape every environmental/satellite upstream is normalized into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalData {
    pub ndvi: f64,
    pub land_surface_temp_c: f64,
    pub soil_moisture: f64,
    pub soil_ph: f64,
    pub soil_texture: String,
    pub organic_carbon_pct: f64,
}

impl Default for EnvironmentalData {
    fn default() -> Self {
        Self {
            ndvi: defaults::ENV_NDVI,
            land_surface_temp_c: defaults::ENV_LAND_SURFACE_TEMP_C,
            soil_moisture: defaults::ENV_SOIL_MOISTURE,
            soil_ph: defaults::ENV_SOIL_PH,
            soil_texture: defaults::ENV_SOIL_TEXTURE.to_string(),
            organic_carbon_pct: defaults::ENV_ORGANIC_CARBON_PCT,
        }
    }
}

impl EnvironmentalData {
    pub fn from_upstream(value: &Value) -> Self {
        Self {
            ndvi: f64_field(
                value,
                &["ndvi", "ndvi_value", "vegetation.ndvi"],
                defaults::ENV_NDVI,
            ),
            land_surface_temp_c: f64_field(
                value,
                &["land_surface_temp_c", "lst", "land_surface_temperature"],
                defaults::ENV_LAND_SURFACE_TEMP_C,
            ),
            soil_moisture: f64_field(
                value,
                &["soil_moisture", "moisture", "soil.moisture"],
                defaults::ENV_SOIL_MOISTURE,
            ),
            soil_ph: f64_field(value, &["soil_ph", "ph", "soil.ph"], defaults::ENV_SOIL_PH),
            soil_texture: str_field(
                value,
                &["soil_texture", "texture", "soil.texture"],
                defaults::ENV_SOIL_TEXTURE,
            ),
            organic_carbon_pct: f64_field(
                value,
                &["organic_carbon_pct", "organic_carbon", "soil.organic_carbon"],
                defaults::ENV_ORGANIC_CARBON_PCT,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalizes_flat_and_nested_shapes() {
        let flat = EnvironmentalData::from_upstream(&json!({"ph": 5.2, "moisture": 0.12}));
        assert_eq!(flat.soil_ph, 5.2);
        assert_eq!(flat.soil_moisture, 0.12);

        let nested = EnvironmentalData::from_upstream(
            &json!({"soil": {"ph": 8.9, "texture": "clay"}, "vegetation": {"ndvi": 0.71}}),
        );
        assert_eq!(nested.soil_ph, 8.9);
        assert_eq!(nested.soil_texture, "clay");
        assert_eq!(nested.ndvi, 0.71);
    }

    #[test]
    fn test_empty_upstream_yields_defaults() {
        let data = EnvironmentalData::from_upstream(&json!({}));
        assert_eq!(data, EnvironmentalData::default());
    }
}
