//! Imagery-analysis family normalization: per-image crop health, disease,
//! and soil classifications.

use crate::sources::upstream::{array_field, f64_field, str_field};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable shape every imagery-analysis upstream is normalized into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageryData {
    pub assessments: Vec<ImageAssessment>,
}

/// One analyzed image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAssessment {
    pub image_id: String,
    pub crop_health: String,
    pub disease: Option<String>,
    pub disease_confidence: f64,
    pub soil_class: String,
}

impl ImageryData {
    pub fn from_upstream(value: &Value) -> Self {
        let assessments = array_field(value, &["assessments", "results", "images"])
            .iter()
            .map(ImageAssessment::from_upstream)
            .collect();
        Self { assessments }
    }

    /// True when any analyzed image carries a disease classification.
    pub fn disease_detected(&self) -> bool {
        self.assessments.iter().any(|a| a.disease.is_some())
    }
}

impl ImageAssessment {
    fn from_upstream(value: &Value) -> Self {
        let disease = match str_field(value, &["disease", "disease_label"], "") {
            label if label.is_empty() || label == "none" => None,
            label => Some(label),
        };
        Self {
            image_id: str_field(value, &["image_id", "id"], "unknown"),
            crop_health: str_field(value, &["crop_health", "health"], "unknown"),
            disease,
            disease_confidence: f64_field(value, &["disease_confidence", "confidence"], 0.0),
            soil_class: str_field(value, &["soil_class", "soil"], "unknown"),
        }
    }
}
