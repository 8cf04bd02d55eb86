use crate::error::{AgriSenseError, Result};
use crate::insight::Insight;
use crate::notify::NotificationAttempt;
use crate::recommend::Recommendation;
use crate::sources::{
    EnvironmentalData, ImageryData, LocationData, SourceKind, SourceResult, WeatherData,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Geographic point, WGS84 decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Reference to one uploaded field image. The core never decodes image
/// bytes; the imagery adapter hands identifiers to the analysis provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub image_id: String,
    pub byte_len: usize,
}

/// Inbound pipeline trigger. At least one of `region` or `coordinates` must
/// be present; absence of both is the only input that fails a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineQuery {
    pub region: Option<String>,
    pub coordinates: Option<Coordinates>,
    pub farmer_id: Option<String>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    pub phone_number: Option<String>,
    pub language: Option<String>,
}

impl PipelineQuery {
    /// Reject queries with no resolvable location at all. This is the only
    /// validation that can fail a run, and it runs before any collection.
    pub fn validate(&self) -> Result<()> {
        let has_region = self
            .region
            .as_deref()
            .map(|r| !r.trim().is_empty())
            .unwrap_or(false);
        if self.coordinates.is_none() && !has_region {
            return Err(AgriSenseError::ValidationError(
                "query needs coordinates or a resolvable location name".to_string(),
            ));
        }
        Ok(())
    }

    /// Deterministic cache key over every field that shapes the result.
    pub fn fingerprint(&self) -> String {
        let (lat, lon) = self
            .coordinates
            .as_ref()
            .map(|c| (c.latitude, c.longitude))
            .unwrap_or((f64::NAN, f64::NAN));
        format!(
            "lat={lat:.4}|lon={lon:.4}|region={}|farmer={}|images={}|phone={}|lang={}",
            self.region.as_deref().unwrap_or("-").trim().to_lowercase(),
            self.farmer_id.as_deref().unwrap_or("-"),
            self.images.len(),
            self.phone_number.as_deref().unwrap_or("-"),
            self.language.as_deref().unwrap_or("-"),
        )
    }
}

/// Terminal status of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Succeeded,
    Failed,
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Succeeded => write!(f, "succeeded"),
            RunStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One end-to-end execution record. Created at run start, finalized exactly
/// once at run end, immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineRun {
    pub run_id: Uuid,
    pub query: PipelineQuery,
    pub started_at: DateTime<Utc>,
    pub status: RunStatus,
    pub completed_at: DateTime<Utc>,
}

/// The aggregated source results for one run, one per family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataCollection {
    pub location: SourceResult,
    pub weather: SourceResult,
    pub environmental: SourceResult,
    #[serde(rename = "image_analysis")]
    pub imagery: SourceResult,
}

impl DataCollection {
    /// Typed weather payload, defaulted if the variant is missing so the
    /// derivation engines never see a hole.
    pub fn weather_data(&self) -> WeatherData {
        self.weather
            .payload
            .as_ref()
            .and_then(|p| p.as_weather())
            .cloned()
            .unwrap_or_default()
    }

    pub fn environmental_data(&self) -> EnvironmentalData {
        self.environmental
            .payload
            .as_ref()
            .and_then(|p| p.as_environmental())
            .cloned()
            .unwrap_or_default()
    }

    pub fn imagery_data(&self) -> ImageryData {
        self.imagery
            .payload
            .as_ref()
            .and_then(|p| p.as_imagery())
            .cloned()
            .unwrap_or_default()
    }

    pub fn location_data(&self) -> LocationData {
        self.location
            .payload
            .as_ref()
            .and_then(|p| p.as_location())
            .cloned()
            .unwrap_or_default()
    }

    /// Families that were substituted with synthesized data this run.
    pub fn fallback_sources(&self) -> Vec<SourceKind> {
        [
            &self.location,
            &self.weather,
            &self.environmental,
            &self.imagery,
        ]
        .into_iter()
        .filter(|r| r.is_fallback)
        .map(|r| r.source)
        .collect()
    }

    pub fn any_fallback(&self) -> bool {
        !self.fallback_sources().is_empty()
    }
}

/// Outbound result of one pipeline run. Cached whole; cloned per reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResult {
    pub success: bool,
    pub pipeline_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub status: RunStatus,
    pub data_collection: DataCollection,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<Recommendation>,
    pub alerts: Vec<NotificationAttempt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// On validation failure only: the same shape built entirely from the
    /// fallback synthesizer, so callers always have something to render.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_data: Option<Box<PipelineResult>>,
}
