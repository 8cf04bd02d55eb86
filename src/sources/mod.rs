//! # Source Adapter Layer
//!
//! Normalizes each external data family (location/geocode, weather/forecast,
//! environmental/satellite, imagery analysis) into a stable internal shape.
//! Adapters never throw past this boundary: every upstream error is converted
//! into a classified [`SourceError`] and recovered by the resilient call
//! executor and the fallback synthesizer.
//!
//! ## Components
//!
//! - **SourceKind**: the fixed set of source families
//! - **SourceAdapter**: the uniform async fetch seam, injected into the
//!   orchestrator at construction so tests can substitute stubs
//! - **SourcePayload / SourceResult**: normalized data plus fetch bookkeeping
//! - **FallbackSynthesizer**: deterministic placeholder data for failed fetches

pub mod environmental;
pub mod fallback;
pub mod imagery;
pub mod location;
mod upstream;
pub mod weather;

pub use environmental::EnvironmentalData;
pub use fallback::FallbackSynthesizer;
pub use imagery::{ImageAssessment, ImageryData};
pub use location::LocationData;
pub use weather::{ForecastDay, WeatherData};

use crate::pipeline::types::PipelineQuery;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// The fixed set of external data families one pipeline run aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Location,
    Weather,
    Environmental,
    Imagery,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Location => "location",
            SourceKind::Weather => "weather",
            SourceKind::Environmental => "environmental",
            SourceKind::Imagery => "imagery",
        }
    }

    /// All families fetched during the collection phase, in launch order.
    pub fn all() -> [SourceKind; 4] {
        [
            SourceKind::Location,
            SourceKind::Weather,
            SourceKind::Environmental,
            SourceKind::Imagery,
        ]
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure classification for a source fetch that exhausted its recovery
/// options. `AuthError` is the only non-retryable kind: credentials do not
/// heal on retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceErrorKind {
    Timeout,
    ServerError,
    AuthError,
    NetworkError,
    Unknown,
}

impl SourceErrorKind {
    pub fn is_retryable(&self) -> bool {
        !matches!(self, SourceErrorKind::AuthError)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceErrorKind::Timeout => "timeout",
            SourceErrorKind::ServerError => "server_error",
            SourceErrorKind::AuthError => "auth_error",
            SourceErrorKind::NetworkError => "network_error",
            SourceErrorKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for SourceErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned by a source adapter for a single fetch attempt.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind} from {origin}: {message}")]
pub struct SourceError {
    pub origin: SourceKind,
    pub kind: SourceErrorKind,
    pub message: String,
}

impl SourceError {
    pub fn new(source: SourceKind, kind: SourceErrorKind, message: impl Into<String>) -> Self {
        Self {
            origin: source,
            kind,
            message: message.into(),
        }
    }

    pub fn timeout(source: SourceKind, message: impl Into<String>) -> Self {
        Self::new(source, SourceErrorKind::Timeout, message)
    }

    pub fn server(source: SourceKind, message: impl Into<String>) -> Self {
        Self::new(source, SourceErrorKind::ServerError, message)
    }

    pub fn auth(source: SourceKind, message: impl Into<String>) -> Self {
        Self::new(source, SourceErrorKind::AuthError, message)
    }

    pub fn network(source: SourceKind, message: impl Into<String>) -> Self {
        Self::new(source, SourceErrorKind::NetworkError, message)
    }
}

/// Normalized payload for one source family.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourcePayload {
    Location(LocationData),
    Weather(WeatherData),
    Environmental(EnvironmentalData),
    Imagery(ImageryData),
}

impl SourcePayload {
    pub fn as_location(&self) -> Option<&LocationData> {
        match self {
            SourcePayload::Location(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_weather(&self) -> Option<&WeatherData> {
        match self {
            SourcePayload::Weather(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_environmental(&self) -> Option<&EnvironmentalData> {
        match self {
            SourcePayload::Environmental(data) => Some(data),
            _ => None,
        }
    }

    pub fn as_imagery(&self) -> Option<&ImageryData> {
        match self {
            SourcePayload::Imagery(data) => Some(data),
            _ => None,
        }
    }
}

/// Outcome of one source fetch within a pipeline run. Created once by the
/// resilient call executor (or the fallback synthesizer) and read-only
/// afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceResult {
    pub source: SourceKind,
    pub success: bool,
    pub payload: Option<SourcePayload>,
    pub is_fallback: bool,
    pub error: Option<SourceErrorKind>,
    pub fetch_duration_ms: u64,
}

impl SourceResult {
    pub fn fetched(source: SourceKind, payload: SourcePayload, duration: Duration) -> Self {
        Self {
            source,
            success: true,
            payload: Some(payload),
            is_fallback: false,
            error: None,
            fetch_duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn failed(source: SourceKind, kind: SourceErrorKind, duration: Duration) -> Self {
        Self {
            source,
            success: false,
            payload: None,
            is_fallback: false,
            error: Some(kind),
            fetch_duration_ms: duration.as_millis() as u64,
        }
    }
}

/// Uniform fetch seam over one external data family.
///
/// Implementations normalize whatever the upstream returns into a
/// [`SourcePayload`] and convert every upstream failure into a classified
/// [`SourceError`]. They must never panic on malformed upstream data.
#[async_trait]
pub trait SourceAdapter: Send + Sync {
    /// The family this adapter serves.
    fn kind(&self) -> SourceKind;

    /// Fetch and normalize data for the query.
    async fn fetch(&self, query: &PipelineQuery) -> Result<SourcePayload, SourceError>;
}
