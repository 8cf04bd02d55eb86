#![allow(clippy::doc_markdown)] // Allow technical terms like NDVI, TTL in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # AgriSense Core
//!
//! Resilient multi-source data-aggregation and insight pipeline for
//! agricultural context.
//!
//! ## Overview
//!
//! AgriSense Core fans out to several independent, unreliable external data
//! providers (weather, environmental/satellite, imagery analysis,
//! geocoding), tolerates partial failure with deterministic fallback
//! substitution, derives categorical agronomic insights from the aggregated
//! signals, expands them into prioritized recommendations, memoizes full
//! pipeline runs behind a time-boxed cache, and dispatches outbound
//! notifications with independent per-channel bookkeeping.
//!
//! ## Architecture
//!
//! A run is a short state machine: `collecting` launches all source adapter
//! calls concurrently behind the resilient call executor; a slow or failed
//! source degrades that source's data via the fallback synthesizer instead
//! of aborting the run. `deriving` and `recommending` are pure and
//! synchronous. Persistence and notification finalize the run best-effort:
//! their failures are logged and recorded, never promoted to a run failure.
//! The only input that fails a run is a query with no resolvable location.
//!
//! ## Module Organization
//!
//! - [`pipeline`] - Run orchestration, states, and result types
//! - [`sources`] - Source adapters, normalization, and fallback synthesis
//! - [`resilience`] - Timeout racing and bounded backoff retry
//! - [`insight`] - Pure, rule-based insight derivation
//! - [`recommend`] - Recommendation expansion and ordering
//! - [`cache`] - TTL result cache with atomic replacement
//! - [`notify`] - Notification channels and dispatch bookkeeping
//! - [`store`] - Minimal run/alert persistence seam
//! - [`config`] - Environment-driven configuration
//! - [`constants`] - Named rule thresholds and score bands
//! - [`logging`] - Structured logging helpers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use agrisense_core::config::PipelineConfig;
//! use agrisense_core::notify::{ConsoleChannel, NotificationDispatcher};
//! use agrisense_core::pipeline::{Coordinates, PipelineOrchestrator, PipelineQuery, SourceAdapters};
//! use agrisense_core::store::InMemoryRunStore;
//! # use agrisense_core::test_helpers::StaticAdapter;
//! # use agrisense_core::sources::{SourceKind, SourcePayload, WeatherData, EnvironmentalData, ImageryData};
//!
//! # async fn example() {
//! let adapters = SourceAdapters {
//!     location: Arc::new(StaticAdapter::location(21.1458, 79.0882)),
//!     weather: Arc::new(StaticAdapter::new(SourceKind::Weather,
//!         SourcePayload::Weather(WeatherData::default()))),
//!     environmental: Arc::new(StaticAdapter::new(SourceKind::Environmental,
//!         SourcePayload::Environmental(EnvironmentalData::default()))),
//!     imagery: Arc::new(StaticAdapter::new(SourceKind::Imagery,
//!         SourcePayload::Imagery(ImageryData::default()))),
//! };
//! let orchestrator = PipelineOrchestrator::new(
//!     adapters,
//!     Arc::new(InMemoryRunStore::new()),
//!     NotificationDispatcher::new(vec![Arc::new(ConsoleChannel::new())]),
//!     PipelineConfig::default(),
//! );
//!
//! let result = orchestrator.run(PipelineQuery {
//!     coordinates: Some(Coordinates { latitude: 21.1458, longitude: 79.0882 }),
//!     ..PipelineQuery::default()
//! }).await;
//!
//! println!("{} insights, {} recommendations", result.insights.len(), result.recommendations.len());
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod insight;
pub mod logging;
pub mod notify;
pub mod pipeline;
pub mod recommend;
pub mod resilience;
pub mod sources;
pub mod store;
pub mod test_helpers;

pub use cache::{CacheStats, ResultCache};
pub use config::PipelineConfig;
pub use error::{AgriSenseError, Result};
pub use insight::{derive_insights, DataTrust, Insight, InsightCategory, OverallRating};
pub use notify::{NotificationAttempt, NotificationDispatcher};
pub use pipeline::{
    Coordinates, DataCollection, PipelineOrchestrator, PipelineQuery, PipelineResult, RunState,
    RunStatus, SourceAdapters,
};
pub use recommend::{recommend, Impact, Priority, Recommendation};
pub use resilience::{ExecutorConfig, ResilientCallExecutor};
pub use sources::{
    FallbackSynthesizer, SourceAdapter, SourceErrorKind, SourceKind, SourcePayload, SourceResult,
};
pub use store::{InMemoryRunStore, RunStore};
