//! End-to-end pipeline behavior: collection latency bounds, fallback
//! substitution and taint propagation, cache memoization, best-effort
//! persistence/notification, and the reference agronomy scenarios.

use agrisense_core::config::PipelineConfig;
use agrisense_core::insight::{DataTrust, InsightCategory, OverallRating, QualityRating, RiskLevel};
use agrisense_core::notify::NotificationDispatcher;
use agrisense_core::pipeline::{
    Coordinates, PipelineOrchestrator, PipelineQuery, SourceAdapters,
};
use agrisense_core::recommend::Priority;
use agrisense_core::sources::{
    EnvironmentalData, ImageryData, SourceAdapter, SourceError, SourceErrorKind, SourceKind,
    SourcePayload, WeatherData,
};
use agrisense_core::store::InMemoryRunStore;
use agrisense_core::test_helpers::{
    FailingAdapter, FailingStore, HangingAdapter, StaticAdapter, StubChannel,
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn fast_config() -> PipelineConfig {
    PipelineConfig {
        source_timeout_ms: 200,
        max_retries: 0,
        backoff_base_ms: 1,
        backoff_max_ms: 5,
        retry_jitter: false,
        cache_ttl_ms: 60_000,
        ..PipelineConfig::default()
    }
}

fn nagpur_query() -> PipelineQuery {
    PipelineQuery {
        coordinates: Some(Coordinates {
            latitude: 21.1458,
            longitude: 79.0882,
        }),
        ..PipelineQuery::default()
    }
}

fn static_adapters(weather: WeatherData, environmental: EnvironmentalData) -> SourceAdapters {
    SourceAdapters {
        location: Arc::new(StaticAdapter::location(21.1458, 79.0882)),
        weather: Arc::new(StaticAdapter::new(
            SourceKind::Weather,
            SourcePayload::Weather(weather),
        )),
        environmental: Arc::new(StaticAdapter::new(
            SourceKind::Environmental,
            SourcePayload::Environmental(environmental),
        )),
        imagery: Arc::new(StaticAdapter::new(
            SourceKind::Imagery,
            SourcePayload::Imagery(ImageryData::default()),
        )),
    }
}

fn build(
    adapters: SourceAdapters,
    config: PipelineConfig,
    channels: Vec<Arc<dyn agrisense_core::notify::NotificationChannel>>,
) -> (PipelineOrchestrator, Arc<InMemoryRunStore>) {
    let store = Arc::new(InMemoryRunStore::new());
    let orchestrator = PipelineOrchestrator::new(
        adapters,
        store.clone(),
        NotificationDispatcher::new(channels),
        config,
    );
    (orchestrator, store)
}

/// Counts fetch invocations, for the cache-law assertions.
struct CountingAdapter {
    inner: StaticAdapter,
    calls: Arc<AtomicU32>,
}

#[async_trait]
impl SourceAdapter for CountingAdapter {
    fn kind(&self) -> SourceKind {
        self.inner.kind()
    }

    async fn fetch(&self, query: &PipelineQuery) -> Result<SourcePayload, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.fetch(query).await
    }
}

#[tokio::test]
async fn collection_is_bounded_by_adapter_timeouts() {
    let mut adapters = static_adapters(WeatherData::default(), EnvironmentalData::default());
    adapters.weather = Arc::new(HangingAdapter::new(SourceKind::Weather));
    adapters.environmental = Arc::new(HangingAdapter::new(SourceKind::Environmental));
    let (orchestrator, _) = build(adapters, fast_config(), Vec::new());

    let started = Instant::now();
    let result = orchestrator.run(nagpur_query()).await;

    // Two hanging sources at a 200ms timeout must settle concurrently, not
    // sequentially; give generous slack for the scheduler.
    assert!(started.elapsed() < Duration::from_millis(1_500));
    assert!(result.success);
    assert!(result.data_collection.weather.is_fallback);
    assert!(result.data_collection.environmental.is_fallback);
    assert_eq!(
        result.data_collection.weather.error,
        Some(SourceErrorKind::Timeout)
    );
}

#[tokio::test]
async fn all_sources_failing_still_yields_a_useful_run() {
    let adapters = SourceAdapters {
        location: Arc::new(StaticAdapter::location(21.1458, 79.0882)),
        weather: Arc::new(FailingAdapter::new(
            SourceKind::Weather,
            SourceErrorKind::Timeout,
        )),
        environmental: Arc::new(FailingAdapter::new(
            SourceKind::Environmental,
            SourceErrorKind::Timeout,
        )),
        imagery: Arc::new(FailingAdapter::new(
            SourceKind::Imagery,
            SourceErrorKind::NetworkError,
        )),
    };
    let (orchestrator, _) = build(adapters, fast_config(), Vec::new());
    let result = orchestrator.run(nagpur_query()).await;

    assert!(result.success, "degraded runs still succeed");
    assert!(result.data_collection.weather.is_fallback);
    assert!(result.data_collection.environmental.is_fallback);
    assert!(result.data_collection.imagery.is_fallback);
    assert_eq!(result.insights.len(), 6);
    assert!(
        !result.recommendations.is_empty(),
        "synthesized defaults still surface at least one recommendation"
    );
}

#[tokio::test]
async fn fallback_taint_is_visible_in_the_final_payload() {
    let mut adapters = static_adapters(WeatherData::default(), EnvironmentalData::default());
    adapters.environmental = Arc::new(FailingAdapter::new(
        SourceKind::Environmental,
        SourceErrorKind::ServerError,
    ));
    let (orchestrator, _) = build(adapters, fast_config(), Vec::new());
    let result = orchestrator.run(nagpur_query()).await;

    let soil = result
        .insights
        .iter()
        .find(|i| i.category == InsightCategory::SoilHealth)
        .unwrap();
    assert_eq!(soil.data_trust, DataTrust::Fallback);

    // The taint also survives serialization to the outbound shape.
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["data_collection"]["environmental"]["is_fallback"], true);
    assert_eq!(json["insights"][0]["data_trust"], "fallback");
}

#[tokio::test]
async fn nagpur_reference_scenario() {
    let weather = WeatherData {
        temperature_c: 32.0,
        humidity_pct: 85.0,
        ..WeatherData::default()
    };
    let environmental = EnvironmentalData {
        soil_ph: 5.2,
        soil_moisture: 0.12,
        ..EnvironmentalData::default()
    };
    let (orchestrator, _) = build(
        static_adapters(weather, environmental),
        fast_config(),
        Vec::new(),
    );
    let result = orchestrator.run(nagpur_query()).await;

    let soil = result
        .insights
        .iter()
        .find(|i| i.category == InsightCategory::SoilHealth)
        .unwrap();
    assert_eq!(soil.overall, OverallRating::Quality(QualityRating::Poor));
    assert_eq!(soil.issues.len(), 2);

    let pest = result
        .insights
        .iter()
        .find(|i| i.category == InsightCategory::PestRisk)
        .unwrap();
    assert_eq!(pest.overall, OverallRating::Risk(RiskLevel::Moderate));

    let leader = &result.recommendations[0];
    assert_eq!(leader.priority, Priority::High);
    assert_eq!(leader.category, InsightCategory::WaterManagement);
}

#[tokio::test]
async fn identical_queries_within_ttl_run_the_pipeline_once() {
    let calls = Arc::new(AtomicU32::new(0));
    let mut adapters = static_adapters(WeatherData::default(), EnvironmentalData::default());
    adapters.weather = Arc::new(CountingAdapter {
        inner: StaticAdapter::new(
            SourceKind::Weather,
            SourcePayload::Weather(WeatherData::default()),
        ),
        calls: calls.clone(),
    });
    let (orchestrator, _) = build(adapters, fast_config(), Vec::new());

    let first = orchestrator.run(nagpur_query()).await;
    let second = orchestrator.run(nagpur_query()).await;

    assert_eq!(calls.load(Ordering::SeqCst), 1, "second run was memoized");
    assert_eq!(first.pipeline_id, second.pipeline_id);

    // A different query misses the cache.
    let other = PipelineQuery {
        coordinates: Some(Coordinates {
            latitude: 18.5204,
            longitude: 73.8567,
        }),
        ..PipelineQuery::default()
    };
    orchestrator.run(other).await;
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn expired_cache_entries_recompute() {
    let calls = Arc::new(AtomicU32::new(0));
    let mut adapters = static_adapters(WeatherData::default(), EnvironmentalData::default());
    adapters.weather = Arc::new(CountingAdapter {
        inner: StaticAdapter::new(
            SourceKind::Weather,
            SourcePayload::Weather(WeatherData::default()),
        ),
        calls: calls.clone(),
    });
    let config = PipelineConfig {
        cache_ttl_ms: 30,
        ..fast_config()
    };
    let (orchestrator, _) = build(adapters, config, Vec::new());

    orchestrator.run(nagpur_query()).await;
    tokio::time::sleep(Duration::from_millis(60)).await;
    orchestrator.run(nagpur_query()).await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn notification_channels_fail_independently() {
    let (orchestrator, store) = build(
        static_adapters(WeatherData::default(), EnvironmentalData::default()),
        fast_config(),
        vec![
            Arc::new(StubChannel::failing("sms")),
            Arc::new(StubChannel::succeeding("voice")),
        ],
    );
    let query = PipelineQuery {
        phone_number: Some("+911234567890".to_string()),
        ..nagpur_query()
    };
    let result = orchestrator.run(query).await;

    assert!(result.success);
    assert_eq!(result.alerts.len(), 2);
    let sms = result.alerts.iter().find(|a| a.channel == "sms").unwrap();
    assert!(!sms.success);
    let voice = result.alerts.iter().find(|a| a.channel == "voice").unwrap();
    assert!(voice.success);
    assert_eq!(voice.provider_message_id.as_deref(), Some("voice-msg-1"));

    let alerts = store.alerts().await;
    assert_eq!(alerts.len(), 2);
}

#[tokio::test]
async fn all_channels_failing_does_not_fail_the_run() {
    let (orchestrator, _) = build(
        static_adapters(WeatherData::default(), EnvironmentalData::default()),
        fast_config(),
        vec![
            Arc::new(StubChannel::failing("sms")),
            Arc::new(StubChannel::failing("voice")),
        ],
    );
    let query = PipelineQuery {
        phone_number: Some("+911234567890".to_string()),
        ..nagpur_query()
    };
    let result = orchestrator.run(query).await;

    assert!(result.success);
    assert!(result.alerts.iter().all(|a| !a.success));
}

#[tokio::test]
async fn store_outage_is_absorbed() {
    let orchestrator = PipelineOrchestrator::new(
        static_adapters(WeatherData::default(), EnvironmentalData::default()),
        Arc::new(FailingStore),
        NotificationDispatcher::new(vec![Arc::new(StubChannel::succeeding("sms"))]),
        fast_config(),
    );
    let query = PipelineQuery {
        phone_number: Some("+911234567890".to_string()),
        ..nagpur_query()
    };
    let result = orchestrator.run(query).await;

    assert!(result.success);
    assert_eq!(result.alerts.len(), 1);
}

#[tokio::test]
async fn region_only_query_geocodes_then_collects() {
    let mut adapters = static_adapters(WeatherData::default(), EnvironmentalData::default());
    adapters.location = Arc::new(StaticAdapter::location(18.5204, 73.8567));
    let (orchestrator, _) = build(adapters, fast_config(), Vec::new());

    let result = orchestrator
        .run(PipelineQuery {
            region: Some("Pune".to_string()),
            ..PipelineQuery::default()
        })
        .await;

    assert!(result.success);
    let location = result.data_collection.location_data();
    assert_eq!(location.latitude, 18.5204);
}

#[tokio::test]
async fn geocode_failure_falls_back_to_seed_coordinates() {
    let mut adapters = static_adapters(WeatherData::default(), EnvironmentalData::default());
    adapters.location = Arc::new(FailingAdapter::new(
        SourceKind::Location,
        SourceErrorKind::NetworkError,
    ));
    let (orchestrator, _) = build(adapters, fast_config(), Vec::new());

    let result = orchestrator
        .run(PipelineQuery {
            region: Some("somewhere unmappable".to_string()),
            ..PipelineQuery::default()
        })
        .await;

    assert!(result.success, "geocode failure degrades, not fails");
    assert!(result.data_collection.location.is_fallback);
    let location = result.data_collection.location_data();
    assert_eq!(location.resolved_from, "default");
}
