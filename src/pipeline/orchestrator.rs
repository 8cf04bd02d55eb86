//! # Pipeline Orchestrator
//!
//! The coordinator that sequences collection, derivation, recommendation,
//! and finalization into one run. Adapters, store, and notification channels
//! are injected at construction so tests can substitute stubs for every
//! external collaborator.

use crate::cache::ResultCache;
use crate::config::PipelineConfig;
use crate::error::AgriSenseError;
use crate::insight::derive_insights;
use crate::logging::{log_error, log_pipeline_operation, log_store_operation};
use crate::notify::{NotificationAttempt, NotificationDispatcher};
use crate::pipeline::states::RunState;
use crate::pipeline::types::{
    Coordinates, DataCollection, PipelineQuery, PipelineResult, PipelineRun, RunStatus,
};
use crate::recommend::{recommend, Recommendation};
use crate::resilience::{ExecutorConfig, ResilientCallExecutor};
use crate::sources::{FallbackSynthesizer, SourceAdapter, SourceKind, SourceResult};
use crate::store::{AlertRecord, RunRecord, RunStore};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

/// The injected adapter set, one per source family.
#[derive(Clone)]
pub struct SourceAdapters {
    pub location: Arc<dyn SourceAdapter>,
    pub weather: Arc<dyn SourceAdapter>,
    pub environmental: Arc<dyn SourceAdapter>,
    pub imagery: Arc<dyn SourceAdapter>,
}

impl SourceAdapters {
    fn for_kind(&self, kind: SourceKind) -> &Arc<dyn SourceAdapter> {
        match kind {
            SourceKind::Location => &self.location,
            SourceKind::Weather => &self.weather,
            SourceKind::Environmental => &self.environmental,
            SourceKind::Imagery => &self.imagery,
        }
    }
}

/// Coordinates pipeline runs and owns the only cross-run shared state (the
/// result cache).
pub struct PipelineOrchestrator {
    config: PipelineConfig,
    adapters: SourceAdapters,
    executor: ResilientCallExecutor,
    synthesizer: FallbackSynthesizer,
    cache: Arc<ResultCache<PipelineResult>>,
    store: Arc<dyn RunStore>,
    dispatcher: NotificationDispatcher,
}

impl PipelineOrchestrator {
    pub fn new(
        adapters: SourceAdapters,
        store: Arc<dyn RunStore>,
        dispatcher: NotificationDispatcher,
        config: PipelineConfig,
    ) -> Self {
        let executor = ResilientCallExecutor::new(ExecutorConfig::from(&config));
        Self {
            config,
            adapters,
            executor,
            synthesizer: FallbackSynthesizer::new(),
            cache: Arc::new(ResultCache::new()),
            store,
            dispatcher,
        }
    }

    pub fn cache(&self) -> &ResultCache<PipelineResult> {
        &self.cache
    }

    /// Execute one run. Never returns an error: a validation failure yields
    /// a `Failed` result carrying a fallback mirror, everything else a
    /// `Succeeded` result with per-source fallback flags.
    pub async fn run(&self, query: PipelineQuery) -> PipelineResult {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        log_pipeline_operation(
            "run",
            &run_id.to_string(),
            &RunState::Started.to_string(),
            "started",
            None,
        );

        if let Err(error) = query.validate() {
            return self.validation_failure(run_id, started_at, &query, error).await;
        }

        let fingerprint = query.fingerprint();
        self.cache
            .get_or_compute(&fingerprint, self.config.cache_ttl(), || {
                self.execute(run_id, started_at, query.clone())
            })
            .await
    }

    async fn execute(
        &self,
        run_id: Uuid,
        started_at: DateTime<Utc>,
        query: PipelineQuery,
    ) -> PipelineResult {
        self.transition(run_id, RunState::Collecting);

        // Location resolves first so the remaining adapters and any fallback
        // synthesis work from the same coordinates.
        let location = self.resolve_location(&query).await;
        let mut resolved_query = query.clone();
        if let Some(data) = location.payload.as_ref().and_then(|p| p.as_location()) {
            resolved_query.coordinates = Some(Coordinates {
                latitude: data.latitude,
                longitude: data.longitude,
            });
        }

        // All remaining families settle concurrently; a slow or failed
        // source degrades itself via fallback, never the run.
        let (weather, environmental, imagery) = tokio::join!(
            self.fetch_or_fallback(SourceKind::Weather, &resolved_query),
            self.fetch_or_fallback(SourceKind::Environmental, &resolved_query),
            self.fetch_or_fallback(SourceKind::Imagery, &resolved_query),
        );

        let data = DataCollection {
            location,
            weather,
            environmental,
            imagery,
        };

        self.transition(run_id, RunState::Deriving);
        let insights = derive_insights(&data);

        self.transition(run_id, RunState::Recommending);
        let recommendations = recommend(&insights);

        self.transition(run_id, RunState::Finalizing);
        let summary = self.build_summary(&data, &recommendations);
        let completed_at = Utc::now();

        // The run record is finalized exactly once, here, and is immutable
        // afterward.
        let run = PipelineRun {
            run_id,
            query: query.clone(),
            started_at,
            status: RunStatus::Succeeded,
            completed_at,
        };

        // Persistence and notification are best-effort and run in parallel;
        // their failures are recorded, never promoted to a run failure.
        let (alerts, _) = tokio::join!(
            self.notify(&query, &summary),
            self.persist_run(&run, &data),
        );
        self.persist_alerts(run_id, &alerts).await;

        let result = PipelineResult {
            success: true,
            pipeline_id: run_id,
            timestamp: completed_at,
            status: RunStatus::Succeeded,
            data_collection: data,
            insights,
            recommendations,
            alerts,
            error: None,
            fallback_data: None,
        };

        self.transition(run_id, RunState::Completed);
        result
    }

    async fn resolve_location(&self, query: &PipelineQuery) -> SourceResult {
        if let Some(coordinates) = &query.coordinates {
            return SourceResult::fetched(
                SourceKind::Location,
                crate::sources::SourcePayload::Location(
                    crate::sources::LocationData::from_coordinates(
                        coordinates.latitude,
                        coordinates.longitude,
                    ),
                ),
                std::time::Duration::ZERO,
            );
        }
        self.fetch_or_fallback(SourceKind::Location, query).await
    }

    async fn fetch_or_fallback(&self, kind: SourceKind, query: &PipelineQuery) -> SourceResult {
        let adapter = self.adapters.for_kind(kind).clone();
        let result = self
            .executor
            .execute(kind, || {
                // Each attempt owns its own handle and query so a timed-out
                // attempt's future can be dropped without dangling borrows.
                let adapter = adapter.clone();
                let query = query.clone();
                async move { adapter.fetch(&query).await }
            })
            .await;
        if result.success {
            result
        } else {
            self.synthesizer.substitute(query, &result)
        }
    }

    async fn notify(&self, query: &PipelineQuery, summary: &str) -> Vec<NotificationAttempt> {
        let Some(target) = query.phone_number.as_deref() else {
            return Vec::new();
        };
        let language = query
            .language
            .as_deref()
            .unwrap_or(&self.config.default_language);
        self.dispatcher.dispatch(target, summary, language).await
    }

    async fn persist_run(&self, run: &PipelineRun, data: &DataCollection) {
        let store_started = Instant::now();
        let record = RunRecord::from_run(run, data.fallback_sources());
        match self.store.insert_run(&record).await {
            Ok(()) => log_store_operation(
                "insert_run",
                &run.run_id.to_string(),
                "ok",
                Some(store_started.elapsed().as_millis() as u64),
                None,
            ),
            Err(error) => log_error(
                "store",
                "insert_run",
                &error.to_string(),
                Some(&run.run_id.to_string()),
            ),
        }
    }

    async fn persist_alerts(&self, run_id: Uuid, attempts: &[NotificationAttempt]) {
        if attempts.is_empty() {
            return;
        }
        let alerts: Vec<AlertRecord> = attempts
            .iter()
            .map(|attempt| AlertRecord {
                run_id,
                channel: attempt.channel.clone(),
                target: attempt.target.clone(),
                delivered: attempt.success,
                provider_message_id: attempt.provider_message_id.clone(),
            })
            .collect();
        if let Err(error) = self.store.insert_alerts(&alerts).await {
            log_error(
                "store",
                "insert_alerts",
                &error.to_string(),
                Some(&run_id.to_string()),
            );
        }
    }

    fn build_summary(&self, data: &DataCollection, recommendations: &[Recommendation]) -> String {
        let location = data.location_data();
        let mut lines = vec![format!("AgriSense advisory for {}", location.display_name)];
        if data.any_fallback() {
            lines.push("Note: some readings were estimated from regional baselines.".to_string());
        }
        for (index, recommendation) in recommendations
            .iter()
            .take(self.config.top_recommendations)
            .enumerate()
        {
            lines.push(format!(
                "{}. [{}] {} ({})",
                index + 1,
                recommendation.priority,
                recommendation.action,
                recommendation.timeframe
            ));
        }
        if recommendations.is_empty() {
            lines.push("Conditions look stable; no action needed right now.".to_string());
        }
        lines.join("\n")
    }

    async fn validation_failure(
        &self,
        run_id: Uuid,
        started_at: DateTime<Utc>,
        query: &PipelineQuery,
        error: AgriSenseError,
    ) -> PipelineResult {
        log_pipeline_operation(
            "run",
            &run_id.to_string(),
            &RunState::Failed.to_string(),
            "failed",
            Some(&error.to_string()),
        );

        let completed_at = Utc::now();
        let run = PipelineRun {
            run_id,
            query: query.clone(),
            started_at,
            status: RunStatus::Failed,
            completed_at,
        };
        let record = RunRecord::from_run(&run, Vec::new());
        if let Err(store_error) = self.store.insert_run(&record).await {
            log_error(
                "store",
                "insert_run",
                &store_error.to_string(),
                Some(&run_id.to_string()),
            );
        }

        let mirror = self.fallback_mirror(run_id, completed_at, query);
        PipelineResult {
            success: false,
            pipeline_id: run_id,
            timestamp: completed_at,
            status: RunStatus::Failed,
            data_collection: mirror.data_collection.clone(),
            insights: Vec::new(),
            recommendations: Vec::new(),
            alerts: Vec::new(),
            error: Some(error.to_string()),
            fallback_data: Some(Box::new(mirror)),
        }
    }

    /// The outbound shape built entirely from synthesized data, handed to
    /// callers alongside a validation failure so they always have something
    /// to render.
    fn fallback_mirror(
        &self,
        run_id: Uuid,
        timestamp: DateTime<Utc>,
        query: &PipelineQuery,
    ) -> PipelineResult {
        let data = DataCollection {
            location: self.synthesizer.synthesize(SourceKind::Location, query),
            weather: self.synthesizer.synthesize(SourceKind::Weather, query),
            environmental: self.synthesizer.synthesize(SourceKind::Environmental, query),
            imagery: self.synthesizer.synthesize(SourceKind::Imagery, query),
        };
        let insights = derive_insights(&data);
        let recommendations = recommend(&insights);
        PipelineResult {
            success: false,
            pipeline_id: run_id,
            timestamp,
            status: RunStatus::Failed,
            data_collection: data,
            insights,
            recommendations,
            alerts: Vec::new(),
            error: None,
            fallback_data: None,
        }
    }

    fn transition(&self, run_id: Uuid, state: RunState) {
        log_pipeline_operation(
            "transition",
            &run_id.to_string(),
            &state.to_string(),
            "ok",
            None,
        );
    }
}
