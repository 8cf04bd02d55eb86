//! # Run Persistence
//!
//! Minimal persistence seam: one row per pipeline run plus zero-or-more
//! alert rows referencing it. Persistence is best-effort from the
//! orchestrator's point of view; a store failure is logged and recorded,
//! never surfaced as a run failure.

use crate::pipeline::types::{PipelineRun, RunStatus};
use crate::sources::SourceKind;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Error raised by a store backend.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("insert failed: {0}")]
    InsertFailed(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Minimal run row: enough to correlate alerts with a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub run_id: Uuid,
    pub farmer_id: Option<String>,
    pub status: RunStatus,
    pub fallback_sources: Vec<SourceKind>,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl RunRecord {
    /// Project a finalized run onto its persistence row.
    pub fn from_run(run: &PipelineRun, fallback_sources: Vec<SourceKind>) -> Self {
        Self {
            run_id: run.run_id,
            farmer_id: run.query.farmer_id.clone(),
            status: run.status,
            fallback_sources,
            started_at: run.started_at,
            completed_at: run.completed_at,
        }
    }
}

/// One alert row referencing its run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub run_id: Uuid,
    pub channel: String,
    pub target: String,
    pub delivered: bool,
    pub provider_message_id: Option<String>,
}

/// Store seam consumed by the orchestrator. Injected at construction so
/// tests can substitute failing or recording stubs.
#[async_trait]
pub trait RunStore: Send + Sync {
    async fn insert_run(&self, record: &RunRecord) -> Result<(), StoreError>;
    async fn insert_alerts(&self, alerts: &[AlertRecord]) -> Result<(), StoreError>;
}

/// Default in-memory backend. Doubles as the test double.
#[derive(Debug, Default)]
pub struct InMemoryRunStore {
    runs: RwLock<Vec<RunRecord>>,
    alerts: RwLock<Vec<AlertRecord>>,
}

impl InMemoryRunStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn runs(&self) -> Vec<RunRecord> {
        self.runs.read().await.clone()
    }

    pub async fn alerts(&self) -> Vec<AlertRecord> {
        self.alerts.read().await.clone()
    }
}

#[async_trait]
impl RunStore for InMemoryRunStore {
    async fn insert_run(&self, record: &RunRecord) -> Result<(), StoreError> {
        self.runs.write().await.push(record.clone());
        Ok(())
    }

    async fn insert_alerts(&self, alerts: &[AlertRecord]) -> Result<(), StoreError> {
        self.alerts.write().await.extend_from_slice(alerts);
        Ok(())
    }
}
