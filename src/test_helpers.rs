//! Stub collaborators shared by unit and integration tests.

use crate::notify::{NotificationChannel, NotificationError};
use crate::pipeline::types::PipelineQuery;
use crate::sources::{
    LocationData, SourceAdapter, SourceError, SourceErrorKind, SourceKind, SourcePayload,
};
use crate::store::{AlertRecord, RunRecord, RunStore, StoreError};
use async_trait::async_trait;
use std::time::Duration;

/// Adapter that always returns the same payload.
pub struct StaticAdapter {
    kind: SourceKind,
    payload: SourcePayload,
}

impl StaticAdapter {
    pub fn new(kind: SourceKind, payload: SourcePayload) -> Self {
        Self { kind, payload }
    }

    pub fn location(latitude: f64, longitude: f64) -> Self {
        Self::new(
            SourceKind::Location,
            SourcePayload::Location(LocationData::from_coordinates(latitude, longitude)),
        )
    }
}

#[async_trait]
impl SourceAdapter for StaticAdapter {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self, _query: &PipelineQuery) -> Result<SourcePayload, SourceError> {
        Ok(self.payload.clone())
    }
}

/// Adapter that always fails with the given classification.
pub struct FailingAdapter {
    kind: SourceKind,
    error: SourceErrorKind,
}

impl FailingAdapter {
    pub fn new(kind: SourceKind, error: SourceErrorKind) -> Self {
        Self { kind, error }
    }
}

#[async_trait]
impl SourceAdapter for FailingAdapter {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self, _query: &PipelineQuery) -> Result<SourcePayload, SourceError> {
        Err(SourceError::new(self.kind, self.error, "stubbed failure"))
    }
}

/// Adapter that never resolves within any reasonable test window, for
/// exercising the executor's timeout bound.
pub struct HangingAdapter {
    kind: SourceKind,
}

impl HangingAdapter {
    pub fn new(kind: SourceKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl SourceAdapter for HangingAdapter {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn fetch(&self, _query: &PipelineQuery) -> Result<SourcePayload, SourceError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(SourceError::timeout(self.kind, "unreachable"))
    }
}

/// Channel with a scripted outcome.
pub struct StubChannel {
    name: String,
    fail: bool,
}

impl StubChannel {
    pub fn succeeding(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail: false,
        }
    }

    pub fn failing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail: true,
        }
    }
}

#[async_trait]
impl NotificationChannel for StubChannel {
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(
        &self,
        _target: &str,
        _message: &str,
        _language: &str,
    ) -> Result<String, NotificationError> {
        if self.fail {
            Err(NotificationError::ChannelFailure {
                channel: self.name.clone(),
                message: "stubbed outage".to_string(),
            })
        } else {
            Ok(format!("{}-msg-1", self.name))
        }
    }
}

/// Store that rejects every insert, for best-effort persistence tests.
#[derive(Debug, Default)]
pub struct FailingStore;

#[async_trait]
impl RunStore for FailingStore {
    async fn insert_run(&self, _record: &RunRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("stubbed store outage".to_string()))
    }

    async fn insert_alerts(&self, _alerts: &[AlertRecord]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("stubbed store outage".to_string()))
    }
}
