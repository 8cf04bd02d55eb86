//! # Pipeline Orchestration
//!
//! Coordinates one end-to-end run: cache lookup, concurrent source
//! collection behind the resilient call executor, fallback substitution,
//! insight derivation, recommendation expansion, and best-effort
//! persistence/notification. A run always completes with either a full
//! result or a structured validation failure plus synthesized fallback data.

pub mod orchestrator;
pub mod states;
pub mod types;

pub use orchestrator::{PipelineOrchestrator, SourceAdapters};
pub use states::RunState;
pub use types::{
    Coordinates, DataCollection, ImageRef, PipelineQuery, PipelineResult, PipelineRun, RunStatus,
};
