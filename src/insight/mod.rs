//! # Insight Derivation
//!
//! Pure, rule-based scoring over the aggregated source results. Each of the
//! six fixed categories applies ordered threshold rules against the relevant
//! numeric signals and produces a scored, labeled [`Insight`]. Identical
//! input always yields identical output: no randomness, no wall-clock reads.

pub mod engine;
pub mod types;

pub use engine::derive_insights;
pub use types::{DataTrust, Insight, InsightCategory, OverallRating, QualityRating, RiskLevel};
