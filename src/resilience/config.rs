use crate::config::PipelineConfig;
use std::time::Duration;

/// Configuration for the resilient call executor.
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Hard per-attempt timeout. A call still in flight when this elapses is
    /// abandoned and classified as a timeout.
    pub timeout: Duration,

    /// Retries after the first attempt. Zero means exactly one attempt.
    pub max_retries: u32,

    /// Base delay for exponential backoff between attempts.
    pub backoff_base: Duration,

    /// Ceiling for the backoff delay.
    pub backoff_max: Duration,

    /// Apply a small random jitter to backoff delays so co-failing sources
    /// do not retry in lockstep.
    pub jitter: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(8),
            max_retries: 2,
            backoff_base: Duration::from_millis(250),
            backoff_max: Duration::from_secs(5),
            jitter: true,
        }
    }
}

impl From<&PipelineConfig> for ExecutorConfig {
    fn from(config: &PipelineConfig) -> Self {
        Self {
            timeout: config.source_timeout(),
            max_retries: config.max_retries,
            backoff_base: Duration::from_millis(config.backoff_base_ms),
            backoff_max: Duration::from_millis(config.backoff_max_ms),
            jitter: config.retry_jitter,
        }
    }
}

impl ExecutorConfig {
    /// Backoff delay before the retry following `attempt` (0-based), with
    /// the ceiling applied before jitter.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponential = self
            .backoff_base
            .saturating_mul(2u32.saturating_pow(attempt));
        let capped = exponential.min(self.backoff_max);
        if self.jitter {
            capped.mul_f64(1.0 + fastrand::f64() * 0.1)
        } else {
            capped
        }
    }
}
