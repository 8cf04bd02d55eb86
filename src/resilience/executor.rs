//! # Resilient Call Executor
//!
//! Races a single external call against a hard timeout and retries transient
//! failures with bounded exponential backoff. Always returns a
//! [`SourceResult`], never an error: exhausted retries or a non-retryable
//! failure yield `success = false` with a classified error kind, and the
//! caller owns fallback substitution.

use crate::logging::log_source_fetch;
use crate::resilience::ExecutorConfig;
use crate::sources::{SourceError, SourceErrorKind, SourceKind, SourcePayload, SourceResult};
use std::future::Future;
use std::time::Instant;
use tracing::{debug, warn};

/// Executes source calls with timeout and retry protection.
#[derive(Debug, Clone)]
pub struct ResilientCallExecutor {
    config: ExecutorConfig,
}

impl ResilientCallExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Run `call` until it succeeds, fails permanently, or exhausts the retry
    /// budget. `call` is invoked once per attempt so each retry gets a fresh
    /// future; a result arriving after its attempt timed out is discarded
    /// with the abandoned future.
    pub async fn execute<F, Fut>(&self, source: SourceKind, mut call: F) -> SourceResult
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<SourcePayload, SourceError>> + Send,
    {
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            let attempt_started = Instant::now();
            let outcome = tokio::time::timeout(self.config.timeout, call()).await;
            let attempt_elapsed = attempt_started.elapsed().as_millis() as u64;

            let error_kind = match outcome {
                Ok(Ok(payload)) => {
                    log_source_fetch(source.as_str(), attempt + 1, attempt_elapsed, "success", None);
                    return SourceResult::fetched(source, payload, started.elapsed());
                }
                Ok(Err(error)) => {
                    log_source_fetch(
                        source.as_str(),
                        attempt + 1,
                        attempt_elapsed,
                        error.kind.as_str(),
                        Some(&error.message),
                    );
                    error.kind
                }
                Err(_) => {
                    log_source_fetch(
                        source.as_str(),
                        attempt + 1,
                        attempt_elapsed,
                        SourceErrorKind::Timeout.as_str(),
                        Some("attempt exceeded timeout, result abandoned"),
                    );
                    SourceErrorKind::Timeout
                }
            };

            if !error_kind.is_retryable() {
                warn!(
                    source = %source,
                    attempt = attempt + 1,
                    error = %error_kind,
                    "Non-retryable source failure, giving up without consuming retry budget"
                );
                return SourceResult::failed(source, error_kind, started.elapsed());
            }

            if attempt >= self.config.max_retries {
                warn!(
                    source = %source,
                    attempts = attempt + 1,
                    error = %error_kind,
                    "Retry budget exhausted, returning classified failure"
                );
                return SourceResult::failed(source, error_kind, started.elapsed());
            }

            let delay = self.config.backoff_delay(attempt);
            debug!(
                source = %source,
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                "Backing off before retry"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}
