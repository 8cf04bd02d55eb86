//! # Resilience Module
//!
//! Wraps every external source call with a hard timeout and bounded
//! exponential-backoff retry. Failures are classified and returned as values;
//! nothing in this module raises past the executor boundary, so a flaky or
//! dead upstream degrades exactly one source instead of the whole run.

pub mod config;
pub mod executor;

pub use config::ExecutorConfig;
pub use executor::ResilientCallExecutor;
