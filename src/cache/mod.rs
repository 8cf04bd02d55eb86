//! # Result Cache
//!
//! Time-boxed memoization of full pipeline runs, keyed by the query
//! fingerprint. The cache is the only mutable state shared across concurrent
//! runs; entries are replaced atomically so a reader never observes a
//! partially-written value. There is deliberately no single-flight lock
//! around the compute function: two identical concurrent requests may both
//! compute, and the last completed write wins.

pub mod result_cache;

pub use result_cache::{CacheStats, ResultCache};
