//! Search metrics
//!
//! - Counters only, monotonic
//! - Thread-safe via relaxed atomics
//! - Passive: nothing reads them to make decisions

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Operational counters shared by an executor and its result sets
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    /// Successful query executions
    queries_executed: AtomicU64,
    /// Query executions the searcher rejected
    queries_failed: AtomicU64,
    /// Hits collected across all executions
    hits_collected: AtomicU64,
    /// Positions materialized from stored fields
    materializations: AtomicU64,
    /// Positions served from a result cache
    cache_hits: AtomicU64,
    /// Positions that failed to materialize
    malformed_results: AtomicU64,
}

impl MetricsRegistry {
    /// Create a new metrics registry with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful execution that produced `hits` hits
    pub fn record_query(&self, hits: u64) {
        self.queries_executed.fetch_add(1, Ordering::Relaxed);
        self.hits_collected.fetch_add(hits, Ordering::Relaxed);
    }

    /// Increment failed executions
    pub fn increment_queries_failed(&self) {
        self.queries_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment materializations
    pub fn increment_materializations(&self) {
        self.materializations.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment cache hits
    pub fn increment_cache_hits(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment malformed results
    pub fn increment_malformed(&self) {
        self.malformed_results.fetch_add(1, Ordering::Relaxed);
    }

    /// Get all metrics as a snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            queries_executed: self.queries_executed.load(Ordering::Relaxed),
            queries_failed: self.queries_failed.load(Ordering::Relaxed),
            hits_collected: self.hits_collected.load(Ordering::Relaxed),
            materializations: self.materializations.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            malformed_results: self.malformed_results.load(Ordering::Relaxed),
        }
    }

    /// Current values as a JSON object
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

/// A point-in-time snapshot of all metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub queries_executed: u64,
    pub queries_failed: u64,
    pub hits_collected: u64,
    pub materializations: u64,
    pub cache_hits: u64,
    pub malformed_results: u64,
}
