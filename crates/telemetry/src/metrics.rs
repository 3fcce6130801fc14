//! In-process metrics.
//!
//! Counters are process-global and lock-free; they surface through logs and
//! the `/health` endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A counter metric.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_by(&self, n: u64) {
        self.0.fetch_add(n, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// A gauge metric holding the last observed value.
#[derive(Debug, Default)]
pub struct Gauge(AtomicU64);

impl Gauge {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn set(&self, val: u64) {
        self.0.store(val, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Histogram for latency tracking.
#[derive(Debug)]
pub struct Histogram {
    /// Buckets: 10ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s, 30s
    buckets: [AtomicU64; 10],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    const BUCKET_BOUNDS: [u64; 10] = [10, 50, 100, 250, 500, 1000, 2500, 5000, 10000, 30000];

    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Records a value in milliseconds.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        let idx = Self::BUCKET_BOUNDS
            .iter()
            .position(|&bound| ms <= bound)
            .unwrap_or(Self::BUCKET_BOUNDS.len() - 1);
        self.buckets[idx].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum() as f64 / count as f64
        }
    }

    /// Returns `(upper bound ms, count)` pairs.
    pub fn buckets(&self) -> Vec<(u64, u64)> {
        Self::BUCKET_BOUNDS
            .iter()
            .zip(self.buckets.iter())
            .map(|(&bound, count)| (bound, count.load(Ordering::Relaxed)))
            .collect()
    }
}

/// Collected metrics for the statistics service.
#[derive(Debug, Default)]
pub struct Metrics {
    // Ingestion
    pub ingestions_started: Counter,
    pub ingestions_completed: Counter,
    pub fetch_failures: Counter,
    pub entries_normalized: Counter,
    pub entries_skipped: Counter,

    // Reconciliation
    pub records_inserted: Counter,
    pub records_updated: Counter,
    pub reconcile_rollbacks: Counter,

    // Queries
    pub queries_served: Counter,
    pub query_errors: Counter,

    // Latency
    pub fetch_latency_ms: Histogram,
    pub ingest_latency_ms: Histogram,

    // Gauges
    pub last_batch_size: Gauge,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            ingestions_started: self.ingestions_started.get(),
            ingestions_completed: self.ingestions_completed.get(),
            fetch_failures: self.fetch_failures.get(),
            entries_normalized: self.entries_normalized.get(),
            entries_skipped: self.entries_skipped.get(),
            records_inserted: self.records_inserted.get(),
            records_updated: self.records_updated.get(),
            reconcile_rollbacks: self.reconcile_rollbacks.get(),
            queries_served: self.queries_served.get(),
            query_errors: self.query_errors.get(),
            fetch_latency_mean_ms: self.fetch_latency_ms.mean(),
            ingest_latency_mean_ms: self.ingest_latency_ms.mean(),
            last_batch_size: self.last_batch_size.get(),
        }
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub ingestions_started: u64,
    pub ingestions_completed: u64,
    pub fetch_failures: u64,
    pub entries_normalized: u64,
    pub entries_skipped: u64,
    pub records_inserted: u64,
    pub records_updated: u64,
    pub reconcile_rollbacks: u64,
    pub queries_served: u64,
    pub query_errors: u64,
    pub fetch_latency_mean_ms: f64,
    pub ingest_latency_mean_ms: f64,
    pub last_batch_size: u64,
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
