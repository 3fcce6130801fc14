//! Ingestion orchestrator.
//!
//! One run is:
//! 1. Fetch the raw payload from the upstream source
//! 2. Normalize it into records, skipping malformed entries
//! 3. Reconcile the records into the store in one transaction

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value;
use stats_core::limits::UPSTREAM_LIST_FIELD;
use stats_core::{normalize_payload, Result};
use store::{reconcile, StoreClient};
use telemetry::{health, metrics};
use tracing::{debug, error, info, warn};
use upstream::StatsSource;

/// Summary of one ingestion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Entries in the upstream list, before any cap or filtering.
    pub fetched: usize,
    pub normalized: usize,
    /// Excluded or malformed entries.
    pub skipped: usize,
    /// Records inserted or updated; zero when rolled back.
    pub stored: usize,
    pub rolled_back: bool,
    pub latency_ms: u64,
}

/// Runs fetch, normalize, and reconcile against a shared store.
pub struct Ingestor {
    source: Arc<dyn StatsSource>,
    store: Arc<StoreClient>,
}

impl Ingestor {
    pub fn new(source: Arc<dyn StatsSource>, store: Arc<StoreClient>) -> Self {
        Self { source, store }
    }

    pub fn store(&self) -> &Arc<StoreClient> {
        &self.store
    }

    /// Runs one ingestion.
    ///
    /// Only a failed fetch is an error. Malformed entries are skipped and a
    /// storage failure is reported through [`IngestReport::rolled_back`].
    pub async fn run(&self) -> Result<IngestReport> {
        let start = Instant::now();
        let m = metrics();
        m.ingestions_started.inc();

        let payload = self.fetch().await?;
        let fetched = upstream_len(&payload);

        let batch = normalize_payload(&payload);
        for rejected in &batch.rejected {
            debug!(source = self.source.name(), "Skipped entry: {}", rejected);
        }
        m.entries_normalized.inc_by(batch.records.len() as u64);
        m.entries_skipped.inc_by(batch.skipped() as u64);

        let outcome = reconcile(&self.store, &batch.records).await;
        if outcome.rolled_back {
            warn!(
                records = batch.records.len(),
                "Ingestion stored nothing, batch rolled back"
            );
        } else if outcome.is_committed() {
            health().store.set_healthy();
        }

        let latency_ms = start.elapsed().as_millis() as u64;
        m.ingest_latency_ms.observe(latency_ms);
        m.last_batch_size.set(outcome.stored as u64);
        m.ingestions_completed.inc();

        let report = IngestReport {
            fetched,
            normalized: batch.records.len(),
            skipped: batch.skipped(),
            stored: outcome.stored,
            rolled_back: outcome.rolled_back,
            latency_ms,
        };

        info!(
            source = self.source.name(),
            fetched = report.fetched,
            normalized = report.normalized,
            skipped = report.skipped,
            stored = report.stored,
            latency_ms = report.latency_ms,
            "Ingestion finished"
        );
        debug!(metrics = ?m.snapshot(), "Ingestion metrics");

        Ok(report)
    }

    async fn fetch(&self) -> Result<Value> {
        let start = Instant::now();
        let result = self.source.fetch().await;
        metrics()
            .fetch_latency_ms
            .observe(start.elapsed().as_millis() as u64);

        match result {
            Ok(payload) => {
                health().upstream.set_healthy();
                Ok(payload)
            }
            Err(e) => {
                metrics().fetch_failures.inc();
                health().upstream.set_unhealthy(e.to_string());
                error!(source = self.source.name(), "Upstream fetch failed: {}", e);
                Err(e)
            }
        }
    }
}

fn upstream_len(payload: &Value) -> usize {
    payload
        .get(UPSTREAM_LIST_FIELD)
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}
