//! Batch upsert into the record store.
//!
//! A batch is applied inside one transaction: every record either updates
//! the row with the same country or inserts a new one. Any failure rolls the
//! whole batch back.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, DbErr, EntityTrait, QueryFilter,
    TransactionTrait,
};
use serde::Serialize;
use stats_core::StatRecord;
use telemetry::metrics;
use tracing::{debug, error, info, warn};

use crate::client::StoreClient;
use crate::entity::{self, ActiveModel};

/// Result of reconciling one batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    /// Records inserted or updated; zero when the batch was rolled back.
    pub stored: usize,
    pub inserted: usize,
    pub updated: usize,
    /// The batch failed and nothing was persisted.
    pub rolled_back: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReconcileOutcome {
    fn committed(inserted: usize, updated: usize) -> Self {
        Self {
            stored: inserted + updated,
            inserted,
            updated,
            rolled_back: false,
            error: None,
        }
    }

    /// A transaction ran against the store and committed.
    pub fn is_committed(&self) -> bool {
        !self.rolled_back && self.stored > 0
    }

    fn rolled_back(error: impl Into<String>) -> Self {
        Self {
            rolled_back: true,
            error: Some(error.into()),
            ..Self::default()
        }
    }
}

/// Upserts `records` by country in a single transaction.
///
/// Never fails: a storage error is logged, the transaction is rolled back,
/// and the outcome reports zero stored records.
pub async fn reconcile(client: &StoreClient, records: &[StatRecord]) -> ReconcileOutcome {
    if records.is_empty() {
        debug!("Empty batch, nothing to reconcile");
        return ReconcileOutcome::default();
    }

    match apply_batch(client, records, Utc::now()).await {
        Ok((inserted, updated)) => {
            let m = metrics();
            m.records_inserted.inc_by(inserted as u64);
            m.records_updated.inc_by(updated as u64);
            info!(inserted, updated, "Batch reconciled");
            ReconcileOutcome::committed(inserted, updated)
        }
        Err(e) => {
            metrics().reconcile_rollbacks.inc();
            error!(batch_size = records.len(), "Batch rolled back: {}", e);
            ReconcileOutcome::rolled_back(e.to_string())
        }
    }
}

async fn apply_batch(
    client: &StoreClient,
    records: &[StatRecord],
    recorded_at: DateTime<Utc>,
) -> Result<(usize, usize), DbErr> {
    let txn = client.inner().begin().await?;

    match upsert_all(&txn, records, recorded_at).await {
        Ok(counts) => {
            txn.commit().await?;
            Ok(counts)
        }
        Err(e) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!("Rollback failed: {}", rollback_err);
            }
            Err(e)
        }
    }
}

async fn upsert_all(
    txn: &DatabaseTransaction,
    records: &[StatRecord],
    recorded_at: DateTime<Utc>,
) -> Result<(usize, usize), DbErr> {
    let mut inserted = 0;
    let mut updated = 0;

    for record in records {
        let existing = entity::Entity::find()
            .filter(entity::Column::Country.eq(record.country.as_str()))
            .one(txn)
            .await?;

        match existing {
            Some(row) => {
                ActiveModel::for_update(row.id, record, recorded_at)
                    .update(txn)
                    .await?;
                updated += 1;
            }
            None => {
                ActiveModel::for_insert(record, recorded_at)
                    .insert(txn)
                    .await?;
                inserted += 1;
            }
        }
    }

    Ok((inserted, updated))
}
