//! Table bootstrap.
//!
//! The table is derived from the [`entity`](crate::entity) definition and
//! created on startup if missing. There is no migration history.

use sea_orm::{ConnectionTrait, Schema};
use stats_core::{Error, Result};
use tracing::debug;

use crate::client::StoreClient;
use crate::entity;

/// Creates the `stat_records` table and its indexes if they do not exist.
pub async fn init_schema(client: &StoreClient) -> Result<()> {
    let db = client.inner();
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut table = schema.create_table_from_entity(entity::Entity);
    table.if_not_exists();
    db.execute(backend.build(&table))
        .await
        .map_err(|e| Error::database(format!("Failed to create table: {}", e)))?;

    for mut index in schema.create_index_from_entity(entity::Entity) {
        index.if_not_exists();
        db.execute(backend.build(&index))
            .await
            .map_err(|e| Error::database(format!("Failed to create index: {}", e)))?;
    }

    debug!("Record store schema initialized");
    Ok(())
}
