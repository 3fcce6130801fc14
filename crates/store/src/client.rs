//! Store client wrapper.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use stats_core::{Error, Result};
use tracing::info;

use crate::config::StoreConfig;

/// Pooled connection to the record store.
#[derive(Clone)]
pub struct StoreClient {
    inner: DatabaseConnection,
    config: StoreConfig,
}

impl StoreClient {
    /// Opens the connection pool.
    pub async fn connect(config: StoreConfig) -> Result<Self> {
        let pool_size = if config.is_in_memory() {
            1
        } else {
            config.pool_size.max(1)
        };
        let timeout = Duration::from_secs(config.timeout_secs);

        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(pool_size)
            .min_connections(1)
            .connect_timeout(timeout)
            .acquire_timeout(timeout)
            .sqlx_logging(false);

        let inner = Database::connect(opt)
            .await
            .map_err(|e| Error::database(format!("Failed to connect to store: {}", e)))?;

        info!(
            backend = ?inner.get_database_backend(),
            pool_size = pool_size,
            "Connected to record store"
        );

        Ok(Self { inner, config })
    }

    /// Opens a fresh in-memory SQLite store with the schema applied.
    pub async fn in_memory() -> Result<Self> {
        let client = Self::connect(StoreConfig::in_memory()).await?;
        crate::schema::init_schema(&client).await?;
        Ok(client)
    }

    /// Returns the inner sea-orm connection.
    pub fn inner(&self) -> &DatabaseConnection {
        &self.inner
    }

    /// Returns the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}
