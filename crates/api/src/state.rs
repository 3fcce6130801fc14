//! Application state shared across handlers.

use std::sync::Arc;

use pipeline::Ingestor;
use store::StoreClient;
use upstream::StatsSource;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Record store
    pub store: Arc<StoreClient>,
    /// Ingestion pipeline (RapidAPI in production, mock source in tests)
    pub ingestor: Arc<Ingestor>,
}

impl AppState {
    pub fn new(source: Arc<dyn StatsSource>, store: Arc<StoreClient>) -> Self {
        Self {
            ingestor: Arc::new(Ingestor::new(source, store.clone())),
            store,
        }
    }
}
