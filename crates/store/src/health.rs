//! Store health checks.

use tracing::{debug, error};

use crate::client::StoreClient;

/// Checks that a pooled connection answers.
pub async fn check_connection(client: &StoreClient) -> bool {
    match client.inner().ping().await {
        Ok(()) => {
            debug!("Record store connection healthy");
            true
        }
        Err(e) => {
            error!("Record store health check failed: {}", e);
            false
        }
    }
}
