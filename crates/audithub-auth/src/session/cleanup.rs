//! Expired session cleanup.

use std::sync::Arc;

use tracing::info;

use audithub_core::error::AppError;

use super::store::SessionStore;

/// Deletes expired session rows.
///
/// Expiry is already enforced lazily on every lookup, so this sweep only
/// reclaims storage. It holds no locks and is safe to run concurrently with
/// request traffic; running it twice deletes nothing extra.
#[derive(Debug, Clone)]
pub struct SessionCleanup {
    /// Session store for the bulk delete.
    store: Arc<SessionStore>,
}

impl SessionCleanup {
    /// Creates a new session cleanup handler.
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Runs one cleanup cycle. Returns the number of sessions removed.
    pub async fn run_cleanup(&self) -> Result<u64, AppError> {
        let removed = self.store.delete_expired().await?;

        if removed > 0 {
            info!(removed, "Cleaned up expired sessions");
        }

        Ok(removed)
    }
}
