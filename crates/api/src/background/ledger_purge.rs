//! Periodic removal of expired refresh tokens from the live token ledger.
//!
//! Expired rows can no longer pass verification, so deleting them changes
//! no outcome; it only bounds ledger growth from sessions that were never
//! logged out.

use std::sync::Arc;
use std::time::Duration;

use inotebook_db::LiveTokenStore;
use tokio_util::sync::CancellationToken;

/// Run the purge loop until `cancel` is triggered. The first pass runs
/// immediately.
pub async fn run(ledger: Arc<dyn LiveTokenStore>, every: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = every.as_secs(), "Ledger purge job started");

    let mut interval = tokio::time::interval(every);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Ledger purge job stopping");
                break;
            }
            _ = interval.tick() => purge_once(ledger.as_ref()).await,
        }
    }
}

async fn purge_once(ledger: &dyn LiveTokenStore) {
    match ledger.purge_expired_live_tokens().await {
        Ok(0) => tracing::debug!("Ledger purge: no expired tokens"),
        Ok(deleted) => tracing::info!(deleted, "Ledger purge: removed expired tokens"),
        Err(e) => tracing::error!(error = %e, "Ledger purge: cleanup failed"),
    }
}
