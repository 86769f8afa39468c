//! Session reaper — periodic deletion of expired session rows.

use std::time::Duration;

use tokio::sync::watch;
use tokio::time;
use tracing::{error, info};

use audithub_auth::session::SessionCleanup;
use audithub_core::config::session::SessionConfig;

/// Runs the expired-session sweep on a fixed interval.
///
/// Validation already rejects expired sessions lazily, so the sweep only
/// reclaims rows; it runs concurrently with request traffic and a missed or
/// doubled tick is harmless.
#[derive(Debug, Clone)]
pub struct SessionReaper {
    /// The cleanup operation.
    cleanup: SessionCleanup,
    /// Sweep interval.
    interval: Duration,
}

impl SessionReaper {
    /// Creates a new reaper from configuration.
    pub fn new(cleanup: SessionCleanup, config: &SessionConfig) -> Self {
        Self {
            cleanup,
            interval: Duration::from_millis(config.reaper_interval_ms),
        }
    }

    /// Runs the sweep loop until the cancel signal is received.
    pub async fn run(&self, mut cancel: watch::Receiver<bool>) {
        info!(interval_ms = self.interval.as_millis() as u64, "Session reaper started");

        let mut ticker = time::interval(self.interval);
        // The first tick of a tokio interval fires immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.changed() => {
                    if *cancel.borrow() {
                        info!("Session reaper received shutdown signal");
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.cleanup.run_cleanup().await {
                        error!(error = %e, "Session sweep failed");
                    }
                }
            }
        }

        info!("Session reaper stopped");
    }
}
