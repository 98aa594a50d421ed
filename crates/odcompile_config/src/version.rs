//! Config schema marker checks.

use crate::{ConfigResult, ConfigStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::{debug, error, info, instrument, warn};

/// Schema marker this build writes to the store.
///
/// Bump when the stored record or the listener contract changes in a way
/// operators need to know about.
pub const CONFIG_SCHEMA_VERSION: &str = "2";

const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Background check that the stored schema marker matches this build.
pub struct VersionWatcher {
    store: Arc<dyn ConfigStore>,
    interval: Duration,
}

impl VersionWatcher {
    /// Create a watcher over `store` that checks every `interval`.
    pub fn new(store: Arc<dyn ConfigStore>, interval: Duration) -> Self {
        Self {
            store,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// Run one check. Returns `true` when the marker was updated.
    #[instrument(skip(self))]
    pub async fn check_once(&self) -> ConfigResult<bool> {
        let stored = self.store.config_version().await?;
        if stored.as_deref() == Some(CONFIG_SCHEMA_VERSION) {
            debug!("Config schema marker is current");
            return Ok(false);
        }

        let listener_url = self.store.listener_url().await?;
        warn!(
            stored = ?stored,
            current = CONFIG_SCHEMA_VERSION,
            %listener_url,
            "Config schema changed; check the listener URL still points at a compatible listener"
        );
        self.store.set_config_version(CONFIG_SCHEMA_VERSION).await?;
        Ok(true)
    }

    /// Spawn the periodic check. The first check runs immediately.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!(interval_secs = self.interval.as_secs(), "Starting version watcher");
            let mut ticker = interval(self.interval);
            loop {
                ticker.tick().await;
                if let Err(e) = self.check_once().await {
                    error!(error = %e, "Config version check failed");
                }
            }
        })
    }
}
