//! Central server state: the session store plus configuration

use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Application state type alias
pub type AppState = Arc<SessionManager>;

/// Owns every browser session and the server configuration.
///
/// Cheap to share: handlers clone the `Arc`, never the data.
#[derive(Debug)]
pub struct SessionManager {
    pub store: SessionStore,
    pub config: ServerConfig,
}

impl SessionManager {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            store: SessionStore::new(),
            config,
        }
    }
}

/// Periodically drop sessions idle past the configured TTL.
///
/// The returned handle is detached by the caller; the task runs for the
/// life of the process and exits with it.
pub fn spawn_session_sweeper(manager: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let period =
            std::time::Duration::from_secs(manager.config.session_sweep_interval_secs.max(1));
        let ttl = chrono::Duration::seconds(manager.config.session_ttl_secs as i64);
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately; skip it.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = manager.store.sweep_expired(ttl);
            if removed > 0 {
                info!(
                    removed,
                    active = manager.store.len(),
                    "swept expired sessions"
                );
            } else {
                debug!(active = manager.store.len(), "session sweep: nothing expired");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manager_starts_empty() {
        let manager = SessionManager::new(ServerConfig::default());
        assert!(manager.store.is_empty());
    }
}
