//! Shared server state.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::chain::ChainSession;
use crate::config::Config;

/// State shared by all tool handlers.
///
/// Tool calls take the session lock and are applied one at a time.
#[derive(Clone)]
pub struct AppState {
    /// The reasoning session.
    pub session: Arc<Mutex<ChainSession>>,
}

impl AppState {
    /// Creates state with a fresh session.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            session: Arc::new(Mutex::new(ChainSession::new(config))),
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
