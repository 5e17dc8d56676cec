//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedStore;
use crate::matching::MatchConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached traveller snapshots
    pub store: Arc<CachedStore>,

    /// Grouping and matching configuration
    pub config: Arc<MatchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(store: CachedStore, config: MatchConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}
