//! Caching layer for traveller snapshots.
//!
//! Dashboard widgets poll the same handful of filters, and every request
//! would otherwise hit the registration backend. Snapshots are cached per
//! filter for a short TTL. The matching code itself stays stateless; only
//! the raw record snapshots are cached, never computed results.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::TravellerRecord;
use crate::store::{StoreError, TravellerFilter, TravellerStore};

/// Cached snapshot entry.
pub type Snapshot = Arc<Vec<TravellerRecord>>;

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            max_capacity: 256,
        }
    }
}

/// Traveller store with per-filter snapshot caching.
pub struct CachedStore {
    store: TravellerStore,
    snapshots: MokaCache<TravellerFilter, Snapshot>,
}

impl CachedStore {
    /// Create a new cached store.
    pub fn new(store: TravellerStore, config: &CacheConfig) -> Self {
        let snapshots = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { store, snapshots }
    }

    /// Get the snapshot for `filter`, using the cache if available.
    ///
    /// Store errors are returned unchanged and nothing is cached for them.
    pub async fn snapshot(&self, filter: &TravellerFilter) -> Result<Snapshot, StoreError> {
        if let Some(cached) = self.snapshots.get(filter).await {
            return Ok(cached);
        }

        let records = self.store.fetch(filter).await?;
        debug!("cached snapshot of {} records for {filter:?}", records.len());

        let entry = Arc::new(records);
        self.snapshots.insert(filter.clone(), entry.clone()).await;

        Ok(entry)
    }

    /// Reload the underlying store and drop every cached snapshot.
    pub async fn refresh(&self) -> Result<Option<usize>, StoreError> {
        let count = self.store.reload().await?;
        self.invalidate();
        Ok(count)
    }

    /// Get cache statistics.
    pub fn entry_count(&self) -> u64 {
        self.snapshots.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate(&self) {
        self.snapshots.invalidate_all();
    }
}
