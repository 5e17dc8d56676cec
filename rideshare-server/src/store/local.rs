//! File-backed traveller store.
//!
//! Serves an exported snapshot of the registration collection from a JSON
//! file. Useful for development and for running the dashboard against a
//! frozen export.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::domain::TravellerRecord;

use super::convert::convert_payload;
use super::error::StoreError;
use super::filter::TravellerFilter;
use super::types::RecordsPayload;

/// Traveller store backed by a JSON file.
///
/// The file is read once on load and again on every `reload`.
#[derive(Clone)]
pub struct LocalStore {
    path: Option<PathBuf>,
    records: Arc<RwLock<Arc<Vec<TravellerRecord>>>>,
}

impl LocalStore {
    /// Load records from a JSON file (array or `{ "data": [...] }`).
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let records = read_records(&path).await?;
        info!("loaded {} traveller records from {}", records.len(), path.display());

        Ok(Self {
            path: Some(path),
            records: Arc::new(RwLock::new(Arc::new(records))),
        })
    }

    /// Create a store over an in-memory set of records.
    pub fn from_records(records: Vec<TravellerRecord>) -> Self {
        Self {
            path: None,
            records: Arc::new(RwLock::new(Arc::new(records))),
        }
    }

    /// Return the records matching `filter`.
    pub async fn fetch(&self, filter: &TravellerFilter) -> Result<Vec<TravellerRecord>, StoreError> {
        let guard = self.records.read().await;
        Ok(guard.iter().filter(|r| filter.matches(r)).cloned().collect())
    }

    /// Number of records currently held.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }

    /// Re-read the backing file.
    ///
    /// On failure the existing records are kept and the error is returned.
    /// In-memory stores have nothing to reload and report their size.
    pub async fn reload(&self) -> Result<usize, StoreError> {
        let Some(path) = &self.path else {
            return Ok(self.len().await);
        };

        let records = read_records(path).await?;
        let count = records.len();

        let mut guard = self.records.write().await;
        *guard = Arc::new(records);

        Ok(count)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

async fn read_records(path: &Path) -> Result<Vec<TravellerRecord>, StoreError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| StoreError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    let payload: RecordsPayload = serde_json::from_str(&json).map_err(|e| StoreError::Json {
        message: format!("{}: {e}", path.display()),
    })?;

    Ok(convert_payload(payload))
}
