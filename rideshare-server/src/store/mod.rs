//! Traveller record store boundary.
//!
//! The registration database is an external collaborator. This module
//! fetches a filtered snapshot from it, either from an exported JSON file or
//! from the registration API, and normalises the loosely typed documents
//! into `TravellerRecord`s before anything else sees them.

mod convert;
mod error;
mod filter;
mod local;
mod remote;
mod types;

pub use convert::{
    convert_payload, convert_record, convert_records, parse_travel_date, resolve_travel_date,
};
pub use error::StoreError;
pub use filter::TravellerFilter;
pub use local::LocalStore;
pub use remote::{RemoteStore, RemoteStoreConfig};
pub use types::{
    LooseBool, LooseDate, LooseNumber, LooseString, RawTravellerRecord, RecordsPayload,
};

use crate::domain::TravellerRecord;

/// Where traveller snapshots come from.
#[derive(Clone)]
pub enum TravellerStore {
    Local(LocalStore),
    Remote(RemoteStore),
}

impl TravellerStore {
    /// Fetch the records matching `filter`.
    pub async fn fetch(&self, filter: &TravellerFilter) -> Result<Vec<TravellerRecord>, StoreError> {
        match self {
            TravellerStore::Local(store) => store.fetch(filter).await,
            TravellerStore::Remote(store) => store.fetch(filter).await,
        }
    }

    /// Re-read the underlying source where that means anything.
    ///
    /// Returns the new record count for file stores; the remote API is
    /// always live, so there is nothing to reload and `None` is returned.
    pub async fn reload(&self) -> Result<Option<usize>, StoreError> {
        match self {
            TravellerStore::Local(store) => store.reload().await.map(Some),
            TravellerStore::Remote(_) => Ok(None),
        }
    }

    /// Human-readable description for startup logs.
    pub fn describe(&self) -> String {
        match self {
            TravellerStore::Local(store) => match store.path() {
                Some(path) => format!("file {}", path.display()),
                None => "in-memory records".to_string(),
            },
            TravellerStore::Remote(store) => format!("API {}", store.config().records_url()),
        }
    }
}
