//! Registration API client.
//!
//! Fetches transportation registrations from the event backend, passing
//! the snapshot filter through as query parameters.

use reqwest::StatusCode;
use tracing::debug;

use crate::domain::TravellerRecord;

use super::convert::convert_payload;
use super::error::StoreError;
use super::filter::TravellerFilter;
use super::types::RecordsPayload;

/// Path of the transportation collection on the registration API.
const TRANSPORTATION_PATH: &str = "/api/transportation";

/// Configuration for the registration API client.
#[derive(Debug, Clone)]
pub struct RemoteStoreConfig {
    /// Base URL of the registration backend, without trailing slash
    pub base_url: String,
    /// Optional bearer token for the admin endpoints
    pub token: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RemoteStoreConfig {
    /// Create a new config for the given backend.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            timeout_secs: 30,
        }
    }

    /// Authenticate with a bearer token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Full URL of the transportation collection.
    pub fn records_url(&self) -> String {
        format!("{}{}", self.base_url, TRANSPORTATION_PATH)
    }
}

/// Client for the registration API.
#[derive(Debug, Clone)]
pub struct RemoteStore {
    http: reqwest::Client,
    config: RemoteStoreConfig,
}

impl RemoteStore {
    /// Create a new client.
    pub fn new(config: RemoteStoreConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Fetch the records matching `filter`.
    ///
    /// The filter is sent to the API and re-applied locally, so an API that
    /// ignores some parameters still yields a correctly filtered snapshot.
    pub async fn fetch(&self, filter: &TravellerFilter) -> Result<Vec<TravellerRecord>, StoreError> {
        let url = self.config.records_url();

        let mut request = self.http.get(&url).query(&filter.query_pairs());
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let payload: RecordsPayload =
            serde_json::from_str(&body).map_err(|e| StoreError::Json {
                message: e.to_string(),
            })?;

        let records = convert_payload(payload);
        debug!("fetched {} traveller records from {url}", records.len());

        Ok(records.into_iter().filter(|r| filter.matches(r)).collect())
    }

    pub fn config(&self) -> &RemoteStoreConfig {
        &self.config
    }
}
