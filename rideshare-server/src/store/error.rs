//! Traveller store error types.

/// Errors that can occur while fetching a traveller snapshot.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Snapshot file could not be read
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Registration API rejected our credentials
    #[error("unauthorized: check RIDESHARE_REMOTE_TOKEN")]
    Unauthorized,

    /// Registration API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the records JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
