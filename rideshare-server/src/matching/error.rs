//! Matching error types.

/// Errors from ride matching.
///
/// An empty match list is not an error; these variants are only for
/// requests that cannot be answered at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MatchError {
    /// The id does not resolve to a ride seeker in the snapshot
    #[error("no ride seeker with id {id}")]
    NotFound { id: String },

    /// Matching options are out of range or contradictory
    #[error("invalid matching options: {0}")]
    InvalidInput(String),
}
