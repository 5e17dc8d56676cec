//! Domain error types.
//!
//! These errors represent registration data that cannot be normalised into
//! a `TravellerRecord`. They are distinct from store/IO errors.

/// Errors raised while normalising a raw registration record.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Record has no usable identifier
    #[error("record has no id")]
    MissingId,

    /// A numeric field held something that is not a whole number
    #[error("record {id}: {field} is not a whole number: {value}")]
    NotANumber {
        id: String,
        field: &'static str,
        value: String,
    },

    /// A numeric field was negative
    #[error("record {id}: {field} must not be negative (got {value})")]
    Negative {
        id: String,
        field: &'static str,
        value: i64,
    },
}
