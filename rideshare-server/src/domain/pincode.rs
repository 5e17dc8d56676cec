//! Postal code bucketing keys.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid pincode prefix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid pincode prefix: {reason}")]
pub struct InvalidPincode {
    reason: &'static str,
}

/// The leading digits of an Indian postal code (PIN).
///
/// Only the first few digits carry locality meaning: the first three
/// identify the sorting district, which is the granularity used for
/// ride-sharing groups. A `PincodeBase` is always a non-empty run of ASCII
/// digits.
///
/// # Examples
///
/// ```
/// use rideshare_server::domain::PincodeBase;
///
/// let base = PincodeBase::from_postal_code("682 011", 3).unwrap();
/// assert_eq!(base.as_str(), "682");
///
/// // Too short
/// assert!(PincodeBase::from_postal_code("68", 3).is_none());
///
/// // Letters in the prefix
/// assert!(PincodeBase::from_postal_code("6A2011", 3).is_none());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PincodeBase(String);

impl PincodeBase {
    /// Parse a prefix that is already exactly the digits of the key.
    pub fn parse(s: &str) -> Result<Self, InvalidPincode> {
        if s.is_empty() {
            return Err(InvalidPincode {
                reason: "must not be empty",
            });
        }

        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPincode {
                reason: "must be ASCII digits 0-9",
            });
        }

        Ok(PincodeBase(s.to_string()))
    }

    /// Derive the bucketing prefix of length `len` from a raw postal code.
    ///
    /// Whitespace anywhere in the code is ignored. Returns `None` when the
    /// code has fewer than `len` leading digits.
    pub fn from_postal_code(code: &str, len: usize) -> Option<Self> {
        if len == 0 {
            return None;
        }

        let prefix: String = code
            .chars()
            .filter(|c| !c.is_whitespace())
            .take(len)
            .collect();

        if prefix.len() != len {
            return None;
        }

        Self::parse(&prefix).ok()
    }

    /// Returns the prefix digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PincodeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PincodeBase({})", self.0)
    }
}

impl fmt::Display for PincodeBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key a traveller is grouped under.
///
/// Records whose postal code is missing or malformed land in the explicit
/// `Unknown` bucket instead of being dropped. `Unknown` orders after every
/// pincode prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BucketKey {
    Pincode(PincodeBase),
    Unknown,
}

impl BucketKey {
    /// Wire/display label for the unknown bucket.
    pub const UNKNOWN_LABEL: &'static str = "unknown";

    /// Bucket a raw postal code using a prefix of `len` digits.
    pub fn from_postal_code(code: &str, len: usize) -> Self {
        PincodeBase::from_postal_code(code, len)
            .map(BucketKey::Pincode)
            .unwrap_or(BucketKey::Unknown)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, BucketKey::Unknown)
    }

    pub fn as_str(&self) -> &str {
        match self {
            BucketKey::Pincode(base) => base.as_str(),
            BucketKey::Unknown => Self::UNKNOWN_LABEL,
        }
    }
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BucketKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
