//! Domain types for event ride sharing.
//!
//! This module contains the validated model that the matching code works
//! on. Loose registration data is normalised into these types once, at the
//! store boundary, so downstream code never re-checks mode strings or
//! numeric fields.

mod error;
mod geo;
mod mode;
mod pincode;
mod traveller;

pub use error::DomainError;
pub use geo::GeoPoint;
pub use mode::{InvalidMode, TransportMode};
pub use pincode::{BucketKey, InvalidPincode, PincodeBase};
pub use traveller::{Role, TravellerRecord};
