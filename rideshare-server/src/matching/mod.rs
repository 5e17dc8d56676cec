//! Ride matching over an in-memory traveller snapshot.
//!
//! Everything here is synchronous and read-only over `&[TravellerRecord]`:
//!
//! - [`group_by_proximity`] buckets travellers by postal-code prefix and
//!   reports each locality's seat supply and demand.
//! - [`Matcher`] ranks vehicle providers for a single ride seeker.
//! - [`summarize`] produces the dashboard counters.
//!
//! Fetching and caching the snapshot is the job of [`crate::store`] and
//! [`crate::cache`].

mod config;
mod error;
mod grouping;
mod score;
mod stats;

#[cfg(test)]
pub(crate) mod fixtures;

pub use config::MatchConfig;
pub use error::MatchError;
pub use grouping::{ProximityGroup, UNKNOWN_AREA, group_by_proximity};
pub use score::{
    CompatibilityResult, MatchOptions, Matcher, compatibility_score, estimate_distance_km,
    find_matches, rank_matches,
};
pub use stats::{ModeStats, ProviderStats, SeekerStats, TravellerSummary, summarize};
