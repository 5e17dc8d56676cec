//! Dashboard counters over a traveller snapshot.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{Role, TransportMode, TravellerRecord};

/// Provider-side totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderStats {
    pub count: usize,
    pub total_capacity: u64,
    /// Providers who asked for parking at the venue.
    pub need_parking: usize,
}

/// Seeker-side totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeekerStats {
    pub count: usize,
    /// Seats requested across all seeker groups.
    pub total_needed: u64,
}

/// Totals for one mode of transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeStats {
    pub count: usize,
    /// Seats offered by providers using this mode.
    pub total_capacity: u64,
}

/// Summary of a snapshot for the organiser dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravellerSummary {
    pub total_travellers: usize,
    pub vehicle_providers: ProviderStats,
    pub ride_seekers: SeekerStats,
    /// Records that neither offer nor need a ride.
    pub other_travellers: usize,
    pub mode_breakdown: BTreeMap<TransportMode, ModeStats>,
}

/// Count providers, seekers and modes in `records`.
///
/// An empty snapshot gives all-zero counters.
pub fn summarize(records: &[TravellerRecord]) -> TravellerSummary {
    let mut summary = TravellerSummary {
        total_travellers: records.len(),
        ..TravellerSummary::default()
    };

    for record in records {
        let mode = summary
            .mode_breakdown
            .entry(record.mode_of_transport)
            .or_default();
        mode.count += 1;

        match record.role() {
            Role::Provider => {
                let seats = u64::from(record.offered_seats());
                mode.total_capacity += seats;

                let providers = &mut summary.vehicle_providers;
                providers.count += 1;
                providers.total_capacity += seats;
                if record.need_parking {
                    providers.need_parking += 1;
                }
            }
            Role::Seeker => {
                summary.ride_seekers.count += 1;
                summary.ride_seekers.total_needed += u64::from(record.seats_needed());
            }
            Role::Traveller => summary.other_travellers += 1,
        }
    }

    summary
}
