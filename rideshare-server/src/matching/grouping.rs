//! Proximity grouping of travellers by postal-code prefix.
//!
//! Organisers use the groups to see which localities can fill their own
//! ride requests and which need drivers from elsewhere.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::{BucketKey, Role, TravellerRecord};

/// Label used when no member gave a starting location.
pub const UNKNOWN_AREA: &str = "Unknown area";

/// Travellers sharing a locality key, with their supply and demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProximityGroup {
    pub pincode_base: BucketKey,
    pub area_name: String,
    pub members: Vec<TravellerRecord>,
    pub vehicle_providers: usize,
    pub ride_seekers: usize,
    /// Seats offered by provider members.
    pub total_capacity: u64,
    /// Seats requested by seeker members.
    pub seeker_demand: u64,
    pub can_self_sustain: bool,
}

impl ProximityGroup {
    fn from_members(key: BucketKey, members: Vec<TravellerRecord>) -> Self {
        let mut vehicle_providers = 0;
        let mut ride_seekers = 0;
        let mut total_capacity = 0u64;
        let mut seeker_demand = 0u64;

        for member in &members {
            match member.role() {
                Role::Provider => {
                    vehicle_providers += 1;
                    total_capacity += u64::from(member.offered_seats());
                }
                Role::Seeker => {
                    ride_seekers += 1;
                    seeker_demand += u64::from(member.seats_needed());
                }
                Role::Traveller => {}
            }
        }

        Self {
            area_name: area_name(&members),
            pincode_base: key,
            members,
            vehicle_providers,
            ride_seekers,
            total_capacity,
            seeker_demand,
            can_self_sustain: total_capacity >= seeker_demand,
        }
    }

    /// Seats still needed after local drivers are used up.
    pub fn shortfall(&self) -> u64 {
        self.seeker_demand.saturating_sub(self.total_capacity)
    }
}

/// Partition `records` into proximity groups.
///
/// Records are bucketed by the first `prefix_len` digits of their postal
/// code; malformed codes share the `unknown` bucket. Groups with fewer than
/// `min_group_size` members are dropped. The result is sorted by member
/// count descending, then by key ascending, and members keep input order.
pub fn group_by_proximity(
    records: &[TravellerRecord],
    min_group_size: usize,
    prefix_len: usize,
) -> Vec<ProximityGroup> {
    let mut buckets: BTreeMap<BucketKey, Vec<TravellerRecord>> = BTreeMap::new();
    for record in records {
        buckets
            .entry(record.bucket_key(prefix_len))
            .or_default()
            .push(record.clone());
    }

    let min_members = min_group_size.max(1);

    let mut groups: Vec<ProximityGroup> = buckets
        .into_iter()
        .filter(|(_, members)| members.len() >= min_members)
        .map(|(key, members)| ProximityGroup::from_members(key, members))
        .collect();

    groups.sort_by(|a, b| {
        b.members
            .len()
            .cmp(&a.members.len())
            .then_with(|| a.pincode_base.cmp(&b.pincode_base))
    });

    groups
}

/// Most common starting location among members.
///
/// Comparison ignores case; ties go to the alphabetically first location.
/// The displayed spelling is the first one seen.
fn area_name(members: &[TravellerRecord]) -> String {
    let mut counts: BTreeMap<String, (usize, &str)> = BTreeMap::new();
    for member in members {
        let location = member.starting_location.trim();
        if location.is_empty() {
            continue;
        }
        counts
            .entry(location.to_lowercase())
            .or_insert((0, location))
            .0 += 1;
    }

    let mut best: Option<(usize, &str)> = None;
    for (count, display) in counts.into_values() {
        if best.is_none_or(|(best_count, _)| count > best_count) {
            best = Some((count, display));
        }
    }

    best.map(|(_, display)| display.to_string())
        .unwrap_or_else(|| UNKNOWN_AREA.to_string())
}
