//! Record builders and proptest strategies shared by the matching tests.

use chrono::NaiveDate;
use proptest::prelude::*;

use crate::domain::{TransportMode, TravellerRecord};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn republic_day() -> NaiveDate {
    date(2026, 1, 26)
}

pub fn provider(id: &str, postal_code: &str, capacity: u32) -> TravellerRecord {
    let mut r = TravellerRecord::new(id, format!("Driver {id}"), TransportMode::Car);
    r.postal_code = postal_code.to_string();
    r.vehicle_capacity = capacity;
    r.travel_date = Some(republic_day());
    r
}

pub fn seeker(id: &str, postal_code: &str, group_size: u32) -> TravellerRecord {
    let mut r = TravellerRecord::new(id, format!("Rider {id}"), TransportMode::LookingForTransport);
    r.postal_code = postal_code.to_string();
    r.group_size = group_size;
    r.travel_date = Some(republic_day());
    r
}

pub fn traveller(id: &str, postal_code: &str, mode: TransportMode) -> TravellerRecord {
    let mut r = TravellerRecord::new(id, format!("Guest {id}"), mode);
    r.postal_code = postal_code.to_string();
    r
}

fn mode_strategy() -> impl Strategy<Value = TransportMode> {
    prop::sample::select(TransportMode::ALL.to_vec())
}

fn postal_code_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "682011", "682024", "686001", "686560", "680001", "", "n/a", "68",
    ])
    .prop_map(str::to_string)
}

fn location_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Kochi", "kochi", "Kottayam", "Thrissur", ""])
        .prop_map(str::to_string)
}

/// Strategy for a snapshot of records with unique ids.
///
/// Modes are drawn uniformly, so providers, seekers and plain travellers
/// all show up; dates cluster around Republic Day so same-date matching
/// has something to find.
pub fn snapshot_strategy() -> impl Strategy<Value = Vec<TravellerRecord>> {
    let record = (
        mode_strategy(),
        0u32..7,
        0u32..5,
        postal_code_strategy(),
        location_strategy(),
        prop::option::of(0i64..3),
        any::<bool>(),
    );

    prop::collection::vec(record, 0..40).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (mode, capacity, group, pin, location, day, parking))| {
                let mut r = TravellerRecord::new(format!("r{i:02}"), format!("Person {i}"), mode);
                r.vehicle_capacity = capacity;
                r.group_size = group.max(1);
                r.postal_code = pin;
                r.starting_location = location;
                r.travel_date = day.map(|d| republic_day() + chrono::Duration::days(d));
                r.need_parking = parking;
                r
            })
            .collect()
    })
}
