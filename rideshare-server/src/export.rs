//! CSV export of proximity groups for organisers.

use serde::Serialize;

use crate::domain::{Role, TransportMode};
use crate::matching::ProximityGroup;

/// Errors from writing a CSV export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Row could not be serialised
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Buffered output could not be flushed
    #[error("failed to flush CSV output: {0}")]
    Flush(String),

    /// Output was not valid UTF-8
    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// One proximity group as a flat row.
#[derive(Debug, Serialize)]
struct GroupRow<'a> {
    pincode_base: &'a str,
    area_name: &'a str,
    members: usize,
    vehicle_providers: usize,
    ride_seekers: usize,
    total_capacity: u64,
    seeker_demand: u64,
    can_self_sustain: bool,
    shortfall: u64,
}

/// One group member as a flat row.
#[derive(Debug, Serialize)]
struct MemberRow<'a> {
    pincode_base: &'a str,
    area_name: &'a str,
    id: &'a str,
    name: &'a str,
    school: &'a str,
    role: Role,
    mode_of_transport: TransportMode,
    starting_location: &'a str,
    postal_code: &'a str,
    travel_date: Option<String>,
    travel_time: Option<&'a str>,
    vehicle_capacity: u32,
    group_size: u32,
    need_parking: bool,
    contact_number: &'a str,
}

/// One row per group, in the order given.
pub fn groups_csv(groups: &[ProximityGroup]) -> Result<String, ExportError> {
    write_rows(groups.iter().map(|g| GroupRow {
        pincode_base: g.pincode_base.as_str(),
        area_name: &g.area_name,
        members: g.members.len(),
        vehicle_providers: g.vehicle_providers,
        ride_seekers: g.ride_seekers,
        total_capacity: g.total_capacity,
        seeker_demand: g.seeker_demand,
        can_self_sustain: g.can_self_sustain,
        shortfall: g.shortfall(),
    }))
}

/// One row per member, grouped as given.
pub fn members_csv(groups: &[ProximityGroup]) -> Result<String, ExportError> {
    write_rows(groups.iter().flat_map(|g| {
        g.members.iter().map(move |m| MemberRow {
            pincode_base: g.pincode_base.as_str(),
            area_name: &g.area_name,
            id: &m.id,
            name: &m.name,
            school: &m.school,
            role: m.role(),
            mode_of_transport: m.mode_of_transport,
            starting_location: &m.starting_location,
            postal_code: &m.postal_code,
            travel_date: m.travel_date.map(|d| d.format("%Y-%m-%d").to_string()),
            travel_time: m.travel_time.as_deref(),
            vehicle_capacity: m.vehicle_capacity,
            group_size: m.group_size,
            need_parking: m.need_parking,
            contact_number: m.messaging_number().unwrap_or_default(),
        })
    }))
}

fn write_rows<T: Serialize>(rows: impl IntoIterator<Item = T>) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
