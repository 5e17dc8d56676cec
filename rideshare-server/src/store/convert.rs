//! Conversion from registration DTOs to domain records.
//!
//! Loose typing is resolved once here so that the matching code only ever
//! sees validated `TravellerRecord`s.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{DomainError, GeoPoint, TransportMode, TravellerRecord};

use super::types::{LooseDate, LooseNumber, LooseString, RawTravellerRecord, RecordsPayload};

/// Date formats accepted for `travelDate`, tried in order.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Decode and convert every element of a payload.
///
/// Elements that do not fit the registration shape are logged and skipped,
/// the same as records that fail normalisation.
pub fn convert_payload(payload: RecordsPayload) -> Vec<TravellerRecord> {
    let values = payload.into_values();
    let mut raws = Vec::with_capacity(values.len());

    for (index, value) in values.into_iter().enumerate() {
        let label = record_label(index, &value);
        match serde_json::from_value::<RawTravellerRecord>(value) {
            Ok(raw) => raws.push(raw),
            Err(e) => warn!("skipping traveller record {label}: {e}"),
        }
    }

    convert_records(raws)
}

/// `#index` plus the record id when one can be read.
fn record_label(index: usize, value: &Value) -> String {
    let id = value
        .get("_id")
        .or_else(|| value.get("id"))
        .and_then(|id| match id {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            other => other.get("$oid").and_then(Value::as_str).map(str::to_string),
        });

    match id {
        Some(id) => format!("#{index} ({id})"),
        None => format!("#{index}"),
    }
}

/// Convert a batch of raw records, skipping the ones that cannot be
/// normalised.
pub fn convert_records(raws: Vec<RawTravellerRecord>) -> Vec<TravellerRecord> {
    let mut records = Vec::with_capacity(raws.len());

    for raw in raws {
        match convert_record(raw) {
            Ok(record) => records.push(record),
            Err(e) => warn!("skipping traveller record: {e}"),
        }
    }

    records
}

/// Convert a single raw record.
pub fn convert_record(raw: RawTravellerRecord) -> Result<TravellerRecord, DomainError> {
    let id = raw
        .id
        .map(LooseString::into_string)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or(DomainError::MissingId)?;

    let mode = raw
        .mode_of_transport
        .as_deref()
        .map(TransportMode::parse_lenient)
        .unwrap_or(TransportMode::Other);

    let vehicle_capacity = match raw.vehicle_capacity {
        Some(n) => parse_count(&id, "vehicleCapacity", n)?,
        None => 0,
    };

    let group_size = match raw.group_size {
        Some(n) => parse_count(&id, "groupSize", n)?.max(1),
        None => 1,
    };

    let travel_date = raw.travel_date.as_ref().and_then(|date| {
        let parsed = resolve_travel_date(date);
        if parsed.is_none() {
            debug!("record {id}: ignoring unparseable travel date {date:?}");
        }
        parsed
    });

    let coordinates = match (raw.latitude, raw.longitude) {
        (Some(lat), Some(lon)) => GeoPoint::new(lat, lon),
        _ => None,
    };

    Ok(TravellerRecord {
        name: trimmed(raw.name),
        school: trimmed(raw.school),
        contact_number: raw
            .contact_number
            .map(LooseString::into_string)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        whatsapp_number: raw
            .whatsapp_number
            .map(LooseString::into_string)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        district: raw
            .district
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        mode_of_transport: mode,
        starting_location: trimmed(raw.starting_location),
        postal_code: raw
            .postal_code
            .map(LooseString::into_string)
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        travel_date,
        travel_time: raw
            .travel_time
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty()),
        vehicle_capacity,
        group_size,
        need_parking: raw.need_parking.is_some_and(|b| b.as_bool()),
        coordinates,
        id,
    })
}

/// Parse a travel date in any of the accepted formats.
///
/// RFC 3339 timestamps (as produced by `Date.toISOString()`) contribute
/// their date part.
pub fn parse_travel_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    // "2026-01-26T00:00:00" without an offset
    let date_part = s.split('T').next().unwrap_or(s);

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

/// Resolve a stored travel date, including mongoexport `$date` values.
///
/// Epoch milliseconds are read as UTC.
pub fn resolve_travel_date(date: &LooseDate) -> Option<NaiveDate> {
    match date {
        LooseDate::Text(s) => parse_travel_date(s),
        LooseDate::Millis(ms) => millis_to_date(*ms),
        LooseDate::NumberLong { millis } => millis.trim().parse().ok().and_then(millis_to_date),
        LooseDate::Extended { date } => resolve_travel_date(date),
    }
}

fn millis_to_date(ms: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(ms).map(|dt| dt.date_naive())
}

fn parse_count(id: &str, field: &'static str, value: LooseNumber) -> Result<u32, DomainError> {
    let not_a_number = |value: String| DomainError::NotANumber {
        id: id.to_string(),
        field,
        value,
    };

    let n: i64 = match value {
        LooseNumber::Int(n) => n,
        LooseNumber::Float(f) if f.is_finite() && f.fract() == 0.0 => f as i64,
        LooseNumber::Float(f) => return Err(not_a_number(f.to_string())),
        LooseNumber::Text(s) if s.trim().is_empty() => 0,
        LooseNumber::Text(s) => s.trim().parse().map_err(|_| not_a_number(s.clone()))?,
    };

    if n < 0 {
        return Err(DomainError::Negative {
            id: id.to_string(),
            field,
            value: n,
        });
    }

    u32::try_from(n).map_err(|_| not_a_number(n.to_string()))
}

fn trimmed(s: Option<String>) -> String {
    s.map(|s| s.trim().to_string()).unwrap_or_default()
}
