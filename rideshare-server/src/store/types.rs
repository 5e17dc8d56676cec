//! Registration payload DTOs.
//!
//! These types map directly to the registration collection's JSON. The
//! registration form stores whatever the browser sent, so numbers arrive
//! as strings, phone numbers as numbers, and Mongo documents carry `_id`
//! either as a string or as `{"$oid": "..."}`. Everything is optional
//! here; `convert` decides what is required.

use serde::Deserialize;
use serde_json::Value;

/// A string-ish field that may have been stored as a number or ObjectId.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseString {
    Text(String),
    Int(i64),
    Oid {
        #[serde(rename = "$oid")]
        oid: String,
    },
}

impl LooseString {
    pub fn into_string(self) -> String {
        match self {
            LooseString::Text(s) => s,
            LooseString::Int(n) => n.to_string(),
            LooseString::Oid { oid } => oid,
        }
    }
}

/// A numeric field that may have been stored as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

/// A boolean field that may have been stored as "yes"/"true"/1.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseBool {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl LooseBool {
    pub fn as_bool(&self) -> bool {
        match self {
            LooseBool::Bool(b) => *b,
            LooseBool::Int(n) => *n != 0,
            LooseBool::Text(s) => matches!(
                s.trim().to_lowercase().as_str(),
                "true" | "yes" | "y" | "1" | "on"
            ),
        }
    }
}

/// A date that may be a plain string or a mongoexport `Date`.
///
/// Extended JSON writes dates as `{"$date": "2026-01-26T00:00:00Z"}`, or in
/// canonical mode as `{"$date": {"$numberLong": "1769385600000"}}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseDate {
    Text(String),
    /// Milliseconds since the Unix epoch
    Millis(i64),
    NumberLong {
        #[serde(rename = "$numberLong")]
        millis: String,
    },
    Extended {
        #[serde(rename = "$date")]
        date: Box<LooseDate>,
    },
}

/// One transportation registration as stored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTravellerRecord {
    #[serde(alias = "_id")]
    pub id: Option<LooseString>,

    pub name: Option<String>,

    pub school: Option<String>,

    pub contact_number: Option<LooseString>,

    pub whatsapp_number: Option<LooseString>,

    pub district: Option<String>,

    pub mode_of_transport: Option<String>,

    pub starting_location: Option<String>,

    #[serde(alias = "pincode", alias = "pinCode")]
    pub postal_code: Option<LooseString>,

    /// Usually `YYYY-MM-DD` or an ISO timestamp.
    pub travel_date: Option<LooseDate>,

    pub travel_time: Option<String>,

    pub vehicle_capacity: Option<LooseNumber>,

    #[serde(alias = "numberOfPeople")]
    pub group_size: Option<LooseNumber>,

    pub need_parking: Option<LooseBool>,

    pub latitude: Option<f64>,

    pub longitude: Option<f64>,
}

/// Either a bare array of records or the API's `{ "data": [...] }` envelope.
///
/// Elements stay as untyped JSON so one malformed registration can be
/// skipped without losing the rest of the payload.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RecordsPayload {
    List(Vec<Value>),
    Envelope { data: Vec<Value> },
}

impl RecordsPayload {
    pub fn into_values(self) -> Vec<Value> {
        match self {
            RecordsPayload::List(values) => values,
            RecordsPayload::Envelope { data } => data,
        }
    }
}
