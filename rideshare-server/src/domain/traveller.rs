//! Traveller records and their derived ride-sharing role.

use chrono::NaiveDate;
use serde::Serialize;

use super::geo::GeoPoint;
use super::mode::TransportMode;
use super::pincode::BucketKey;

/// What part a traveller can play in ride matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    /// Drives a private vehicle with spare seats.
    Provider,
    /// Needs a ride for themselves and possibly a group.
    Seeker,
    /// Travels some other way; not matchable.
    Traveller,
}

/// One participant's transportation preference, as registered.
///
/// Records are normalised at the store boundary and never mutated by the
/// matching code. The role is derived from mode and capacity, so a record
/// cannot be both a provider and a seeker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravellerRecord {
    pub id: String,
    pub name: String,
    pub school: String,
    pub contact_number: String,
    pub whatsapp_number: Option<String>,
    pub district: Option<String>,
    pub mode_of_transport: TransportMode,
    pub starting_location: String,
    pub postal_code: String,
    pub travel_date: Option<NaiveDate>,
    pub travel_time: Option<String>,
    /// Seats available beyond the driver.
    pub vehicle_capacity: u32,
    /// People the seeker needs seats for, at least 1.
    pub group_size: u32,
    pub need_parking: bool,
    pub coordinates: Option<GeoPoint>,
}

impl TravellerRecord {
    /// Create a record with empty contact details and default sizes.
    pub fn new(id: impl Into<String>, name: impl Into<String>, mode: TransportMode) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            school: String::new(),
            contact_number: String::new(),
            whatsapp_number: None,
            district: None,
            mode_of_transport: mode,
            starting_location: String::new(),
            postal_code: String::new(),
            travel_date: None,
            travel_time: None,
            vehicle_capacity: 0,
            group_size: 1,
            need_parking: false,
            coordinates: None,
        }
    }

    pub fn role(&self) -> Role {
        if self.mode_of_transport == TransportMode::LookingForTransport {
            Role::Seeker
        } else if self.mode_of_transport.is_private_vehicle() && self.vehicle_capacity > 0 {
            Role::Provider
        } else {
            Role::Traveller
        }
    }

    pub fn is_provider(&self) -> bool {
        self.role() == Role::Provider
    }

    pub fn is_seeker(&self) -> bool {
        self.role() == Role::Seeker
    }

    /// Seats offered, zero unless the record is a provider.
    pub fn offered_seats(&self) -> u32 {
        if self.is_provider() {
            self.vehicle_capacity
        } else {
            0
        }
    }

    /// Seats requested, zero unless the record is a seeker.
    pub fn seats_needed(&self) -> u32 {
        if self.is_seeker() {
            self.group_size.max(1)
        } else {
            0
        }
    }

    /// The proximity bucket this record belongs to.
    pub fn bucket_key(&self, prefix_len: usize) -> BucketKey {
        BucketKey::from_postal_code(&self.postal_code, prefix_len)
    }

    /// Preferred number for messaging: WhatsApp if given, else the contact
    /// number.
    pub fn messaging_number(&self) -> Option<&str> {
        self.whatsapp_number
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(Some(self.contact_number.as_str()).filter(|n| !n.trim().is_empty()))
    }
}
