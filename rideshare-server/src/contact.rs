//! Contact handoff between a ride seeker and a provider.
//!
//! Builds the message a seeker sends to a driver and a WhatsApp deep link
//! that opens a chat with the message pre-filled. Nothing here is sent;
//! the client decides what to do with the link.

use reqwest::Url;
use serde::Serialize;

use crate::domain::TravellerRecord;

/// Base URL for WhatsApp click-to-chat links.
const WHATSAPP_BASE_URL: &str = "https://wa.me";

/// Country code added to bare 10-digit mobile numbers.
const DEFAULT_COUNTRY_CODE: &str = "91";

/// Everything a client needs to put a seeker in touch with a provider.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactHandoff {
    pub message: String,
    pub whatsapp_link: Option<String>,
    /// The provider's preferred number as registered.
    pub phone: Option<String>,
}

impl ContactHandoff {
    /// Prepare the handoff from `seeker` to `provider`.
    pub fn new(seeker: &TravellerRecord, provider: &TravellerRecord) -> Self {
        let message = outreach_message(seeker, provider);
        let phone = provider.messaging_number().map(str::to_string);
        let whatsapp_link = phone.as_deref().and_then(|n| whatsapp_link(n, &message));

        Self {
            message,
            whatsapp_link,
            phone,
        }
    }
}

/// Render the message a seeker sends to a provider.
pub fn outreach_message(seeker: &TravellerRecord, provider: &TravellerRecord) -> String {
    let mut message = format!("Hi {}, this is {}", provider.name.trim(), seeker.name.trim());
    if !seeker.school.trim().is_empty() {
        message.push_str(&format!(" from {}", seeker.school.trim()));
    }
    message.push_str(". ");

    let people = match seeker.seats_needed() {
        1 => "1 person".to_string(),
        n => format!("{n} people"),
    };
    message.push_str(&format!("I'm looking for a ride for {people}"));

    if !seeker.starting_location.trim().is_empty() {
        message.push_str(&format!(" from {}", seeker.starting_location.trim()));
    }
    if let Some(date) = seeker.travel_date {
        message.push_str(&format!(" on {}", date.format("%d %b %Y")));
    }
    message.push_str(". Would you have space in your vehicle?");

    message
}

/// Reduce a phone number to the digits WhatsApp expects.
///
/// Bare 10-digit numbers get the Indian country code, and a trunk `0`
/// before a 10-digit number is replaced by it. Returns `None` if no digits
/// remain.
pub fn normalize_phone(number: &str) -> Option<String> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        0 => None,
        10 => Some(format!("{DEFAULT_COUNTRY_CODE}{digits}")),
        11 if digits.starts_with('0') => Some(format!("{DEFAULT_COUNTRY_CODE}{}", &digits[1..])),
        _ => Some(digits),
    }
}

/// Build a `https://wa.me/<digits>?text=<message>` link.
///
/// # Example
///
/// ```
/// use rideshare_server::contact::whatsapp_link;
///
/// let link = whatsapp_link("98765 43210", "Hi there").unwrap();
/// assert_eq!(link, "https://wa.me/919876543210?text=Hi+there");
///
/// assert!(whatsapp_link("", "Hi").is_none());
/// ```
pub fn whatsapp_link(number: &str, message: &str) -> Option<String> {
    let digits = normalize_phone(number)?;
    let url = Url::parse_with_params(
        &format!("{WHATSAPP_BASE_URL}/{digits}"),
        &[("text", message)],
    )
    .ok()?;
    Some(url.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransportMode;
    use chrono::NaiveDate;

    fn seeker() -> TravellerRecord {
        let mut r = TravellerRecord::new("s1", "Meera", TransportMode::LookingForTransport);
        r.school = "St. Teresa's".into();
        r.starting_location = "Aluva".into();
        r.group_size = 3;
        r.travel_date = NaiveDate::from_ymd_opt(2026, 1, 26);
        r
    }

    fn provider() -> TravellerRecord {
        let mut r = TravellerRecord::new("p1", "Rahul", TransportMode::Car);
        r.vehicle_capacity = 4;
        r.contact_number = "0484 2345678".into();
        r
    }

    #[test]
    fn message_names_everyone() {
        let msg = outreach_message(&seeker(), &provider());
        assert_eq!(
            msg,
            "Hi Rahul, this is Meera from St. Teresa's. I'm looking for a ride for 3 people \
             from Aluva on 26 Jan 2026. Would you have space in your vehicle?"
        );
    }

    #[test]
    fn message_skips_missing_details() {
        let mut s = TravellerRecord::new("s2", "Arun", TransportMode::LookingForTransport);
        s.group_size = 1;
        let msg = outreach_message(&s, &provider());
        assert_eq!(
            msg,
            "Hi Rahul, this is Arun. I'm looking for a ride for 1 person. \
             Would you have space in your vehicle?"
        );
    }

    #[test]
    fn phone_normalisation() {
        assert_eq!(normalize_phone("98765 43210").as_deref(), Some("919876543210"));
        assert_eq!(normalize_phone("+91 98765-43210").as_deref(), Some("919876543210"));
        assert_eq!(normalize_phone("09876543210").as_deref(), Some("919876543210"));
        assert_eq!(normalize_phone("+44 7700 900123").as_deref(), Some("447700900123"));
        assert_eq!(normalize_phone(""), None);
        assert_eq!(normalize_phone("n/a"), None);
    }

    #[test]
    fn link_encodes_message() {
        let link = whatsapp_link("9876543210", "Ride on 26/01? 3 people & bags").unwrap();
        assert_eq!(
            link,
            "https://wa.me/919876543210?text=Ride+on+26%2F01%3F+3+people+%26+bags"
        );
    }

    #[test]
    fn handoff_prefers_whatsapp_number() {
        let mut p = provider();
        p.whatsapp_number = Some("9876543210".into());

        let handoff = ContactHandoff::new(&seeker(), &p);
        assert_eq!(handoff.phone.as_deref(), Some("9876543210"));
        assert!(
            handoff
                .whatsapp_link
                .as_deref()
                .is_some_and(|l| l.starts_with("https://wa.me/919876543210?text=Hi+Rahul"))
        );
    }

    #[test]
    fn handoff_falls_back_to_contact_number() {
        let handoff = ContactHandoff::new(&seeker(), &provider());
        assert_eq!(handoff.phone.as_deref(), Some("0484 2345678"));
        assert!(
            handoff
                .whatsapp_link
                .as_deref()
                .is_some_and(|l| l.starts_with("https://wa.me/914842345678?"))
        );
    }

    #[test]
    fn handoff_without_numbers_has_no_link() {
        let mut p = provider();
        p.contact_number.clear();

        let handoff = ContactHandoff::new(&seeker(), &p);
        assert_eq!(handoff.phone, None);
        assert_eq!(handoff.whatsapp_link, None);
        assert!(!handoff.message.is_empty());
    }
}
