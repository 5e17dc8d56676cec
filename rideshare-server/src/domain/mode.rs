//! Mode of transport.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a mode string does not name a known mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown mode of transport: {0}")]
pub struct InvalidMode(pub String);

/// How a participant is travelling to the event.
///
/// Ordering follows declaration order, which is also the order used in the
/// dashboard's mode breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportMode {
    Car,
    Bus,
    Train,
    Flight,
    TwoWheeler,
    Boat,
    LookingForTransport,
    Other,
}

impl TransportMode {
    /// Every mode, in breakdown order.
    pub const ALL: [TransportMode; 8] = [
        TransportMode::Car,
        TransportMode::Bus,
        TransportMode::Train,
        TransportMode::Flight,
        TransportMode::TwoWheeler,
        TransportMode::Boat,
        TransportMode::LookingForTransport,
        TransportMode::Other,
    ];

    /// Canonical wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Car => "car",
            TransportMode::Bus => "bus",
            TransportMode::Train => "train",
            TransportMode::Flight => "flight",
            TransportMode::TwoWheeler => "two-wheeler",
            TransportMode::Boat => "boat",
            TransportMode::LookingForTransport => "looking-for-transport",
            TransportMode::Other => "other",
        }
    }

    /// Whether a traveller using this mode drives a vehicle that can carry
    /// other participants.
    pub fn is_private_vehicle(&self) -> bool {
        matches!(
            self,
            TransportMode::Car | TransportMode::Bus | TransportMode::TwoWheeler
        )
    }

    /// Parse a mode from free-form registration input.
    ///
    /// Matching is case-insensitive and tolerates spaces, underscores and a
    /// few common aliases. Anything unrecognised becomes `Other`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(TransportMode::Other)
    }
}

impl FromStr for TransportMode {
    type Err = InvalidMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '_' { '-' } else { c })
            .collect();

        let mode = match normalized.as_str() {
            "car" | "own-car" => TransportMode::Car,
            "bus" => TransportMode::Bus,
            "train" => TransportMode::Train,
            "flight" | "plane" => TransportMode::Flight,
            "two-wheeler" | "twowheeler" | "bike" | "motorcycle" | "scooter" => {
                TransportMode::TwoWheeler
            }
            "boat" => TransportMode::Boat,
            "looking-for-transport" | "need-transport" | "need-a-ride" => {
                TransportMode::LookingForTransport
            }
            "other" => TransportMode::Other,
            _ => return Err(InvalidMode(s.to_string())),
        };

        Ok(mode)
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
