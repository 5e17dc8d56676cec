//! Snapshot query filters.

use chrono::NaiveDate;

use crate::domain::{TransportMode, TravellerRecord};

/// Narrows the traveller snapshot before any computation runs.
///
/// All criteria are optional; an empty filter selects every record. The
/// filter doubles as the snapshot cache key, so the district is stored in
/// a normalised (trimmed, lowercase) form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TravellerFilter {
    district: Option<String>,
    date: Option<NaiveDate>,
    mode: Option<TransportMode>,
}

impl TravellerFilter {
    /// Filter that selects every record.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_district(mut self, district: impl AsRef<str>) -> Self {
        let district = district.as_ref().trim().to_lowercase();
        self.district = (!district.is_empty()).then_some(district);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_mode(mut self, mode: TransportMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn district(&self) -> Option<&str> {
        self.district.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn mode(&self) -> Option<TransportMode> {
        self.mode
    }

    /// Whether `record` satisfies every criterion.
    pub fn matches(&self, record: &TravellerRecord) -> bool {
        let district_ok = self.district.as_deref().is_none_or(|wanted| {
            record
                .district
                .as_deref()
                .is_some_and(|d| d.trim().eq_ignore_ascii_case(wanted))
        });

        let date_ok = self.date.is_none_or(|d| record.travel_date == Some(d));
        let mode_ok = self.mode.is_none_or(|m| record.mode_of_transport == m);

        district_ok && date_ok && mode_ok
    }

    /// Query parameters understood by the registration API.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(district) = &self.district {
            pairs.push(("district", district.clone()));
        }
        if let Some(date) = self.date {
            pairs.push(("travelDate", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(mode) = self.mode {
            pairs.push(("modeOfTransport", mode.as_str().to_string()));
        }
        pairs
    }
}
