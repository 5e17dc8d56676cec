//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{TransportMode, TravellerRecord};
use crate::matching::{CompatibilityResult, MatchOptions, ProximityGroup};
use crate::store::{TravellerFilter, parse_travel_date};

/// Snapshot filter shared by the dashboard endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterQuery {
    pub district: Option<String>,

    /// Travel date, `YYYY-MM-DD`
    pub date: Option<String>,

    /// Mode of transport, e.g. `car` or `two-wheeler`
    pub mode: Option<String>,
}

impl FilterQuery {
    /// Validate into a store filter.
    pub fn to_filter(&self) -> Result<TravellerFilter, String> {
        build_filter(
            self.district.as_deref(),
            self.date.as_deref(),
            self.mode.as_deref(),
        )
    }
}

/// Query for the grouping and export endpoints.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupsQuery {
    pub district: Option<String>,
    pub date: Option<String>,
    pub mode: Option<String>,

    /// Smallest group to report (server default if absent)
    pub min_group_size: Option<usize>,
}

impl GroupsQuery {
    /// Validate into a store filter.
    pub fn to_filter(&self) -> Result<TravellerFilter, String> {
        build_filter(
            self.district.as_deref(),
            self.date.as_deref(),
            self.mode.as_deref(),
        )
    }
}

/// Query for the matches endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchQuery {
    pub max_distance_km: Option<f64>,
    pub same_date_only: Option<bool>,
    pub mode: Option<String>,
}

impl MatchQuery {
    /// Convert to matcher options.
    ///
    /// Only the mode string is checked here; range checks belong to the
    /// matcher.
    pub fn to_options(&self) -> Result<MatchOptions, String> {
        Ok(MatchOptions {
            max_distance_km: self.max_distance_km,
            same_date_only: self.same_date_only.unwrap_or(false),
            mode: parse_mode(self.mode.as_deref())?,
        })
    }
}

/// Query for the contact endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactQuery {
    pub seeker_id: String,
}

/// Response for the groups endpoint.
#[derive(Debug, Serialize)]
pub struct GroupsResponse {
    pub groups: Vec<ProximityGroup>,
}

/// Response for the matches endpoint.
#[derive(Debug, Serialize)]
pub struct MatchesResponse {
    pub seeker: TravellerRecord,
    pub matches: Vec<CompatibilityResult>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

fn build_filter(
    district: Option<&str>,
    date: Option<&str>,
    mode: Option<&str>,
) -> Result<TravellerFilter, String> {
    let mut filter = TravellerFilter::all();

    if let Some(district) = district {
        filter = filter.with_district(district);
    }

    if let Some(date) = date.filter(|d| !d.trim().is_empty()) {
        let parsed = parse_travel_date(date).ok_or_else(|| format!("Invalid date: {date}"))?;
        filter = filter.with_date(parsed);
    }

    if let Some(mode) = parse_mode(mode)? {
        filter = filter.with_mode(mode);
    }

    Ok(filter)
}

fn parse_mode(mode: Option<&str>) -> Result<Option<TransportMode>, String> {
    mode.filter(|m| !m.trim().is_empty())
        .map(|m| m.parse::<TransportMode>().map_err(|e| e.to_string()))
        .transpose()
}
