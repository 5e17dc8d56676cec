//! Compatibility scoring between one ride seeker and vehicle providers.
//!
//! Providers first pass hard eligibility checks (seats, date, mode, radius)
//! and are then ranked by a 0–100 score made of three weighted terms:
//! closeness, date agreement and how snugly the seeker's group fills the
//! spare seats.

use serde::Serialize;

use crate::domain::{TransportMode, TravellerRecord};

use super::config::MatchConfig;
use super::error::MatchError;

/// Weight of the distance term. Dominates the score.
const DISTANCE_WEIGHT: f64 = 70.0;

/// Weight of the date term.
const DATE_WEIGHT: f64 = 20.0;

/// Weight of the capacity-fit term. Only a tie-breaker.
const CAPACITY_WEIGHT: f64 = 10.0;

/// Per-request matching options.
#[derive(Debug, Clone, Default)]
pub struct MatchOptions {
    /// Radius in km; the configured default when `None`.
    pub max_distance_km: Option<f64>,

    /// Only consider providers travelling on the seeker's date.
    pub same_date_only: bool,

    /// Only consider providers using this mode.
    pub mode: Option<TransportMode>,
}

impl MatchOptions {
    /// Check the options and resolve the radius against `config`.
    pub fn validate(&self, config: &MatchConfig) -> Result<f64, MatchError> {
        let max_distance_km = self.max_distance_km.unwrap_or(config.max_distance_km);

        if !max_distance_km.is_finite() {
            return Err(MatchError::InvalidInput(
                "maxDistanceKm must be a finite number".to_string(),
            ));
        }

        if max_distance_km < 0.0 {
            return Err(MatchError::InvalidInput(format!(
                "maxDistanceKm must not be negative (got {max_distance_km})"
            )));
        }

        if let Some(mode) = self.mode {
            if !mode.is_private_vehicle() {
                return Err(MatchError::InvalidInput(format!(
                    "{mode} is not a mode that can offer rides"
                )));
            }
        }

        Ok(max_distance_km)
    }
}

/// One provider that fits a seeker's request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatibilityResult {
    pub provider: TravellerRecord,
    pub distance_km: f64,
    pub compatibility_score: f64,
}

/// Ranks vehicle providers for ride seekers within one snapshot.
pub struct Matcher<'a> {
    records: &'a [TravellerRecord],
    config: &'a MatchConfig,
}

impl<'a> Matcher<'a> {
    /// Create a matcher over a snapshot.
    pub fn new(records: &'a [TravellerRecord], config: &'a MatchConfig) -> Self {
        Self { records, config }
    }

    /// Resolve a seeker id.
    ///
    /// Fails with `NotFound` if no record has the id or the record is not a
    /// ride seeker.
    pub fn seeker(&self, seeker_id: &str) -> Result<&'a TravellerRecord, MatchError> {
        self.records
            .iter()
            .find(|r| r.id == seeker_id)
            .filter(|r| r.is_seeker())
            .ok_or_else(|| MatchError::NotFound {
                id: seeker_id.to_string(),
            })
    }

    /// Rank the providers that can take `seeker_id`'s group.
    ///
    /// Results are ordered by score descending, then distance ascending,
    /// then provider id. No eligible provider gives an empty list.
    pub fn find_matches(
        &self,
        seeker_id: &str,
        options: &MatchOptions,
    ) -> Result<Vec<CompatibilityResult>, MatchError> {
        let max_distance_km = options.validate(self.config)?;
        let seeker = self.seeker(seeker_id)?;
        let needed = seeker.seats_needed();

        let mut results: Vec<CompatibilityResult> = self
            .records
            .iter()
            .filter(|p| p.is_provider() && p.id != seeker.id)
            .filter(|p| p.vehicle_capacity >= needed)
            .filter(|p| !options.same_date_only || same_date(seeker, p))
            .filter(|p| options.mode.is_none_or(|m| p.mode_of_transport == m))
            .filter_map(|p| {
                let distance_km = estimate_distance_km(seeker, p, self.config);
                if distance_km > max_distance_km {
                    return None;
                }

                let compatibility_score = compatibility_score(
                    distance_km,
                    max_distance_km,
                    date_gap_days(seeker, p),
                    p.vehicle_capacity - needed,
                );

                Some(CompatibilityResult {
                    provider: p.clone(),
                    distance_km,
                    compatibility_score,
                })
            })
            .collect();

        rank_matches(&mut results);
        results.truncate(self.config.max_results);

        Ok(results)
    }
}

/// Rank providers in `records` for one seeker.
///
/// Shorthand for [`Matcher::find_matches`].
pub fn find_matches(
    records: &[TravellerRecord],
    seeker_id: &str,
    options: &MatchOptions,
    config: &MatchConfig,
) -> Result<Vec<CompatibilityResult>, MatchError> {
    Matcher::new(records, config).find_matches(seeker_id, options)
}

/// Sort best-first: score descending, distance ascending, provider id.
pub fn rank_matches(results: &mut [CompatibilityResult]) {
    results.sort_by(|a, b| {
        b.compatibility_score
            .total_cmp(&a.compatibility_score)
            .then_with(|| a.distance_km.total_cmp(&b.distance_km))
            .then_with(|| a.provider.id.cmp(&b.provider.id))
    });
}

/// Estimated travel distance between two starting points in km.
///
/// Uses great-circle distance when both records carry coordinates.
/// Otherwise travellers in the same known postal bucket are treated as
/// co-located and everyone else as a fixed penalty distance apart.
pub fn estimate_distance_km(a: &TravellerRecord, b: &TravellerRecord, config: &MatchConfig) -> f64 {
    if let (Some(p), Some(q)) = (a.coordinates, b.coordinates) {
        return p.distance_km(&q);
    }

    let key_a = a.bucket_key(config.pincode_prefix_len);
    let key_b = b.bucket_key(config.pincode_prefix_len);

    if !key_a.is_unknown() && key_a == key_b {
        0.0
    } else {
        config.cross_bucket_distance_km
    }
}

/// Score a feasible match on a 0–100 scale, rounded to one decimal.
///
/// `spare_seats` is what the provider has left after taking the group.
pub fn compatibility_score(
    distance_km: f64,
    max_distance_km: f64,
    date_gap_days: Option<i64>,
    spare_seats: u32,
) -> f64 {
    // A zero radius only admits co-located travellers.
    let closeness = if max_distance_km > 0.0 {
        (1.0 - distance_km / max_distance_km).clamp(0.0, 1.0)
    } else if distance_km <= 0.0 {
        1.0
    } else {
        0.0
    };

    let date_term = match date_gap_days {
        Some(0) => DATE_WEIGHT,
        Some(1) => DATE_WEIGHT / 2.0,
        _ => 0.0,
    };

    let fit_term = CAPACITY_WEIGHT / (1.0 + f64::from(spare_seats));

    let score = DISTANCE_WEIGHT * closeness + date_term + fit_term;
    ((score * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

fn same_date(a: &TravellerRecord, b: &TravellerRecord) -> bool {
    a.travel_date.is_some() && a.travel_date == b.travel_date
}

fn date_gap_days(a: &TravellerRecord, b: &TravellerRecord) -> Option<i64> {
    Some((a.travel_date? - b.travel_date?).num_days().abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoPoint;
    use crate::matching::fixtures::{date, provider, seeker, traveller};

    fn ids(results: &[CompatibilityResult]) -> Vec<&str> {
        results.iter().map(|r| r.provider.id.as_str()).collect()
    }

    #[test]
    fn capacity_and_date_are_hard_constraints() {
        let mut c = provider("C", "682011", 5);
        c.travel_date = Some(date(2026, 1, 25));

        let records = vec![
            seeker("S", "682011", 3),
            provider("A", "682011", 2),
            provider("B", "682011", 4),
            c,
        ];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        let options = MatchOptions {
            same_date_only: true,
            ..MatchOptions::default()
        };
        let results = matcher.find_matches("S", &options).unwrap();
        assert_eq!(ids(&results), vec!["B"]);

        // Without the date restriction C is back, ranked below B.
        let results = matcher.find_matches("S", &MatchOptions::default()).unwrap();
        assert_eq!(ids(&results), vec!["B", "C"]);
    }

    #[test]
    fn unknown_seeker_is_not_found() {
        let records = vec![provider("P", "682011", 3)];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        let err = matcher
            .find_matches("nobody", &MatchOptions::default())
            .unwrap_err();
        assert_eq!(err, MatchError::NotFound { id: "nobody".into() });
    }

    #[test]
    fn non_seeker_id_is_not_found() {
        let records = vec![provider("P", "682011", 3), provider("Q", "682011", 3)];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        assert!(matches!(
            matcher.find_matches("P", &MatchOptions::default()),
            Err(MatchError::NotFound { .. })
        ));
    }

    #[test]
    fn no_eligible_provider_is_empty_not_error() {
        let records = vec![seeker("S", "682011", 6), provider("P", "682011", 2)];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        let results = matcher.find_matches("S", &MatchOptions::default()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn negative_or_nan_radius_is_invalid() {
        let records = vec![seeker("S", "682011", 1)];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let options = MatchOptions {
                max_distance_km: Some(bad),
                ..MatchOptions::default()
            };
            assert!(matches!(
                matcher.find_matches("S", &options),
                Err(MatchError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn invalid_options_win_over_unknown_seeker() {
        let config = MatchConfig::default();
        let matcher = Matcher::new(&[], &config);
        let options = MatchOptions {
            max_distance_km: Some(-5.0),
            ..MatchOptions::default()
        };
        assert!(matches!(
            matcher.find_matches("nobody", &options),
            Err(MatchError::InvalidInput(_))
        ));
    }

    #[test]
    fn non_vehicle_mode_filter_is_invalid() {
        let records = vec![seeker("S", "682011", 1)];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        for mode in [TransportMode::LookingForTransport, TransportMode::Flight] {
            let options = MatchOptions {
                mode: Some(mode),
                ..MatchOptions::default()
            };
            assert!(matches!(
                matcher.find_matches("S", &options),
                Err(MatchError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn mode_filter_restricts_providers() {
        let mut bike = provider("B", "682011", 1);
        bike.mode_of_transport = TransportMode::TwoWheeler;
        let records = vec![seeker("S", "682011", 1), provider("C", "682011", 1), bike];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        let options = MatchOptions {
            mode: Some(TransportMode::TwoWheeler),
            ..MatchOptions::default()
        };
        let results = matcher.find_matches("S", &options).unwrap();
        assert_eq!(ids(&results), vec!["B"]);
    }

    #[test]
    fn non_providers_are_never_matched() {
        let records = vec![
            seeker("S", "682011", 1),
            seeker("S2", "682011", 1),
            traveller("T", "682011", TransportMode::Train),
            provider("Empty", "682011", 0),
        ];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        assert!(matcher.find_matches("S", &MatchOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn radius_excludes_other_buckets() {
        let records = vec![
            seeker("S", "682011", 1),
            provider("Near", "682099", 1),
            provider("Far", "686001", 1),
        ];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        let wide = matcher.find_matches("S", &MatchOptions::default()).unwrap();
        assert_eq!(ids(&wide), vec!["Near", "Far"]);
        assert_eq!(wide[0].distance_km, 0.0);
        assert_eq!(wide[1].distance_km, config.cross_bucket_distance_km);

        let options = MatchOptions {
            max_distance_km: Some(10.0),
            ..MatchOptions::default()
        };
        let narrow = matcher.find_matches("S", &options).unwrap();
        assert_eq!(ids(&narrow), vec!["Near"]);
    }

    #[test]
    fn zero_radius_keeps_same_bucket_only() {
        let records = vec![
            seeker("S", "682011", 1),
            provider("Near", "682099", 1),
            provider("Far", "686001", 1),
        ];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        let options = MatchOptions {
            max_distance_km: Some(0.0),
            ..MatchOptions::default()
        };
        let results = matcher.find_matches("S", &options).unwrap();
        assert_eq!(ids(&results), vec!["Near"]);
        assert_eq!(results[0].compatibility_score, 100.0);
    }

    #[test]
    fn unknown_buckets_are_never_co_located() {
        let records = vec![seeker("S", "n/a", 1), provider("P", "", 1)];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        let results = matcher.find_matches("S", &MatchOptions::default()).unwrap();
        assert_eq!(results[0].distance_km, config.cross_bucket_distance_km);
    }

    #[test]
    fn coordinates_override_bucket_heuristic() {
        let mut s = seeker("S", "682011", 1);
        s.coordinates = GeoPoint::new(9.9312, 76.2673);
        let mut p = provider("P", "686001", 1);
        p.coordinates = GeoPoint::new(9.9816, 76.2999);

        let config = MatchConfig::default();
        let d = estimate_distance_km(&s, &p, &config);
        assert!(d > 0.0 && d < 10.0, "got {d}");
    }

    #[test]
    fn snug_fit_beats_big_vehicle_at_equal_distance() {
        let records = vec![
            seeker("S", "682011", 2),
            provider("Bus", "682011", 6),
            provider("Car", "682011", 2),
        ];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        let results = matcher.find_matches("S", &MatchOptions::default()).unwrap();
        assert_eq!(ids(&results), vec!["Car", "Bus"]);
    }

    #[test]
    fn exact_date_beats_near_date() {
        let mut next_day = provider("Tomorrow", "682011", 1);
        next_day.travel_date = Some(date(2026, 1, 27));
        let records = vec![seeker("S", "682011", 1), next_day, provider("Today", "682011", 1)];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        let results = matcher.find_matches("S", &MatchOptions::default()).unwrap();
        assert_eq!(ids(&results), vec!["Today", "Tomorrow"]);
        assert!(results[0].compatibility_score > results[1].compatibility_score);
    }

    #[test]
    fn same_date_only_needs_known_dates() {
        let mut s = seeker("S", "682011", 1);
        s.travel_date = None;
        let mut p = provider("P", "682011", 1);
        p.travel_date = None;
        let records = vec![s, p];
        let config = MatchConfig::default();
        let matcher = Matcher::new(&records, &config);

        let options = MatchOptions {
            same_date_only: true,
            ..MatchOptions::default()
        };
        assert!(matcher.find_matches("S", &options).unwrap().is_empty());
        assert_eq!(
            matcher.find_matches("S", &MatchOptions::default()).unwrap().len(),
            1
        );
    }

    #[test]
    fn results_are_truncated_to_max_results() {
        let mut records = vec![seeker("S", "682011", 1)];
        records.extend((0..10).map(|i| provider(&format!("P{i}"), "682011", 1 + i)));
        let config = MatchConfig {
            max_results: 3,
            ..MatchConfig::default()
        };
        let matcher = Matcher::new(&records, &config);

        let results = matcher.find_matches("S", &MatchOptions::default()).unwrap();
        assert_eq!(ids(&results), vec!["P0", "P1", "P2"]);
    }

    #[test]
    fn score_components() {
        // Co-located, same date, exact fit
        assert_eq!(compatibility_score(0.0, 30.0, Some(0), 0), 100.0);
        // Edge of radius, unknown date, one spare seat
        assert_eq!(compatibility_score(30.0, 30.0, None, 1), 5.0);
        // Halfway, next day, three spare seats
        assert_eq!(compatibility_score(15.0, 30.0, Some(1), 3), 47.5);
        // Rounded to one decimal
        assert_eq!(compatibility_score(10.0, 30.0, Some(5), 2), 50.0);
    }

    #[test]
    fn score_with_zero_radius_only_rewards_same_place() {
        assert_eq!(compatibility_score(0.0, 0.0, Some(0), 0), 100.0);
        // date 20 + capacity 10, no distance credit
        assert_eq!(compatibility_score(25.0, 0.0, Some(0), 0), 30.0);
    }
}
