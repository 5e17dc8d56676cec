//! Tunables for grouping and matching.

/// Configuration parameters for proximity grouping and ride matching.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of leading postal-code digits that form a proximity bucket.
    pub pincode_prefix_len: usize,

    /// Minimum members for a proximity group to be reported, when the
    /// caller does not ask for a specific value.
    pub min_group_size: usize,

    /// Furthest a provider may start from a seeker (km), when the caller
    /// does not ask for a specific value.
    pub max_distance_km: f64,

    /// Distance assumed between travellers in different buckets when no
    /// coordinates are known (km).
    pub cross_bucket_distance_km: f64,

    /// Maximum number of matches to return per seeker.
    pub max_results: usize,
}

impl MatchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        pincode_prefix_len: usize,
        min_group_size: usize,
        max_distance_km: f64,
        cross_bucket_distance_km: f64,
        max_results: usize,
    ) -> Self {
        Self {
            pincode_prefix_len,
            min_group_size,
            max_distance_km,
            cross_bucket_distance_km,
            max_results,
        }
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            pincode_prefix_len: 3,
            min_group_size: 2,
            max_distance_km: 30.0,
            cross_bucket_distance_km: 25.0,
            max_results: 20,
        }
    }
}
