//! Server configuration from environment variables.

use std::fmt::Display;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use tracing::info;

use crate::cache::CacheConfig;
use crate::matching::MatchConfig;
use crate::store::RemoteStoreConfig;

const ADDR: &str = "RIDESHARE_ADDR";
const DATA_FILE: &str = "RIDESHARE_DATA_FILE";
const REMOTE_URL: &str = "RIDESHARE_REMOTE_URL";
const REMOTE_TOKEN: &str = "RIDESHARE_REMOTE_TOKEN";
const CACHE_TTL_SECS: &str = "RIDESHARE_CACHE_TTL_SECS";
const MIN_GROUP_SIZE: &str = "RIDESHARE_MIN_GROUP_SIZE";
const MAX_DISTANCE_KM: &str = "RIDESHARE_MAX_DISTANCE_KM";

const DEFAULT_DATA_FILE: &str = "data/travellers.json";

/// Errors from reading the environment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set but could not be parsed
    #[error("invalid {key}={value:?}: {message}")]
    Invalid {
        key: &'static str,
        value: String,
        message: String,
    },
}

/// Where the server reads traveller records from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// Exported JSON snapshot on disk.
    File(PathBuf),
    /// Live registration API.
    Remote(RemoteStoreConfig),
}

/// Everything the server needs at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub source: DataSource,
    pub cache: CacheConfig,
    pub matching: MatchConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value
    /// if it is set.
    ///
    /// A remote URL takes precedence over the data file.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let addr = try_load(&var, ADDR, SocketAddr::from(([127, 0, 0, 1], 3000)))?;

        let source = match var(REMOTE_URL) {
            Some(url) => {
                let mut remote = RemoteStoreConfig::new(url.trim());
                if let Some(token) = var(REMOTE_TOKEN) {
                    remote = remote.with_token(token.trim());
                }
                DataSource::Remote(remote)
            }
            None => {
                let path = var(DATA_FILE).unwrap_or_else(|| {
                    info!("{DATA_FILE} not set, using default: {DEFAULT_DATA_FILE}");
                    DEFAULT_DATA_FILE.to_string()
                });
                DataSource::File(PathBuf::from(path))
            }
        };

        let defaults = CacheConfig::default();
        let ttl_secs: u64 = try_load(&var, CACHE_TTL_SECS, defaults.ttl.as_secs())?;
        let cache = CacheConfig {
            ttl: Duration::from_secs(ttl_secs),
            ..defaults
        };

        let defaults = MatchConfig::default();
        let min_group_size = try_load(&var, MIN_GROUP_SIZE, defaults.min_group_size)?;
        let max_distance_km: f64 = try_load(&var, MAX_DISTANCE_KM, defaults.max_distance_km)?;
        if !max_distance_km.is_finite() || max_distance_km < 0.0 {
            return Err(ConfigError::Invalid {
                key: MAX_DISTANCE_KM,
                value: max_distance_km.to_string(),
                message: "must be a non-negative number".to_string(),
            });
        }

        let matching = MatchConfig {
            min_group_size,
            max_distance_km,
            ..defaults
        };

        Ok(Self {
            addr,
            source,
            cache,
            matching,
        })
    }
}

/// Parse `key` if set, otherwise log and fall back to `default`.
fn try_load<T>(
    var: impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(value) = var(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };

    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        value,
        message: e.to_string(),
    })
}
