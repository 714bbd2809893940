//! Runtime configuration from the environment.

use std::path::PathBuf;
use std::time::Duration;

use scout_cache::{CacheConfig, PollerConfig};
use scout_core::error::{Result, ScoutError};

const DEFAULT_DATA_DIR: &str = ".scout";

#[derive(Clone, Debug)]
pub struct ScoutConfig {
    pub data_dir: PathBuf,
    pub cache: CacheConfig,
    pub poller: PollerConfig,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cache: CacheConfig::default(),
            poller: PollerConfig::default(),
        }
    }
}

impl ScoutConfig {
    /// Reads `SCOUT_*` variables, after loading `.env` if present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(dir) = lookup("SCOUT_DATA_DIR").filter(|d| !d.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup("SCOUT_CACHE_TTL_MS") {
            config.cache = config.cache.with_ttl(parse_millis("SCOUT_CACHE_TTL_MS", &raw)?);
        }
        if let Some(raw) = lookup("SCOUT_METRICS_INTERVAL_MS") {
            let interval = parse_millis("SCOUT_METRICS_INTERVAL_MS", &raw)?;
            if interval.is_zero() {
                return Err(ScoutError::ConfigError(
                    "SCOUT_METRICS_INTERVAL_MS must be greater than zero".into(),
                ));
            }
            config.poller = config.poller.with_interval(interval);
        }

        Ok(config)
    }
}

fn parse_millis(name: &str, raw: &str) -> Result<Duration> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| ScoutError::ConfigError(format!("{name}={raw:?}: {e}")))
}
