//! Runtime configuration for the results board, read from environment variables.

use std::env;
use std::time::Duration;

use chrono_tz::Tz;

pub const DEFAULT_API_URL: &str = "http://localhost:5500";
pub const DEFAULT_TIMEZONE: &str = "Asia/Kolkata";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL, without trailing slash.
    pub api_url: String,
    /// Zone used for every "today" / "now" decision.
    pub timezone: Tz,
    pub http_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timezone: chrono_tz::Asia::Kolkata,
            http_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("RESULTS_API_URL").map(|u| u.trim().to_string()) {
            if url.is_empty() {
                return Err(ConfigError::Missing("RESULTS_API_URL"));
            }
            config.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(name) = lookup("RESULTS_TIMEZONE") {
            let name = name.trim().to_string();
            config.timezone = name
                .parse::<Tz>()
                .map_err(|e| ConfigError::InvalidTimezone { name: name.clone(), reason: e.to_string() })?;
        }
        if let Some(secs) = lookup("RESULTS_HTTP_TIMEOUT_SECS") {
            let secs = secs
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidNumber { key: "RESULTS_HTTP_TIMEOUT_SECS", value: secs.clone() })?;
            config.http_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable {0} is set but empty")]
    Missing(&'static str),

    #[error("Unknown timezone {name}: {reason}")]
    InvalidTimezone { name: String, reason: String },

    #[error("{key} must be a whole number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}
