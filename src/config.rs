//! Server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Settings for the web binary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServerConfig {
    /// `HOST`, default 0.0.0.0 so the app is reachable from outside a VPS.
    pub host: String,
    /// `PORT`, default 8080.
    pub port: u16,
    /// `INACTIVITY_HOURS`: tournaments untouched this long are dropped. Default 12.
    pub inactivity_timeout: Duration,
    /// `TOURNAMENT_SEED`: fixed seed for every tournament's pairings (reproducible runs).
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            inactivity_timeout: Duration::from_secs(12 * 3600),
            seed: None,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; unset, blank, or unparsable values keep the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();
        Self {
            host: get("HOST").unwrap_or(defaults.host),
            port: get("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            inactivity_timeout: get("INACTIVITY_HOURS")
                .and_then(|h| h.parse::<u64>().ok())
                .and_then(|h| h.checked_mul(3600))
                .map(Duration::from_secs)
                .unwrap_or(defaults.inactivity_timeout),
            seed: get("TOURNAMENT_SEED").and_then(|s| s.parse().ok()),
        }
    }
}
