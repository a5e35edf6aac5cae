//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use secrecy::SecretString;

use crate::cache::DEFAULT_TTL_MS;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Base URL of the aggregator API
    pub upstream_base_url: String,
    /// Optional aggregator API key, sent as a bearer token
    pub upstream_api_key: Option<SecretString>,
    /// Upstream request timeout in milliseconds
    pub upstream_timeout_ms: u64,
    /// Lifetime of memoized upstream responses in milliseconds
    pub cache_ttl_ms: u64,
    /// Interval in seconds between expired-entry sweeps, 0 disables sweeping
    pub cache_sweep_interval_secs: u64,
    /// Quiet period in milliseconds before cache statistics are logged
    pub stats_log_debounce_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `UPSTREAM_BASE_URL` - Aggregator API base URL (default: https://api.1inch.dev)
    /// - `UPSTREAM_API_KEY` - Aggregator API key (default: unset)
    /// - `UPSTREAM_TIMEOUT_MS` - Upstream request timeout (default: 10000)
    /// - `CACHE_TTL_MS` - Response cache TTL (default: 30000)
    /// - `CACHE_SWEEP_INTERVAL_SECS` - Expired-entry sweep interval (default: 0, disabled)
    /// - `STATS_LOG_DEBOUNCE_MS` - Stats log quiet period (default: 1000)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            upstream_base_url: env::var("UPSTREAM_BASE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.upstream_base_url),
            upstream_api_key: env::var("UPSTREAM_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(SecretString::from),
            upstream_timeout_ms: parse_var("UPSTREAM_TIMEOUT_MS")
                .unwrap_or(defaults.upstream_timeout_ms),
            cache_ttl_ms: parse_var("CACHE_TTL_MS").unwrap_or(defaults.cache_ttl_ms),
            cache_sweep_interval_secs: parse_var("CACHE_SWEEP_INTERVAL_SECS")
                .unwrap_or(defaults.cache_sweep_interval_secs),
            stats_log_debounce_ms: parse_var("STATS_LOG_DEBOUNCE_MS")
                .unwrap_or(defaults.stats_log_debounce_ms),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_millis(self.cache_ttl_ms)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }

    pub fn stats_log_debounce(&self) -> Duration {
        Duration::from_millis(self.stats_log_debounce_ms)
    }

    /// Sweep interval, or None when sweeping is disabled.
    pub fn cache_sweep_interval(&self) -> Option<Duration> {
        (self.cache_sweep_interval_secs > 0)
            .then(|| Duration::from_secs(self.cache_sweep_interval_secs))
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            upstream_base_url: "https://api.1inch.dev".to_string(),
            upstream_api_key: None,
            upstream_timeout_ms: 10_000,
            cache_ttl_ms: DEFAULT_TTL_MS,
            cache_sweep_interval_secs: 0,
            stats_log_debounce_ms: 1_000,
        }
    }
}
