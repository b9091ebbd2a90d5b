//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Lifetime of every cache entry in seconds
    pub cache_ttl: u64,
    /// Interval between background sweeps in seconds
    pub sweep_interval: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Fill the backing store with demo records at startup
    pub seed_demo_data: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_TTL` - Cache entry TTL in seconds (default: 300)
    /// - `SWEEP_INTERVAL` - Sweep frequency in seconds (default: 300)
    ///
    /// A zero TTL or interval falls back to the default.
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `SEED_DEMO_DATA` - `true` or `1` to seed demo records (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_ttl: parse_var("CACHE_TTL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.cache_ttl),
            sweep_interval: parse_var("SWEEP_INTERVAL")
                .filter(|secs| *secs > 0)
                .unwrap_or(defaults.sweep_interval),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"))
                .unwrap_or(defaults.seed_demo_data),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: 300,
            sweep_interval: 300,
            server_port: 8080,
            seed_demo_data: false,
        }
    }
}
