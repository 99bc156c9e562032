//! Configuration Module
//!
//! Handles loading and validating proxy configuration from environment
//! variables.

use std::env;
use std::time::Duration;

use crate::error::{ProxyError, Result};

/// Proxy configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults. Durations accept humantime strings such as `30s`, `1ms` or
/// `2m 30s`.
#[derive(Debug, Clone)]
pub struct Config {
    /// `cache.size`: maximum number of cached keys
    pub cache_size: usize,
    /// `cache.expiry`: lifetime of a cached value, measured from insertion
    pub cache_expiry: Duration,
    /// `server.maxClients`: requests allowed to execute at once
    pub max_clients: usize,
    /// HTTP server port
    pub server_port: u16,
    /// Backend address, `host:port` or `redis://` URL
    pub redis_address: String,
    /// Upper bound on a single backend call
    pub backend_timeout: Duration,
    /// Interval between background purges of expired entries
    pub cleanup_interval: Duration,
    /// Write `a..z` into the backend on startup
    pub seed_fake_data: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_SIZE` - Maximum cached keys (default: 1000)
    /// - `CACHE_EXPIRY` - Cache TTL (default: 30s)
    /// - `SERVER_MAX_CLIENTS` - Concurrent request ceiling (default: 64)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `REDIS_ADDRESS` - Backend address (default: 127.0.0.1:6379)
    /// - `BACKEND_TIMEOUT` - Backend call timeout (default: 2s)
    /// - `CLEANUP_INTERVAL` - Expired entry purge interval (default: 1s)
    /// - `SEED_FAKE_DATA` - Seed lowercase letters into Redis (default: false)
    ///
    /// Unset variables fall back to their default.
    ///
    /// # Errors
    /// `InvalidConfiguration` naming the variable when one is set but does
    /// not parse.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            cache_size: parse_var("CACHE_SIZE")?.unwrap_or(defaults.cache_size),
            cache_expiry: duration_var("CACHE_EXPIRY")?.unwrap_or(defaults.cache_expiry),
            max_clients: parse_var("SERVER_MAX_CLIENTS")?.unwrap_or(defaults.max_clients),
            server_port: parse_var("SERVER_PORT")?.unwrap_or(defaults.server_port),
            redis_address: raw_var("REDIS_ADDRESS")?.unwrap_or(defaults.redis_address),
            backend_timeout: duration_var("BACKEND_TIMEOUT")?
                .unwrap_or(defaults.backend_timeout),
            cleanup_interval: duration_var("CLEANUP_INTERVAL")?
                .unwrap_or(defaults.cleanup_interval),
            seed_fake_data: parse_var("SEED_FAKE_DATA")?.unwrap_or(defaults.seed_fake_data),
        })
    }

    // == Validate ==
    /// Rejects values the cache, gate, backend client or cleanup task cannot
    /// work with.
    pub fn validate(&self) -> Result<()> {
        if self.cache_size == 0 {
            return Err(ProxyError::InvalidConfiguration(
                "cache.size must be a positive integer".to_string(),
            ));
        }
        if self.cache_expiry.is_zero() {
            return Err(ProxyError::InvalidConfiguration(
                "cache.expiry must be a positive duration".to_string(),
            ));
        }
        if self.max_clients == 0 {
            return Err(ProxyError::InvalidConfiguration(
                "server.maxClients must be a positive integer".to_string(),
            ));
        }
        if self.backend_timeout.is_zero() {
            return Err(ProxyError::InvalidConfiguration(
                "backend timeout must be a positive duration".to_string(),
            ));
        }
        if self.cleanup_interval.is_zero() {
            return Err(ProxyError::InvalidConfiguration(
                "cleanup interval must be a positive duration".to_string(),
            ));
        }
        Ok(())
    }
}

// == Environment Helpers ==
// Each returns Ok(None) for an unset variable.

fn raw_var(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ProxyError::InvalidConfiguration(format!(
            "{} is not valid unicode",
            name
        ))),
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    raw_var(name)?
        .map(|value| {
            value
                .trim()
                .parse()
                .map_err(|_| invalid_value(name, &value))
        })
        .transpose()
}

fn duration_var(name: &str) -> Result<Option<Duration>> {
    raw_var(name)?
        .map(|value| {
            humantime::parse_duration(value.trim()).map_err(|_| invalid_value(name, &value))
        })
        .transpose()
}

fn invalid_value(name: &str, value: &str) -> ProxyError {
    ProxyError::InvalidConfiguration(format!("{} has invalid value '{}'", name, value))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_size: 1000,
            cache_expiry: Duration::from_secs(30),
            max_clients: 64,
            server_port: 8080,
            redis_address: "127.0.0.1:6379".to_string(),
            backend_timeout: Duration::from_secs(2),
            cleanup_interval: Duration::from_secs(1),
            seed_fake_data: false,
        }
    }
}
