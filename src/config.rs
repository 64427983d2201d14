//! Configuration Module
//!
//! Handles loading and validating cache and server settings from environment
//! variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::Cache;
use crate::error::{CacheError, Result};

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_entries: usize,
    /// Default TTL in seconds for entries without explicit TTL (0 = never expires)
    pub default_ttl: i64,
    /// HTTP server port
    pub server_port: u16,
    /// Background cleanup task interval in seconds (0 = disabled)
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds, 0 = never (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds, 0 = off (default: 1)
    ///
    /// # Errors
    /// `CacheError::Configuration` if a variable is set but cannot be parsed,
    /// or if the resulting values fail `validate`.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let config = Self {
            max_entries: env_or("MAX_ENTRIES", defaults.max_entries)?,
            default_ttl: env_or("DEFAULT_TTL", defaults.default_ttl)?,
            server_port: env_or("SERVER_PORT", defaults.server_port)?,
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Rejects a zero capacity or a negative default TTL.
    pub fn validate(&self) -> Result<()> {
        if self.max_entries == 0 {
            return Err(CacheError::Configuration(
                "MAX_ENTRIES must be greater than zero".to_string(),
            ));
        }
        if self.default_ttl < 0 {
            return Err(CacheError::Configuration(format!(
                "DEFAULT_TTL must not be negative, got {}",
                self.default_ttl
            )));
        }
        Ok(())
    }

    /// Default TTL as a `Duration`.
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl.max(0) as u64)
    }

    /// Builds a string cache from these settings.
    pub fn build_cache(&self) -> Result<Cache<String, String>> {
        self.validate()?;
        Cache::new(self.max_entries, self.default_ttl())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: 300,
            server_port: 3000,
            cleanup_interval: 1,
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| {
            CacheError::Configuration(format!("{} has invalid value '{}'", name, raw))
        }),
        Err(_) => Ok(default),
    }
}
