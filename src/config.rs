//! Configuration Module
//!
//! Handles loading the remote service location and client settings from
//! environment variables.

use std::env;
use std::time::Duration;

use reqwest::Url;

use crate::error::{CacheError, Result};

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme and host of the remote cache service
    pub host: String,
    /// Port of the remote cache service
    pub port: u16,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Creates a new ClientConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `BIGCACHE_HOST` - Scheme and host (default: http://127.0.0.1)
    /// - `BIGCACHE_PORT` - Port (default: 9090)
    /// - `BIGCACHE_TIMEOUT_SECS` - Request timeout in seconds (default: 5)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("BIGCACHE_HOST").unwrap_or(defaults.host),
            port: env::var("BIGCACHE_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            timeout_secs: env::var("BIGCACHE_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    /// Base URL of the remote service, `"{host}:{port}"`.
    pub fn base_url(&self) -> Result<Url> {
        let raw = format!("{}:{}", self.host.trim_end_matches('/'), self.port);
        let url = Url::parse(&raw)
            .map_err(|e| CacheError::InvalidConfig(format!("Invalid base URL '{}': {}", raw, e)))?;

        if url.cannot_be_a_base() {
            return Err(CacheError::InvalidConfig(format!(
                "Base URL '{}' cannot carry a path",
                raw
            )));
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "http://127.0.0.1".to_string(),
            port: 9090,
            timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.host, "http://127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("BIGCACHE_HOST");
        env::remove_var("BIGCACHE_PORT");
        env::remove_var("BIGCACHE_TIMEOUT_SECS");

        let config = ClientConfig::from_env();
        assert_eq!(config.host, "http://127.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn test_base_url_joins_host_and_port() {
        let config = ClientConfig {
            host: "http://cache.internal/".to_string(),
            port: 8080,
            timeout_secs: 1,
        };
        let url = config.base_url().unwrap();
        assert_eq!(url.as_str(), "http://cache.internal:8080/");
    }

    #[test]
    fn test_base_url_rejects_hostless_input() {
        let config = ClientConfig {
            host: "not a url".to_string(),
            port: 8080,
            timeout_secs: 1,
        };
        assert!(matches!(
            config.base_url(),
            Err(CacheError::InvalidConfig(_))
        ));
    }
}
