//! # Client Configuration
//!
//! Configuration for the gateway client.
//!
//! ## Configuration File Format
//! ```toml
//! # kirana.toml
//! [server]
//! api_base_url = "http://localhost:5000/api"
//! # Optional; the core contract has no client-enforced request timeout,
//! # a connect timeout is the one refinement the config offers.
//! connect_timeout_secs = 10
//! ```
//!
//! Defaults target a local development backend on port 5000, matching the
//! backend's own default.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{GatewayError, GatewayResult};

/// The default backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Gateway client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint path is appended to. No trailing slash.
    pub api_base_url: String,

    /// Optional TCP connect timeout. `None` leaves transport defaults.
    pub connect_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            connect_timeout: None,
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at the given base URL.
    pub fn new(api_base_url: impl Into<String>) -> GatewayResult<Self> {
        let mut base = api_base_url.into();
        while base.ends_with('/') {
            base.pop();
        }

        // Validate once here so per-request URL building cannot fail.
        Url::parse(&base)?;

        Ok(ClientConfig {
            api_base_url: base,
            connect_timeout: None,
        })
    }

    /// Sets the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Loads configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> GatewayResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| GatewayError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&raw)?;
        debug!(path = %path.display(), base_url = %config.api_base_url, "loaded client config");
        Ok(config)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(raw: &str) -> GatewayResult<Self> {
        let file: ConfigFile =
            toml::from_str(raw).map_err(|e| GatewayError::InvalidConfig(e.to_string()))?;

        let server = file.server.unwrap_or_default();
        let mut config = match server.api_base_url {
            Some(url) => ClientConfig::new(url)?,
            None => ClientConfig::default(),
        };
        config.connect_timeout = server.connect_timeout_secs.map(Duration::from_secs);
        Ok(config)
    }
}

// =============================================================================
// File Schema
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    server: Option<ServerSection>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    api_base_url: Option<String>,
    connect_timeout_secs: Option<u64>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let config = ClientConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:5000/api");
        assert!(config.connect_timeout.is_none());
    }

    #[test]
    fn new_strips_trailing_slashes() {
        let config = ClientConfig::new("http://pos.example.com/api/").unwrap();
        assert_eq!(config.api_base_url, "http://pos.example.com/api");
    }

    #[test]
    fn new_rejects_invalid_urls() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(GatewayError::InvalidConfig(_))
        ));
    }

    #[test]
    fn parses_toml() {
        let config = ClientConfig::from_toml(
            r#"
            [server]
            api_base_url = "https://shop.example.com/api"
            connect_timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.api_base_url, "https://shop.example.com/api");
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
