//! # Client Configuration
//!
//! Connection options for the HTTP transport and the response format requested from the
//! API. Every field has a default, so a configuration file only needs to list what it
//! overrides:
//!
//! ```json
//! { "endpoint": "https://api.linode.com/", "timeout_ms": 30000 }
//! ```
use crate::decode::ResponseFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://api.linode.com/";
pub const DEFAULT_USER_AGENT: &str = concat!("linapi/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': '{source}'")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed config file '{path}': '{source}'")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// URL every request is posted to.
    pub endpoint: String,
    pub user_agent: String,
    /// Resolve and connect over IPv4 only.
    pub ipv4_only: bool,
    /// Whole-request timeout in milliseconds. `None` waits indefinitely.
    pub timeout_ms: Option<u64>,
    /// Value of `api_responseFormat`, also selects how responses are decoded.
    pub response_format: ResponseFormat,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            ipv4_only: true,
            timeout_ms: None,
            response_format: ResponseFormat::default(),
        }
    }
}

impl ClientConfig {
    /// Reads a JSON configuration file, missing fields take their default value.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }

    /// Sets the request timeout. Sub-millisecond precision is dropped, but a non-zero
    /// timeout never rounds down to zero.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        let millis = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self.timeout_ms = Some(if millis == 0 && !timeout.is_zero() {
            1
        } else {
            millis
        });
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "timeout_ms": 15000, "response_format": "human" }}"#).unwrap();

        let config = ClientConfig::from_path(file.path()).unwrap();

        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.ipv4_only);
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.response_format, ResponseFormat::Human);
    }

    #[test]
    fn test_sub_second_timeout_is_kept() {
        let config = ClientConfig::default().with_timeout(Duration::from_millis(500));
        assert_eq!(config.timeout(), Some(Duration::from_millis(500)));

        let config = ClientConfig::default().with_timeout(Duration::from_micros(10));
        assert_eq!(config.timeout(), Some(Duration::from_millis(1)));

        assert_eq!(ClientConfig::default().timeout(), None);
    }

    #[test]
    fn test_config_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(
            ClientConfig::from_path(&missing),
            Err(ConfigError::Io { .. })
        ));

        let malformed = dir.path().join("malformed.json");
        std::fs::write(&malformed, r#"{ "response_format": "xml" }"#).unwrap();
        assert!(matches!(
            ClientConfig::from_path(&malformed),
            Err(ConfigError::Parse { .. })
        ));
    }
}
