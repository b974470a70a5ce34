//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

use checkin_domain::{GatewayMode, OutputFormat};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("http.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("http.base_url is required in live mode")]
    EmptyBaseUrl,

    #[error("http.base_url is not a valid URL: {0}")]
    InvalidBaseUrl(String),
}

/// Raw gateway selection from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// Which backend implementation to use
    pub mode: GatewayMode,
}

/// Raw HTTP backend configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHttpConfig {
    /// Base URL of the check-in service
    pub base_url: String,
    /// Sent as `X-API-Key`
    pub api_key: Option<String>,
    /// Sent as `Authorization: Bearer`
    pub bearer_token: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for FileHttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            api_key: None,
            bearer_token: None,
            timeout_seconds: 30,
        }
    }
}

impl FileHttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Raw mock backend configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMockConfig {
    /// Artificial delay added to every mock call
    pub latency_ms: u64,
}

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write logs to this file instead of stderr
    pub file: Option<PathBuf>,
}

/// Raw output configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Result rendering
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show spinners while requests are in flight
    pub show_progress: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

/// Complete configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub gateway: FileGatewayConfig,
    pub http: FileHttpConfig,
    pub mock: FileMockConfig,
    pub logging: FileLoggingConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.http.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.gateway.mode == GatewayMode::Live {
            let base_url = self.http.base_url.trim();
            if base_url.is_empty() {
                return Err(ConfigValidationError::EmptyBaseUrl);
            }
            Url::parse(base_url)
                .map_err(|e| ConfigValidationError::InvalidBaseUrl(e.to_string()))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[gateway]
mode = "live"

[http]
base_url = "https://api.example.org"
api_key = "secret"
bearer_token = "token"
timeout_seconds = 10

[mock]
latency_ms = 250

[logging]
file = "/tmp/checkin.log"

[output]
format = "json"
color = false
show_progress = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gateway.mode, GatewayMode::Live);
        assert_eq!(config.http.base_url, "https://api.example.org");
        assert_eq!(config.http.api_key.as_deref(), Some("secret"));
        assert_eq!(config.http.timeout(), Duration::from_secs(10));
        assert_eq!(config.mock.latency_ms, 250);
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/checkin.log")));
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[http]
api_key = "secret"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gateway.mode, GatewayMode::Mock);
        assert_eq!(config.http.base_url, "http://localhost:8000");
        assert_eq!(config.http.timeout_seconds, 30);
        assert!(config.output.show_progress);
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.http.timeout_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout)
        ));
    }

    #[test]
    fn test_validate_base_url_only_in_live_mode() {
        let mut config = FileConfig::default();
        config.http.base_url = "not a url".to_string();
        assert!(config.validate().is_ok());

        config.gateway.mode = GatewayMode::Live;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidBaseUrl(_))
        ));

        config.http.base_url = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::EmptyBaseUrl)
        ));
    }
}
