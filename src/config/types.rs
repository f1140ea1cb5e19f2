//! Configuration types for acl-client
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::error::ConfigError;
use crate::transport::DEFAULT_TIMEOUT_SECS;
use reqwest::Url;
use serde::Deserialize;

/// Default identity service endpoint
pub const DEFAULT_ACL_HOST: &str = "http://api-private:8081";

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Identity service connection settings
    pub acl: AclConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Identity service connection configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AclConfig {
    /// Base URL of the identity service (e.g., `http://api-private:8081`)
    pub host: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AclConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_ACL_HOST.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl AclConfig {
    /// Parse and validate the configured host
    pub fn host_url(&self) -> Result<Url, ConfigError> {
        if self.host.is_empty() {
            return Err(ConfigError::Missing {
                field: "acl.host".to_string(),
            });
        }

        if !self.host.starts_with("http://") && !self.host.starts_with("https://") {
            return Err(ConfigError::Invalid {
                message: format!(
                    "acl.host must start with http:// or https://, got: {}",
                    self.host
                ),
            });
        }

        Url::parse(&self.host).map_err(|e| ConfigError::Invalid {
            message: format!("acl.host is not a valid URL ({}): {}", self.host, e),
        })
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.acl.host, "http://api-private:8081");
        assert_eq!(config.acl.timeout_secs, 10);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_host_url() {
        let config = AclConfig {
            host: "https://identity.example.com:8443".to_string(),
            ..Default::default()
        };
        let url = config.host_url().unwrap();
        assert_eq!(url.host_str(), Some("identity.example.com"));
        assert_eq!(url.port(), Some(8443));
    }

    #[test]
    fn test_host_url_rejects_bad_values() {
        let empty = AclConfig {
            host: String::new(),
            ..Default::default()
        };
        assert!(matches!(
            empty.host_url(),
            Err(ConfigError::Missing { .. })
        ));

        let no_scheme = AclConfig {
            host: "api-private:8081".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            no_scheme.host_url(),
            Err(ConfigError::Invalid { .. })
        ));

        let garbage = AclConfig {
            host: "http://exa mple.com".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            garbage.host_url(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_deserialize_log_format() {
        let format: LogFormat = serde_json::from_str(r#""json""#).unwrap();
        assert_eq!(format, LogFormat::Json);

        let format: LogFormat = serde_json::from_str(r#""pretty""#).unwrap();
        assert_eq!(format, LogFormat::Pretty);
    }
}
