//! Configuration management for slidesnap
//!
//! This module provides a layered configuration system that loads settings from:
//! 1. Default values (embedded in structs)
//! 2. TOML configuration file
//! 3. Environment variables (highest priority)
//!
//! # Environment Variables
//!
//! Configuration can be overridden using environment variables with the pattern:
//! `SLIDESNAP__<section>__<key>`
//!
//! Examples:
//! - `SLIDESNAP__SERVER__BASE_URL=https://convert.example.com`
//! - `SLIDESNAP__POLLING__INTERVAL_MS=1000`
//!
//! # Configuration File
//!
//! By default, the configuration is loaded from `config/slidesnap.toml`.
//! This can be overridden using the `SLIDESNAP_CONFIG` environment variable.

mod models;
mod sources;
mod validation;

pub use models::{Config, DownloadConfig, HttpConfig, PollingConfig, ServerConfig};
pub use validation::ValidationError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ValidationError),
}

impl Config {
    /// Load configuration from all sources (file + environment)
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file is malformed or
    /// validation fails (bad base URL, sub-floor poll cadence, zero
    /// timeouts).
    pub fn load() -> Result<Self, ConfigError> {
        let config = sources::load()?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific path
    ///
    /// Useful for testing with custom configuration files.
    pub fn load_from_path(path: std::path::PathBuf) -> Result<Self, ConfigError> {
        let config = sources::load_from_sources(path)?;
        validation::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_minimal_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
base_url = "http://converter.local:5000"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.server.base_url, "http://converter.local:5000");
    }

    #[test]
    fn test_validation_catches_bad_base_url() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
base_url = "converter.local:5000"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let result = Config::load_from_path(config_path);
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::ValidationError(ValidationError::InvalidBaseUrlScheme(_))
        ));
    }

    #[test]
    fn test_full_config_example() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
base_url = "https://convert.example.com"

[http]
connect_timeout_secs = 5
request_timeout_secs = 20
user_agent = "slidesnap-ci"

[polling]
interval_ms = 1000

[download]
output_dir = "artifacts"
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load_from_path(config_path).unwrap();
        assert_eq!(config.server.base_url, "https://convert.example.com");
        assert_eq!(config.http.user_agent, "slidesnap-ci");
        assert_eq!(config.polling.interval_ms, 1000);
        assert_eq!(
            config.download.output_dir,
            std::path::PathBuf::from("artifacts")
        );
    }
}
