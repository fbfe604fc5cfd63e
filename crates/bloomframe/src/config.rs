//! Configuration management for the frame server.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use bloom_common::constants::{DEFAULT_BASE_URL, DEFAULT_LISTEN_ADDR, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Public base URL for button targets, card images and share links
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// JSON catalog file (built-in demo catalog if unset)
    #[serde(default)]
    pub catalog_path: Option<String>,

    /// Credential NFT contract shown by "Verify on Chain"
    #[serde(default = "default_contract_address")]
    pub credential_contract_address: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_contract_address() -> String { "0x0000000000000000000000000000000000000000".to_string() }
fn default_request_timeout() -> u64 { DEFAULT_REQUEST_TIMEOUT_SECS }

impl AppConfig {
    /// Load configuration from file and `SKILLBLOOM__*` env, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut builder = config::Config::builder();
        if Path::new(config_path).exists() {
            builder = builder.add_source(config::File::with_name(config_path));
        } else {
            tracing::warn!("Config file not found, using defaults");
        }

        let mut config: AppConfig = builder
            .add_source(
                config::Environment::with_prefix("SKILLBLOOM")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to load config")?
            .try_deserialize()
            .context("Failed to parse config")?;

        // Apply CLI overrides
        if let Some(ref listen) = args.listen {
            config.listen_addr = listen.clone();
        }
        if let Some(ref base_url) = args.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(ref catalog) = args.catalog {
            config.catalog_path = Some(catalog.clone());
        }

        if config.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be positive");
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            base_url: default_base_url(),
            catalog_path: None,
            credential_contract_address: default_contract_address(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(
                r#"base_url = "https://bloom.example"
request_timeout_secs = 3"#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();
        let config: AppConfig = settings.try_deserialize().unwrap();

        assert_eq!(config.base_url, "https://bloom.example");
        assert_eq!(config.request_timeout_secs, 3);
        assert_eq!(config.listen_addr, DEFAULT_LISTEN_ADDR);
        assert_eq!(config.catalog_path, None);
    }
}
