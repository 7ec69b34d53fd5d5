//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::core::upload::UploadLimits;

/// Connection settings of the hosted store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Project URL, without the `/rest/v1` suffix
    pub base_url: String,

    /// Environment variable holding the API key
    pub api_key_env: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key_env: "ORCHARD_STORE_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

impl StoreConfig {
    /// Read the API key from the configured environment variable
    pub fn api_key(&self) -> Result<String, ConfigError> {
        std::env::var(&self.api_key_env).map_err(|_| ConfigError::Missing {
            field: self.api_key_env.clone(),
        })
    }
}

/// Complete configuration of the back office
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub uploads: UploadLimits,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.store.base_url.starts_with("http://") && !self.store.base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                field: "store.base_url".to_string(),
                message: format!("'{}' is not an http(s) URL", self.store.base_url),
            });
        }
        if self.store.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "store.timeout_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.uploads.max_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "uploads.max_bytes".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.uploads.accepted_types.is_empty() {
            return Err(ConfigError::Missing {
                field: "uploads.accepted_types".to_string(),
            });
        }
        Ok(())
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        Self::default()
    }
}
