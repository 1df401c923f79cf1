use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::utils::error::{NavError, Result};

/// Connection settings for the NAV service.
///
/// Request paths are resolved against `base_url` per call; everything else
/// here configures the underlying HTTP client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

impl ConnectorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_seconds: None,
            headers: None,
        }
    }

    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded connector config from: {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.base_url).map_err(|e| NavError::ConfigError {
            message: format!("invalid base_url '{}': {}", self.base_url, e),
        })?;

        if self.timeout_seconds == Some(0) {
            return Err(NavError::ConfigError {
                message: "timeout_seconds must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }
}
