use log::debug;
use std::path::Path;
use thiserror::Error;

use super::types::LiftoffConfig;

/// Environment variable overriding `backend.url`
pub const ENV_BACKEND_URL: &str = "LIFTOFF_BACKEND_URL";
/// Environment variable overriding `backend.api_key`
pub const ENV_API_KEY: &str = "LIFTOFF_API_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Backend URL is empty")]
    MissingBackendUrl,
    #[error("Invalid setting: {0}")]
    Invalid(&'static str),
}

/// Load configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LiftoffConfig, ConfigError> {
    let path = path.as_ref();
    debug!("Loading config from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<LiftoffConfig, ConfigError> {
    let config: LiftoffConfig = serde_json::from_str(json)?;
    Ok(config)
}

/// Load the default embedded configuration
pub fn load_default_config() -> Result<LiftoffConfig, ConfigError> {
    let default_config = include_str!("backend_config.json");
    load_config_from_str(default_config)
}

impl LiftoffConfig {
    /// Apply `LIFTOFF_BACKEND_URL` / `LIFTOFF_API_KEY` from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup; blank values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_blank(ENV_BACKEND_URL) {
            debug!("Backend URL overridden by {}", ENV_BACKEND_URL);
            self.backend.url = url;
        }
        if let Some(key) = non_blank(ENV_API_KEY) {
            self.backend.api_key = key;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.url.trim().is_empty() {
            return Err(ConfigError::MissingBackendUrl);
        }
        if self.sync.staleness_ms == 0 {
            return Err(ConfigError::Invalid("sync.staleness_ms must be positive"));
        }
        if self.countdown.tick_ms == 0 {
            return Err(ConfigError::Invalid("countdown.tick_ms must be positive"));
        }
        Ok(())
    }
}
