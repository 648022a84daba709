use liftoff_clock::{SyncConfig, SyncFailurePolicy};
use liftoff_retry::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiftoffConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub sync: SyncSettings,
    #[serde(default)]
    pub retry: RetryPolicy,
    #[serde(default)]
    pub countdown: CountdownSettings,
}

/// Connection to the hosted backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Project base URL, e.g. `https://xyz.example.co`
    pub url: String,
    /// Public (anon) API key, sent as `apikey` and bearer token
    #[serde(default)]
    pub api_key: String,
    /// Transport-level timeout for every request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, api_key: impl Into<String>) -> Self {
        BackendConfig {
            url: url.into(),
            api_key: api_key.into(),
            request_timeout_ms: default_request_timeout(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Clock synchronization settings (JSON representation)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncSettings {
    #[serde(default = "default_staleness")]
    pub staleness_ms: u64,
    #[serde(default = "default_measurement_timeout")]
    pub measurement_timeout_ms: u64,
    #[serde(default)]
    pub failure_policy: SyncFailurePolicy,
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            staleness_ms: default_staleness(),
            measurement_timeout_ms: default_measurement_timeout(),
            failure_policy: SyncFailurePolicy::default(),
        }
    }
}

impl SyncSettings {
    /// Convert to the clock crate's SyncConfig
    pub fn to_sync_config(&self) -> SyncConfig {
        SyncConfig::new()
            .with_staleness(Duration::from_millis(self.staleness_ms))
            .with_measurement_timeout(Duration::from_millis(self.measurement_timeout_ms))
            .with_failure_policy(self.failure_policy)
    }
}

/// Countdown display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountdownSettings {
    /// Interval between rendered frames
    #[serde(default = "default_tick")]
    pub tick_ms: u64,
}

impl Default for CountdownSettings {
    fn default() -> Self {
        CountdownSettings {
            tick_ms: default_tick(),
        }
    }
}

impl CountdownSettings {
    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

// Default value functions for serde
fn default_request_timeout() -> u64 {
    10_000
}

fn default_staleness() -> u64 {
    60_000
}

fn default_measurement_timeout() -> u64 {
    5_000
}

fn default_tick() -> u64 {
    1_000
}
