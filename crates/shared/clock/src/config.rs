use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What a fully failed synchronization does to an existing measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncFailurePolicy {
    /// Keep the last successful offset; stay unsynced (offset 0) if there never was one
    #[default]
    KeepStale,
    /// Drop back to unsynced (offset 0) even if a prior offset exists
    ResetToZero,
}

/// Configuration for server clock synchronization
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Maximum age of a measurement before the next read refreshes it
    pub staleness: Duration,
    /// Upper bound on each individual measurement (primary and fallback)
    pub measurement_timeout: Duration,
    /// Behavior when both measurements fail
    pub failure_policy: SyncFailurePolicy,
}

impl SyncConfig {
    pub const DEFAULT_STALENESS: Duration = Duration::from_secs(60);
    pub const DEFAULT_MEASUREMENT_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new() -> Self {
        SyncConfig {
            staleness: Self::DEFAULT_STALENESS,
            measurement_timeout: Self::DEFAULT_MEASUREMENT_TIMEOUT,
            failure_policy: SyncFailurePolicy::KeepStale,
        }
    }

    pub fn with_staleness(mut self, staleness: Duration) -> Self {
        self.staleness = staleness;
        self
    }

    pub fn with_measurement_timeout(mut self, timeout: Duration) -> Self {
        self.measurement_timeout = timeout;
        self
    }

    pub fn with_failure_policy(mut self, policy: SyncFailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new()
    }
}
