use chrono::Duration;
use liftoff_core::Timestamp;
use liftoff_ports::{Clock, TimeSource, TimeSourceError, TimeSourceResult};
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::{SyncConfig, SyncFailurePolicy};

/// Estimated `server - local` difference and when it was measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockOffset {
    /// Milliseconds to add to the local clock to approximate server time
    pub offset_ms: i64,
    /// Local time at which the measurement completed
    pub measured_at: Timestamp,
}

/// Synchronization state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// No successful measurement yet: corrected time equals local time
    #[default]
    Unsynced,
    /// Last successful measurement
    Synced(ClockOffset),
}

impl SyncState {
    pub fn offset_ms(&self) -> i64 {
        match self {
            SyncState::Unsynced => 0,
            SyncState::Synced(offset) => offset.offset_ms,
        }
    }

    pub fn is_synced(&self) -> bool {
        matches!(self, SyncState::Synced(_))
    }
}

/// Which measurement (if any) a synchronization attempt used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Primary,
    Fallback,
    Failed,
}

/// Server-corrected clock
///
/// Keeps a best-effort estimate of the offset between the local clock and
/// an external time source, so "now" can be corrected without a network
/// call per read.
///
/// Refreshes are serialized: at most one measurement is in flight per
/// instance, and callers that queued behind it reuse its result.
pub struct ClockSync {
    clock: Arc<dyn Clock>,
    source: Arc<dyn TimeSource>,
    config: SyncConfig,
    state: RwLock<SyncState>,
    refresh: Mutex<()>,
}

impl ClockSync {
    /// Create an unsynced clock over the given local clock and time source
    pub fn new(
        clock: Arc<dyn Clock>,
        source: Arc<dyn TimeSource>,
        config: SyncConfig,
    ) -> Arc<Self> {
        debug!(
            "Clock sync over {} (staleness {:?})",
            clock.name(),
            config.staleness
        );
        Arc::new(Self {
            clock,
            source,
            config,
            state: RwLock::new(SyncState::Unsynced),
            refresh: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Current synchronization state
    pub fn state(&self) -> SyncState {
        *self.state.read()
    }

    /// Offset currently applied to the local clock (0 when unsynced)
    pub fn offset_ms(&self) -> i64 {
        self.state.read().offset_ms()
    }

    /// True when unsynced or when the last measurement is older than the staleness threshold
    pub fn is_stale(&self) -> bool {
        match self.state() {
            SyncState::Unsynced => true,
            SyncState::Synced(offset) => {
                let age_ms = (self.clock.now() - offset.measured_at).num_milliseconds();
                let threshold_ms =
                    i64::try_from(self.config.staleness.as_millis()).unwrap_or(i64::MAX);
                age_ms > threshold_ms
            }
        }
    }

    /// Corrected time, refreshing the offset first if it is missing or stale
    ///
    /// A failed refresh is not an error: the previous offset (or none) is used.
    /// It also leaves the clock stale, so while the source is unreachable every
    /// read measures again and can wait up to twice `measurement_timeout`.
    pub async fn now(&self) -> Timestamp {
        if self.is_stale() {
            let _guard = self.refresh.lock().await;
            // Another caller may have refreshed while we waited for the lock
            if self.is_stale() && self.sync_locked().await == SyncOutcome::Failed {
                debug!("Clock still stale after failed refresh; next read measures again");
            }
        }
        self.now_cached()
    }

    /// Corrected time using whatever offset is current, without touching the network
    pub fn now_cached(&self) -> Timestamp {
        self.clock.now() + Duration::milliseconds(self.offset_ms())
    }

    /// Measure the external clock once, falling back to the `Date` header
    ///
    /// Never fails; the outcome only reports which measurement was used.
    pub async fn sync(&self) -> SyncOutcome {
        let _guard = self.refresh.lock().await;
        self.sync_locked().await
    }

    async fn sync_locked(&self) -> SyncOutcome {
        match self.measure(self.source.server_time()).await {
            Ok(server_time) => {
                self.record(server_time, SyncOutcome::Primary);
                return SyncOutcome::Primary;
            }
            Err(e) => debug!("Primary time measurement failed: {}", e),
        }

        match self.measure(self.source.date_header()).await {
            Ok(server_time) => {
                self.record(server_time, SyncOutcome::Fallback);
                SyncOutcome::Fallback
            }
            Err(e) => {
                self.on_failure(&e);
                SyncOutcome::Failed
            }
        }
    }

    async fn measure<F>(&self, measurement: F) -> TimeSourceResult<Timestamp>
    where
        F: Future<Output = TimeSourceResult<Timestamp>>,
    {
        let timeout = self.config.measurement_timeout;
        match tokio::time::timeout(timeout, measurement).await {
            Ok(result) => result,
            Err(_) => Err(TimeSourceError::Timeout(timeout.as_millis() as u64)),
        }
    }

    fn record(&self, server_time: Timestamp, via: SyncOutcome) {
        let measured_at = self.clock.now();
        let offset = ClockOffset {
            offset_ms: (server_time - measured_at).num_milliseconds(),
            measured_at,
        };

        let previous = std::mem::replace(&mut *self.state.write(), SyncState::Synced(offset));
        if previous.offset_ms() != offset.offset_ms || !previous.is_synced() {
            info!("Clock synced via {:?}: offset {} ms", via, offset.offset_ms);
        } else {
            debug!("Clock re-synced via {:?}: offset unchanged", via);
        }
    }

    fn on_failure(&self, last_error: &TimeSourceError) {
        let mut state = self.state.write();
        match (self.config.failure_policy, *state) {
            (SyncFailurePolicy::KeepStale, SyncState::Synced(offset)) => {
                warn!(
                    "Clock sync failed ({}); keeping previous offset of {} ms",
                    last_error, offset.offset_ms
                );
            }
            (SyncFailurePolicy::KeepStale, SyncState::Unsynced) => {
                warn!("Clock sync failed ({}); assuming no skew", last_error);
            }
            (SyncFailurePolicy::ResetToZero, _) => {
                warn!("Clock sync failed ({}); resetting offset to 0", last_error);
                *state = SyncState::Unsynced;
            }
        }
    }
}

impl Clock for ClockSync {
    fn now(&self) -> Timestamp {
        self.now_cached()
    }

    fn name(&self) -> &str {
        "ClockSync"
    }
}
