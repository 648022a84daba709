//! Bootstrap - wiring from configuration
//!
//! Builds the shared backend client and hands it to every port:
//! - `TimeSource` for the synced clock
//! - `WaitlistStore` for the signup service

use liftoff_clock::{ClockSync, SystemClock};
use liftoff_core::Timestamp;
use liftoff_gateway::{BackendClient, LiftoffConfig, RestError};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::countdown::CountdownService;
use crate::waitlist::WaitlistService;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Failed to build backend client: {0}")]
    Client(#[from] RestError),
}

/// Everything the binary needs, built once from config
pub struct Bootstrap {
    pub backend: Arc<BackendClient>,
    pub clock: Arc<ClockSync>,
    pub waitlist: WaitlistService,
    pub tick: Duration,
}

impl Bootstrap {
    pub fn from_config(config: &LiftoffConfig) -> Result<Self, BootstrapError> {
        let backend = Arc::new(BackendClient::new(&config.backend)?);

        let clock = ClockSync::new(
            Arc::new(SystemClock::new()),
            backend.clone(),
            config.sync.to_sync_config(),
        );
        let waitlist = WaitlistService::with_retry(backend.clone(), config.retry);

        log::info!(
            "Bootstrapped against {} (staleness {} ms, {} attempts)",
            backend.base_url(),
            config.sync.staleness_ms,
            config.retry.attempts()
        );

        Ok(Self {
            backend,
            clock,
            waitlist,
            tick: config.countdown.tick(),
        })
    }

    /// Countdown to `target` over the shared synced clock
    pub fn countdown(&self, target: Timestamp) -> CountdownService {
        CountdownService::new(self.clock.clone(), target)
    }
}
