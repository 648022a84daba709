use chrono::Utc;
use liftoff_core::Timestamp;
use liftoff_ports::Clock;

/// Local wall clock
///
/// Uncorrected: wrap it in `ClockSync` to get server time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        SystemClock
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}
