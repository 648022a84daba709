//! Countdown - server-synced launch countdown
//!
//! Each frame reads the corrected time from `ClockSync` (refreshing the
//! offset when stale), subtracts it from the target and formats the delta.

use liftoff_clock::ClockSync;
use liftoff_core::{TimeDelta, Timestamp};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// One rendered state of the countdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownFrame {
    pub delta: TimeDelta,
    /// `[-]DD:HH:MM:SS`
    pub display: String,
    pub headline: &'static str,
}

impl CountdownFrame {
    pub const BEFORE_LAUNCH: &'static str = "Launching in";
    pub const AFTER_LAUNCH: &'static str = "Launched";

    /// Build the frame for `now` against `target`
    pub fn at(target: Timestamp, now: Timestamp) -> Self {
        let delta = TimeDelta::between(target, now);
        CountdownFrame {
            display: delta.to_string(),
            headline: if delta.is_negative {
                Self::AFTER_LAUNCH
            } else {
                Self::BEFORE_LAUNCH
            },
            delta,
        }
    }

    pub fn launched(&self) -> bool {
        self.delta.is_negative
    }
}

impl fmt::Display for CountdownFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.headline, self.display)
    }
}

/// Periodic countdown driver
pub struct CountdownService {
    clock: Arc<ClockSync>,
    target: Timestamp,
}

impl CountdownService {
    pub fn new(clock: Arc<ClockSync>, target: Timestamp) -> Self {
        Self { clock, target }
    }

    pub fn target(&self) -> Timestamp {
        self.target
    }

    /// Move the launch instant (e.g. after the backend setting changes)
    pub fn set_target(&mut self, target: Timestamp) {
        log::info!("Countdown target moved to {}", target);
        self.target = target;
    }

    /// Frame for the current server-corrected time
    pub async fn frame(&self) -> CountdownFrame {
        let now = self.clock.now().await;
        CountdownFrame::at(self.target, now)
    }

    /// Emit a frame every `tick`, `ticks` times (forever when `None`)
    ///
    /// The first frame is emitted immediately. Ticks missed while a clock
    /// refresh is in flight are skipped rather than replayed.
    pub async fn run<F>(&self, tick: Duration, ticks: Option<u64>, mut sink: F)
    where
        F: FnMut(&CountdownFrame),
    {
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut emitted = 0u64;
        while ticks.is_none_or(|limit| emitted < limit) {
            interval.tick().await;
            let frame = self.frame().await;
            sink(&frame);
            emitted += 1;
        }
        log::debug!("Countdown stopped after {} frames", emitted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};

    fn launch() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_frame_before_launch() {
        let now = launch() - ChronoDuration::days(2) - ChronoDuration::hours(3);
        let frame = CountdownFrame::at(launch(), now);

        assert_eq!(frame.display, "02:03:00:00");
        assert_eq!(frame.headline, CountdownFrame::BEFORE_LAUNCH);
        assert!(!frame.launched());
        assert_eq!(frame.to_string(), "Launching in 02:03:00:00");
    }

    #[test]
    fn test_frame_after_launch() {
        let now = launch() + ChronoDuration::seconds(61);
        let frame = CountdownFrame::at(launch(), now);

        assert_eq!(frame.display, "-00:00:01:01");
        assert_eq!(frame.headline, CountdownFrame::AFTER_LAUNCH);
        assert!(frame.launched());
    }

    #[test]
    fn test_frame_at_launch_instant() {
        let frame = CountdownFrame::at(launch(), launch());
        assert_eq!(frame.display, "00:00:00:00");
        assert!(!frame.launched());
    }
}
