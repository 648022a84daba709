use serde::{Deserialize, Serialize};
use std::fmt;

use super::{MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND, Timestamp};

/// Signed day/hour/minute/second breakdown of a millisecond duration
///
/// The magnitude fields always hold the absolute value of the input,
/// truncated to whole seconds. Only `days` is unbounded; the other fields
/// stay below their modulus.
///
/// A negative input smaller than one second in magnitude (e.g. -500 ms)
/// yields all-zero fields with `is_negative == true`, so it renders as
/// `-00:00:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimeDelta {
    pub days: u64,
    /// 0-23
    pub hours: u8,
    /// 0-59
    pub minutes: u8,
    /// 0-59
    pub seconds: u8,
    pub is_negative: bool,
}

impl TimeDelta {
    /// Decompose a signed millisecond count
    ///
    /// Total: every `i64`, including `i64::MIN`, produces a value.
    pub fn from_millis(milliseconds: i64) -> Self {
        let abs = milliseconds.unsigned_abs();

        let days = abs / MILLIS_PER_DAY;
        let hours = (abs % MILLIS_PER_DAY) / MILLIS_PER_HOUR;
        let minutes = (abs % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
        let seconds = (abs % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;

        Self {
            days,
            hours: hours as u8,
            minutes: minutes as u8,
            seconds: seconds as u8,
            is_negative: milliseconds < 0,
        }
    }

    /// Delta from `now` until `target` (negative once the target has passed)
    pub fn between(target: Timestamp, now: Timestamp) -> Self {
        Self::from_millis((target - now).num_milliseconds())
    }

    /// Magnitude in milliseconds, truncated to whole seconds
    pub fn total_millis(&self) -> u64 {
        self.days * MILLIS_PER_DAY
            + u64::from(self.hours) * MILLIS_PER_HOUR
            + u64::from(self.minutes) * MILLIS_PER_MINUTE
            + u64::from(self.seconds) * MILLIS_PER_SECOND
    }

    /// True when every magnitude field is zero (regardless of sign)
    pub fn is_zero(&self) -> bool {
        self.total_millis() == 0
    }
}

impl fmt::Display for TimeDelta {
    /// Renders `[-]DD:HH:MM:SS`; days keep a minimum width of two but are never truncated
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative { "-" } else { "" };
        write!(
            f,
            "{}{:02}:{:02}:{:02}:{:02}",
            sign, self.days, self.hours, self.minutes, self.seconds
        )
    }
}

impl From<i64> for TimeDelta {
    fn from(milliseconds: i64) -> Self {
        Self::from_millis(milliseconds)
    }
}

/// Format a signed millisecond count as `[-]DD:HH:MM:SS`
pub fn format_delta(milliseconds: i64) -> String {
    TimeDelta::from_millis(milliseconds).to_string()
}
