use chrono::{DateTime, Utc};

mod delta;

pub use delta::{TimeDelta, format_delta};

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Milliseconds in one day
pub const MILLIS_PER_DAY: u64 = 86_400_000;
/// Milliseconds in one hour
pub const MILLIS_PER_HOUR: u64 = 3_600_000;
/// Milliseconds in one minute
pub const MILLIS_PER_MINUTE: u64 = 60_000;
/// Milliseconds in one second
pub const MILLIS_PER_SECOND: u64 = 1_000;
