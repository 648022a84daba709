use async_trait::async_trait;
use liftoff_core::Timestamp;

use crate::error::TimeSourceResult;

/// Port for an authoritative external clock
///
/// Both methods take a single sample with no latency compensation, so
/// precision is bounded by one network round trip.
#[async_trait]
pub trait TimeSource: Send + Sync {
    /// Primary measurement: ask the service for its current time
    async fn server_time(&self) -> TimeSourceResult<Timestamp>;

    /// Fallback measurement: read the `Date` header of a lightweight request
    async fn date_header(&self) -> TimeSourceResult<Timestamp>;
}
