use async_trait::async_trait;
use liftoff_core::{NewWaitlistEntry, Timestamp};

use crate::error::StoreResult;

/// Port for the hosted waitlist backend
#[async_trait]
pub trait WaitlistStore: Send + Sync {
    /// Insert a validated entry. Fails with `StoreError::Duplicate` if the email is taken.
    async fn insert(&self, entry: &NewWaitlistEntry) -> StoreResult<()>;

    /// Number of people on the waitlist
    async fn count(&self) -> StoreResult<u64>;

    /// Configured launch instant, if one has been set
    async fn launch_date(&self) -> StoreResult<Option<Timestamp>>;
}
