//! Liftoff Ports
//!
//! Port definitions (traits) for the Liftoff system.
//! These define the boundaries between domain logic and infrastructure:
//! the local clock, the external time source used for clock
//! synchronization, and the hosted waitlist store.

mod clock;
mod error;
mod time_source;
mod waitlist;

pub use clock::Clock;
pub use error::{StoreError, StoreResult, TimeSourceError, TimeSourceResult};
pub use time_source::TimeSource;
pub use waitlist::WaitlistStore;
