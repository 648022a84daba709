//! Liftoff Clock Infrastructure
//!
//! Provides time abstractions for the countdown:
//!
//! ```text
//! SystemClock / ManualClock (local time)
//!     │
//!     └── ClockSync (local + offset measured against a TimeSource)
//!             │
//!             ├── primary:  server time RPC
//!             └── fallback: Date header of a HEAD request
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use liftoff_clock::{ClockSync, SyncConfig, SystemClock};
//! use std::sync::Arc;
//!
//! let sync = ClockSync::new(Arc::new(SystemClock::new()), backend, SyncConfig::default());
//!
//! // Refreshes the offset when it is older than a minute
//! let now = sync.now().await;
//!
//! // Never touches the network
//! let cached = sync.now_cached();
//! ```

mod config;
mod manual;
mod sync;
mod system;

pub use config::{SyncConfig, SyncFailurePolicy};
pub use manual::ManualClock;
pub use sync::{ClockOffset, ClockSync, SyncOutcome, SyncState};
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use liftoff_ports::Clock;
