//! Liftoff Runner - launch countdown and waitlist
//!
//! Wires the shared kernel to the hosted backend:
//!
//! - **Bootstrap**: Builds the backend client, synced clock and services from config
//! - **Countdown**: Periodic driver rendering `[-]DD:HH:MM:SS` against server-corrected time
//! - **Waitlist**: Validated, retried signup plus count and launch date lookups
//!
//! ## Architecture
//!
//! ```text
//!        ┌────────────────────┐      ┌────────────────────┐
//!        │  CountdownService  │      │  WaitlistService   │
//!        └─────────┬──────────┘      └─────────┬──────────┘
//!                  │ now()                     │ retry(insert)
//!        ┌─────────▼──────────┐                │
//!        │     ClockSync      │                │
//!        │ SystemClock+offset │                │
//!        └─────────┬──────────┘                │
//!                  │ TimeSource                │ WaitlistStore
//!                  └─────────────┬─────────────┘
//!                     ┌──────────▼──────────┐
//!                     │    BackendClient    │
//!                     └─────────────────────┘
//! ```

pub mod bootstrap;
pub mod countdown;
pub mod waitlist;

// Re-export main types
pub use bootstrap::{Bootstrap, BootstrapError};
pub use countdown::{CountdownFrame, CountdownService};
pub use waitlist::{JoinError, WaitlistService};
