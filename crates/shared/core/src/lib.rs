//! Liftoff Core Domain
//!
//! Pure domain values for the Liftoff launch page: the countdown delta,
//! email validation and waitlist signups.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    NewWaitlistEntry, ReferralSource, ValidationErrors, WaitlistSignup, validate_email,
    validate_phone,
};
pub use values::{TimeDelta, Timestamp, format_delta};
