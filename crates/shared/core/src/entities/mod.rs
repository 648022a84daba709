mod email;
mod waitlist;

pub use email::{validate_email, validate_phone};
pub use waitlist::{NewWaitlistEntry, ReferralSource, ValidationErrors, WaitlistSignup};
