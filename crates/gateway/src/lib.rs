//! Liftoff Gateway
//!
//! Gateway layer between Liftoff and its hosted backend. Provides:
//! - A REST adapter implementing the `TimeSource` and `WaitlistStore` ports
//! - Wire message types for the backend's REST/RPC responses
//! - JSON configuration loading
//!
//! ## Architecture
//!
//! ```text
//!  ClockSync            WaitlistService
//!      │ TimeSource          │ WaitlistStore
//!      └──────────┬──────────┘
//!            ┌────▼────┐
//!            │ Backend │  apikey + bearer auth
//!            │ Client  │
//!            └────┬────┘
//!                 │ /rest/v1/rpc/get_server_time   (primary time)
//!                 │ HEAD /rest/v1/  -> Date        (fallback time)
//!                 │ /rest/v1/waitlist, /settings
//!            ┌────▼────┐
//!            │ Hosted  │
//!            │ backend │
//!            └─────────┘
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod messages;

// Re-export commonly used types
pub use adapters::BackendClient;
pub use config::{
    BackendConfig, ConfigError, CountdownSettings, LiftoffConfig, SyncSettings, load_config,
    load_config_from_str, load_default_config,
};
pub use error::RestError;
