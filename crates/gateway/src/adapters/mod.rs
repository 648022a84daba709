//! Backend adapters
//!
//! Adapters implement the Liftoff ports on top of the hosted backend's
//! REST interface.

pub mod rest;

pub use rest::BackendClient;
