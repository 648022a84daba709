//! Error types for the gateway crate

use liftoff_ports::{StoreError, TimeSourceError};
use thiserror::Error;

/// Postgres unique-violation code reported by the backend
pub const UNIQUE_VIOLATION: &str = "23505";

/// REST-level errors
#[derive(Error, Debug)]
pub enum RestError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {code} - {msg}")]
    Api { code: String, msg: String },

    #[error("Missing {0} header")]
    MissingHeader(&'static str),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl RestError {
    /// True for unique-constraint violations (email already on the waitlist)
    pub fn is_duplicate(&self) -> bool {
        match self {
            RestError::Api { code, msg } => code == UNIQUE_VIOLATION || msg.contains("unique"),
            _ => false,
        }
    }
}

/// Convert infrastructure RestError to the time source port error
impl From<RestError> for TimeSourceError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Http(e) => TimeSourceError::Network(e.to_string()),
            RestError::Api { code, msg } => {
                TimeSourceError::Network(format!("{} - {}", code, msg))
            }
            RestError::MissingHeader(name) => TimeSourceError::MissingHeader(name),
            RestError::Parse(msg) => TimeSourceError::Parse(msg),
        }
    }
}

/// Convert infrastructure RestError to the waitlist store port error
impl From<RestError> for StoreError {
    fn from(err: RestError) -> Self {
        if err.is_duplicate() {
            return StoreError::Duplicate;
        }
        match err {
            RestError::Http(e) => StoreError::Network(e.to_string()),
            RestError::Api { code, msg } => StoreError::Api { code, message: msg },
            RestError::MissingHeader(name) => {
                StoreError::Parse(format!("missing {} header", name))
            }
            RestError::Parse(msg) => StoreError::Parse(msg),
        }
    }
}
