use thiserror::Error;

/// Failures of a single external time measurement
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeSourceError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Response carried no {0} header")]
    MissingHeader(&'static str),

    #[error("Unparseable timestamp: {0}")]
    Parse(String),

    #[error("Measurement timed out after {0} ms")]
    Timeout(u64),
}

pub type TimeSourceResult<T> = std::result::Result<T, TimeSourceError>;

/// Failures of the waitlist store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("You're already on the waitlist!")]
    Duplicate,

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error: {code} - {message}")]
    Api { code: String, message: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
