//! Wire messages exchanged with the hosted backend
//!
//! Parsing is kept free of I/O so the formats can be tested directly.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use liftoff_core::Timestamp;
use serde::Deserialize;

use crate::error::RestError;

/// Result of the `get_server_time` RPC
///
/// The function may return a timestamptz string or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ServerTimeValue {
    Text(String),
    EpochMillis(i64),
}

impl ServerTimeValue {
    pub fn to_timestamp(&self) -> Result<Timestamp, RestError> {
        match self {
            ServerTimeValue::Text(text) => parse_timestamp(text),
            ServerTimeValue::EpochMillis(ms) => Utc
                .timestamp_millis_opt(*ms)
                .single()
                .ok_or_else(|| RestError::Parse(format!("epoch millis out of range: {}", ms))),
        }
    }
}

/// Error body returned by the REST layer on failure
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Row of the `settings` table
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsRow {
    pub value: serde_json::Value,
}

impl SettingsRow {
    /// Launch instant stored under `value.date`, if present
    pub fn launch_date(&self) -> Result<Option<Timestamp>, RestError> {
        match self.value.get("date").and_then(|d| d.as_str()) {
            Some(date) if !date.trim().is_empty() => parse_timestamp(date).map(Some),
            _ => Ok(None),
        }
    }
}

/// Parse an RFC 3339 timestamp, accepting a bare `YYYY-MM-DD` as midnight UTC
pub fn parse_timestamp(text: &str) -> Result<Timestamp, RestError> {
    let text = text.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(text) {
        return Ok(ts.with_timezone(&Utc));
    }
    // Postgres renders timestamptz with a space separator and short offset
    if let Ok(ts) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| RestError::Parse(format!("invalid timestamp: {}", text)))
}

/// Parse an HTTP `Date` header (IMF-fixdate, e.g. `Sun, 06 Nov 1994 08:49:37 GMT`)
pub fn parse_http_date(text: &str) -> Result<Timestamp, RestError> {
    DateTime::parse_from_rfc2822(text.trim())
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| RestError::Parse(format!("invalid Date header {:?}: {}", text, e)))
}

/// Total row count from a `Content-Range` header (`0-24/3573` or `*/3573`)
pub fn parse_content_range_total(text: &str) -> Result<u64, RestError> {
    text.rsplit_once('/')
        .and_then(|(_, total)| total.trim().parse().ok())
        .ok_or_else(|| RestError::Parse(format!("no total in Content-Range: {}", text)))
}
