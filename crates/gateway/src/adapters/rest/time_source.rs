use async_trait::async_trait;
use liftoff_core::Timestamp;
use liftoff_ports::{TimeSource, TimeSourceResult};
use log::debug;
use reqwest::header::DATE;

use super::BackendClient;
use crate::error::RestError;
use crate::messages::{ServerTimeValue, parse_http_date};

impl BackendClient {
    /// Server time from the `get_server_time` database function
    pub async fn get_server_time(&self) -> Result<Timestamp, RestError> {
        let value: ServerTimeValue = self.rpc("get_server_time").await?;
        let ts = value.to_timestamp()?;
        debug!("Server time via rpc: {}", ts);
        Ok(ts)
    }

    /// Server time from the `Date` header of `HEAD /rest/v1/`
    pub async fn get_date_header(&self) -> Result<Timestamp, RestError> {
        let headers = self.head("/", None).await?;
        let date = headers
            .get(DATE)
            .ok_or(RestError::MissingHeader("date"))?
            .to_str()
            .map_err(|e| RestError::Parse(e.to_string()))?;
        let ts = parse_http_date(date)?;
        debug!("Server time via Date header: {}", ts);
        Ok(ts)
    }
}

/// Implement TimeSource for BackendClient (Dependency Inversion)
///
/// Converts infrastructure RestError to the port's TimeSourceError.
#[async_trait]
impl TimeSource for BackendClient {
    async fn server_time(&self) -> TimeSourceResult<Timestamp> {
        Ok(self.get_server_time().await?)
    }

    async fn date_header(&self) -> TimeSourceResult<Timestamp> {
        Ok(self.get_date_header().await?)
    }
}
