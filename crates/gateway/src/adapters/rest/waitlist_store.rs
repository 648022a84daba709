use async_trait::async_trait;
use liftoff_core::{NewWaitlistEntry, Timestamp};
use liftoff_ports::{StoreError, StoreResult, WaitlistStore};
use log::{debug, warn};
use reqwest::{Method, StatusCode, header::CONTENT_RANGE};

use super::BackendClient;
use crate::error::RestError;
use crate::messages::{SettingsRow, parse_content_range_total};

impl BackendClient {
    /// Insert a waitlist row: `POST /rest/v1/waitlist`
    pub async fn insert_entry(&self, entry: &NewWaitlistEntry) -> Result<(), StoreError> {
        let resp = self
            .request(Method::POST, "/waitlist")
            .header("Prefer", "return=minimal")
            .json(entry)
            .send()
            .await
            .map_err(RestError::from)?;

        if resp.status() == StatusCode::CONFLICT {
            return Err(StoreError::Duplicate);
        }
        Self::check_status(resp).await?;
        debug!("Added {} to the waitlist", entry.email);
        Ok(())
    }

    /// Exact count of live (not soft-deleted) rows from the `Content-Range`
    /// of a counting `HEAD`
    pub async fn count_from_header(&self) -> Result<u64, RestError> {
        let headers = self
            .head("/waitlist?select=*&is_deleted=eq.false", Some("count=exact"))
            .await?;
        let range = headers
            .get(CONTENT_RANGE)
            .ok_or(RestError::MissingHeader("content-range"))?
            .to_str()
            .map_err(|e| RestError::Parse(e.to_string()))?;
        parse_content_range_total(range)
    }

    /// Launch date from the `settings` row keyed `launch`
    pub async fn get_launch_date(&self) -> Result<Option<Timestamp>, RestError> {
        let rows: Vec<SettingsRow> = self.get("/settings?key=eq.launch&select=value").await?;
        match rows.first() {
            Some(row) => row.launch_date(),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl WaitlistStore for BackendClient {
    async fn insert(&self, entry: &NewWaitlistEntry) -> StoreResult<()> {
        self.insert_entry(entry).await
    }

    /// Falls back to the `get_waitlist_count` function when the header count is unavailable
    async fn count(&self) -> StoreResult<u64> {
        match self.count_from_header().await {
            Ok(count) => Ok(count),
            Err(e) => {
                warn!("Header count failed ({}); trying rpc", e);
                Ok(self.rpc::<u64>("get_waitlist_count").await?)
            }
        }
    }

    async fn launch_date(&self) -> StoreResult<Option<Timestamp>> {
        Ok(self.get_launch_date().await?)
    }
}
