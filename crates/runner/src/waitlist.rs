//! Waitlist signup service
//!
//! Validates visitor input, then writes through the `WaitlistStore` port
//! with exponential backoff.

use liftoff_core::{NewWaitlistEntry, Timestamp, ValidationErrors, WaitlistSignup};
use liftoff_ports::{StoreError, WaitlistStore};
use liftoff_retry::{RetryPolicy, retry};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum JoinError {
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl JoinError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, JoinError::Store(StoreError::Duplicate))
    }
}

/// Application service over the waitlist store
pub struct WaitlistService {
    store: Arc<dyn WaitlistStore>,
    retry: RetryPolicy,
}

impl WaitlistService {
    pub fn new(store: Arc<dyn WaitlistStore>) -> Self {
        Self::with_retry(store, RetryPolicy::default())
    }

    pub fn with_retry(store: Arc<dyn WaitlistStore>, retry: RetryPolicy) -> Self {
        Self { store, retry }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Validate and store a signup, returning the normalized entry
    ///
    /// Validation failures never reach the store. Transient store errors are
    /// retried; a duplicate email is returned on first sight.
    pub async fn join(&self, signup: &WaitlistSignup) -> Result<NewWaitlistEntry, JoinError> {
        let entry = signup.validate()?;

        let store = &self.store;
        let row = &entry;
        let outcome = retry(&self.retry, || async move {
            match store.insert(row).await {
                Err(StoreError::Duplicate) => Ok(Err(StoreError::Duplicate)),
                other => other.map(Ok),
            }
        })
        .await;

        match outcome.and_then(|inner| inner) {
            Ok(()) => {
                log::info!("Joined waitlist: {}", entry.email);
                Ok(entry)
            }
            Err(StoreError::Duplicate) => {
                log::info!("Already on waitlist: {}", entry.email);
                Err(StoreError::Duplicate.into())
            }
            Err(e) => {
                log::warn!("Waitlist insert failed for {}: {}", entry.email, e);
                Err(e.into())
            }
        }
    }

    /// Total number of signups
    pub async fn count(&self) -> Result<u64, StoreError> {
        let store = &self.store;
        retry(&self.retry, || store.count()).await
    }

    /// Configured launch instant, if the backend has one
    pub async fn launch_date(&self) -> Result<Option<Timestamp>, StoreError> {
        self.store.launch_date().await
    }
}
