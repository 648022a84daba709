//! Liftoff Retry
//!
//! Retries a fallible async operation with exponentially growing delays.
//!
//! Attempt 1 runs immediately; attempt `k >= 2` is preceded by a wait of
//! `initial_delay * 2^(k-2)`. The last failure is returned unchanged, and
//! every failure is retried the same way. Callers that need to stop early
//! on some error kinds must filter before calling.
//!
//! ```ignore
//! use liftoff_retry::{RetryPolicy, retry};
//!
//! let count = retry(&RetryPolicy::default(), || store.count()).await?;
//! ```

mod policy;

pub use policy::RetryPolicy;

use log::debug;
use std::fmt::Display;
use std::future::Future;

/// Run `operation` until it succeeds or `policy.max_attempts` attempts have failed
pub async fn retry<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= max_attempts => {
                debug!("Attempt {}/{} failed, giving up: {}", attempt, max_attempts, e);
                return Err(e);
            }
            Err(e) => {
                attempt += 1;
                let delay = policy.delay_before(attempt);
                debug!(
                    "Attempt {}/{} failed: {}; retrying in {:?}",
                    attempt - 1,
                    max_attempts,
                    e,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// [`retry`] with the default policy (3 attempts, 1 s initial delay)
pub async fn retry_with_backoff<T, E, F, Fut>(operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    retry(&RetryPolicy::default(), operation).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    /// Fails the first `failures` calls, then returns the call number
    fn flaky(
        failures: u32,
        calls: Arc<AtomicU32>,
    ) -> impl FnMut() -> std::future::Ready<Result<u32, String>> {
        move || {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n <= failures {
                std::future::ready(Err(format!("failure #{}", n)))
            } else {
                std::future::ready(Ok(n))
            }
        }
    }

    fn assert_elapsed(began: Instant, expected_ms: u64) {
        let elapsed = began.elapsed();
        assert!(
            elapsed >= Duration::from_millis(expected_ms)
                && elapsed < Duration::from_millis(expected_ms + 10),
            "elapsed {:?}, expected {} ms",
            elapsed,
            expected_ms
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_after_two_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(3, Duration::from_millis(1_000));

        let began = Instant::now();
        let result = retry(&policy, flaky(2, calls.clone())).await;

        assert_eq!(result, Ok(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1 s before attempt 2, 2 s before attempt 3
        assert_elapsed(began, 3_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_surfaces_last_error_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(3, Duration::from_millis(1_000));

        let began = Instant::now();
        let result = retry(&policy, flaky(u32::MAX, calls.clone())).await;

        assert_eq!(result, Err("failure #3".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_elapsed(began, 3_000);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_success_short_circuits() {
        let calls = Arc::new(AtomicU32::new(0));

        let began = Instant::now();
        let result = retry_with_backoff(flaky(0, calls.clone())).await;

        assert_eq!(result, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(began.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_attempts_runs_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(0, Duration::from_millis(10));

        let result = retry(&policy, flaky(u32::MAX, calls.clone())).await;

        assert_eq!(result, Err("failure #1".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_independent_calls_do_not_share_state() {
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));
        let policy = RetryPolicy::new(2, Duration::from_millis(100));

        let (a, b) = tokio::join!(
            retry(&policy, flaky(1, first.clone())),
            retry(&policy, flaky(5, second.clone())),
        );

        assert_eq!(a, Ok(2));
        assert_eq!(b, Err("failure #2".to_string()));
        assert_eq!(first.load(Ordering::SeqCst), 2);
        assert_eq!(second.load(Ordering::SeqCst), 2);
    }
}
