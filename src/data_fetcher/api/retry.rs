//! Fixed-delay retry wrapper for remote calls

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::retry;
use crate::error::AppError;

/// How many times a remote call is attempted and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: retry::MAX_ATTEMPTS,
            backoff_delay: Duration::from_millis(retry::BACKOFF_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_delay,
        }
    }
}

/// Runs `request` until it succeeds or the attempt budget is spent.
///
/// `on_failure` is called with the attempt number (1-based) and the error of
/// every failed attempt. The wait between attempts is fixed and only happens
/// when another attempt follows. A [`AppError::GameNotFound`] answer is final
/// and returned as-is; any other exhausted run ends in
/// [`AppError::FetchExhausted`] carrying the last cause.
pub async fn fetch_with_retry<T, F, Fut, O>(
    policy: &RetryPolicy,
    mut request: F,
    mut on_failure: O,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
    O: FnMut(u32, &AppError),
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match request().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("Request succeeded on attempt {attempt}/{max_attempts}");
                }
                return Ok(value);
            }
            Err(e) if !e.is_retryable() => {
                debug!("Request failed with a final answer: {e}");
                return Err(e);
            }
            Err(e) => {
                on_failure(attempt, &e);

                if attempt >= max_attempts {
                    warn!("Giving up after {attempt} attempts: {e}");
                    return Err(AppError::fetch_exhausted(attempt, e));
                }

                warn!(
                    "Attempt {}/{} failed: {}. Retrying in {:?}",
                    attempt, max_attempts, e, policy.backoff_delay
                );
                tokio::time::sleep(policy.backoff_delay).await;
                attempt += 1;
            }
        }
    }
}
