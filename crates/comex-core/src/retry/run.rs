//! Retry loop: run an async operation until success or policy says stop.

use std::future::Future;

use super::classify;
use super::error::ExportError;
use super::policy::{RetryDecision, RetryPolicy};

/// Runs an operation until it succeeds or the retry policy says to stop.
/// On retryable failure, sleeps for the backoff duration then tries again.
/// When the server supplied an explicit wait (rate limit), that wait is
/// honored in place of the computed backoff.
pub async fn run_with_retry<T, F, Fut>(policy: &RetryPolicy, mut f: F) -> Result<T, ExportError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ExportError>>,
{
    let mut attempt = 1u32;
    loop {
        match f().await {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => return Err(e),
                    RetryDecision::RetryAfter(backoff) => {
                        let delay = match &e {
                            ExportError::RateLimited { wait } => *wait,
                            _ => backoff,
                        };
                        tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying after error: {}", e);
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                }
            }
        }
    }
}
