// Retry logic with Retry-After hint support
// Author: kelexine (https://github.com/kelexine)

use backoff::{backoff::Backoff, ExponentialBackoff};
use std::time::Duration;
use tracing::debug;

/// Longest wait honored from a `Retry-After` hint.
const MAX_HINTED_DELAY: Duration = Duration::from_secs(10);

/// A failed attempt as seen by the retry loop.
#[derive(Debug, Clone, PartialEq)]
pub struct AttemptError {
    /// HTTP status of the failed call, `0` when no response was received.
    pub status: u16,
    pub message: String,
    /// Delay requested by the upstream (`Retry-After`), if any.
    pub retry_after: Option<Duration>,
}

impl AttemptError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            retry_after: None,
        }
    }

    pub fn with_retry_after(mut self, retry_after: Option<Duration>) -> Self {
        self.retry_after = retry_after;
        self
    }
}

/// Parse a `Retry-After` header value given in seconds (e.g. "2", "0.5").
/// Returns the duration capped at ten seconds.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let seconds: f64 = value.trim().parse().ok()?;
    if !seconds.is_finite() || seconds < 0.0 {
        return None;
    }
    Some(Duration::from_secs_f64(
        seconds.min(MAX_HINTED_DELAY.as_secs_f64()),
    ))
}

/// Create exponential backoff configuration for retries
pub fn create_backoff() -> ExponentialBackoff {
    ExponentialBackoff {
        current_interval: Duration::from_millis(200),
        initial_interval: Duration::from_millis(200),
        randomization_factor: 0.3,
        multiplier: 2.0,
        max_interval: Duration::from_secs(5),
        max_elapsed_time: Some(Duration::from_secs(30)),
        ..Default::default()
    }
}

/// Determine if an HTTP status code is retryable.
/// Status `0` stands for a transport failure (timeout, refused connection).
pub fn is_retryable(status: u16) -> bool {
    matches!(status, 0 | 429 | 500 | 502 | 503 | 504)
}

/// Execute an operation, retrying transient failures.
/// - Uses the upstream `Retry-After` hint if available
/// - Falls back to exponential backoff
/// - Makes at most `max_retries + 1` attempts
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    max_retries: u32,
    mut operation: F,
) -> Result<T, AttemptError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AttemptError>>,
{
    let mut backoff = create_backoff();
    let max_attempts = max_retries.saturating_add(1);
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(err) => {
                if !is_retryable(err.status) || attempt >= max_attempts {
                    return Err(err);
                }

                let delay = match err.retry_after {
                    Some(hint) => hint,
                    None => match backoff.next_backoff() {
                        Some(delay) => delay,
                        // Backoff budget exhausted
                        None => return Err(err),
                    },
                };

                debug!(
                    "{} failed with {} (attempt {}), retrying after {}ms",
                    operation_name,
                    err.status,
                    attempt,
                    delay.as_millis()
                );

                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_parse_retry_after() {
        assert_eq!(parse_retry_after("2").unwrap().as_secs(), 2);
        assert_eq!(parse_retry_after(" 0.5 ").unwrap().as_millis(), 500);
        assert_eq!(parse_retry_after("120").unwrap().as_secs(), 10);
        assert!(parse_retry_after("-1").is_none());
        assert!(parse_retry_after("Wed, 21 Oct 2015 07:28:00 GMT").is_none());
    }

    #[test]
    fn test_is_retryable() {
        assert!(is_retryable(0));
        assert!(is_retryable(429));
        assert!(is_retryable(500));
        assert!(is_retryable(503));
        assert!(!is_retryable(400));
        assert!(!is_retryable(404));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let calls = AtomicU32::new(0);
        let result = with_retry("test", 3, || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(AttemptError::new(503, "unavailable"))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry("test", 2, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AttemptError::new(500, "boom")) }
        })
        .await;

        assert_eq!(result.unwrap_err().status, 500);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_does_not_retry_client_errors() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry("test", 5, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(AttemptError::new(400, "bad")) }
        })
        .await;

        assert_eq!(result.unwrap_err().status, 400);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
