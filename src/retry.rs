use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Backoff settings for calls to the content API
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first one)
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for a single delay
    pub max_delay: Duration,
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            max_delay: Duration::from_secs(2),
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Preset: page content fetches (3 attempts)
    /// Delays: 200ms, 400ms
    pub fn content_fetch() -> Self {
        Self::new(3, Duration::from_millis(200)).with_max_delay(Duration::from_secs(1))
    }

    /// Delay before the given attempt (0-indexed); doubles each time
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let factor = 2u32.saturating_pow(attempt - 1);
        self.initial_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::content_fetch()
    }
}

/// Run `operation` until it succeeds, fails with a non-retryable error,
/// or runs out of attempts. Returns the last error in the latter cases.
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let mut attempt = 0;

    loop {
        let delay = config.delay_for_attempt(attempt);
        if !delay.is_zero() {
            debug!(
                "{}: retry attempt {}/{} after {:?}",
                operation_name,
                attempt + 1,
                config.max_attempts,
                delay
            );
            sleep(delay).await;
        }

        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };

        if !should_retry(&error) {
            debug!("{}: not retryable: {}", operation_name, error);
            return Err(error);
        }

        attempt += 1;
        if attempt >= config.max_attempts {
            warn!(
                "{}: all {} attempts failed. Last error: {}",
                operation_name, config.max_attempts, error
            );
            return Err(error);
        }

        warn!(
            "{}: attempt {}/{} failed ({}), retrying",
            operation_name, attempt, config.max_attempts, error
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_config(max_attempts: u32) -> RetryConfig {
        RetryConfig::new(max_attempts, Duration::from_millis(5))
    }

    // ==================== Delay Tests ====================

    #[test]
    fn test_content_fetch_preset() {
        let config = RetryConfig::content_fetch();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.initial_delay, Duration::from_millis(200));
    }

    #[test]
    fn test_zero_attempts_clamped_to_one() {
        assert_eq!(RetryConfig::new(0, Duration::from_millis(1)).max_attempts, 1);
    }

    #[test]
    fn test_delay_doubles() {
        let config = RetryConfig::new(4, Duration::from_millis(100));

        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(config.delay_for_attempt(3), Duration::from_millis(400));
    }

    #[test]
    fn test_delay_respects_max() {
        let config = RetryConfig::new(10, Duration::from_millis(500))
            .with_max_delay(Duration::from_millis(800));

        assert_eq!(config.delay_for_attempt(5), Duration::from_millis(800));
        assert_eq!(config.delay_for_attempt(40), Duration::from_millis(800));
    }

    // ==================== with_retry_if Tests ====================

    #[tokio::test]
    async fn test_succeeds_first_attempt() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();

        let result: Result<u32, &str> = with_retry_if(
            &fast_config(3),
            "test",
            || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                }
            },
            |_| true,
        )
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_after_transient_failures() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();

        let result: Result<u32, &str> = with_retry_if(
            &fast_config(3),
            "test",
            || {
                let c = c.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err("503")
                    } else {
                        Ok(1)
                    }
                }
            },
            |_| true,
        )
        .await;

        assert_eq!(result.unwrap(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_attempts() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();

        let result: Result<u32, &str> = with_retry_if(
            &fast_config(3),
            "test",
            || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err("still down")
                }
            },
            |_| true,
        )
        .await;

        assert_eq!(result.unwrap_err(), "still down");
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_immediately() {
        let counter = Arc::new(AtomicU32::new(0));
        let c = counter.clone();

        let result: Result<u32, &str> = with_retry_if(
            &fast_config(3),
            "test",
            || {
                let c = c.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err("404")
                }
            },
            |e: &&str| *e != "404",
        )
        .await;

        assert_eq!(result.unwrap_err(), "404");
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
