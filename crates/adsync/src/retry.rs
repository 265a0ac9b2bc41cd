//! Shared retry utilities for platform HTTP clients.
//!
//! Every client retries rate-limited requests the same way: the base
//! delay doubles on each attempt, jitter is off so the schedule is
//! deterministic, and the attempt budget is fixed per client.

use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};

use crate::entity::Platform;

/// Total attempts per logical request (1 initial + retries).
pub const MAX_ATTEMPTS: u32 = 3;

/// Initial backoff delay in milliseconds.
pub const INITIAL_BACKOFF_MS: u64 = 500;

/// Maximum backoff delay in milliseconds.
pub const MAX_BACKOFF_MS: u64 = 60_000;

/// Configuration for retry operations.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Delay before the first retry; doubles on each subsequent one.
    pub base_delay: Duration,
    /// Ceiling on the doubled delay.
    pub max_delay: Duration,
    /// Total attempts, including the initial request.
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_millis(INITIAL_BACKOFF_MS),
            max_delay: Duration::from_millis(MAX_BACKOFF_MS),
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn new(base_delay: Duration, max_delay: Duration, max_attempts: u32) -> Self {
        Self {
            base_delay,
            max_delay,
            max_attempts,
        }
    }

    /// Build the exponential backoff strategy from this configuration.
    ///
    /// `backon` counts retries, not attempts, hence the `- 1`.
    #[must_use]
    pub fn into_backoff(self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.base_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_attempts.saturating_sub(1) as usize)
    }
}

/// Execute `operation` with automatic retry on rate limit errors.
///
/// Non-rate-limit errors return immediately; rate-limit errors retry the
/// identical operation until the attempt budget runs out, after which the
/// last error is returned for the caller to normalize.
pub async fn with_retry<T, E, F, Fut, IsRateLimit>(
    mut operation: F,
    is_rate_limit: IsRateLimit,
    config: RetryConfig,
    platform: Platform,
    context: &str,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
    IsRateLimit: Fn(&E) -> bool + Send + Sync + 'static,
{
    let attempt = AtomicU32::new(1);

    let retry_op = || {
        attempt.fetch_add(1, Ordering::SeqCst);
        operation()
    };

    retry_op
        .retry(config.into_backoff())
        .notify(|err, dur| {
            tracing::debug!(
                %platform,
                context,
                attempt = attempt.load(Ordering::SeqCst),
                retry_in_ms = dur.as_millis() as u64,
                error = %err,
                "rate limited, backing off"
            );
        })
        .when(is_rate_limit)
        .await
}
