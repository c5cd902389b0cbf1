//! Retry policy with optional exponential backoff.

use std::collections::BTreeSet;
use std::time::Duration;

/// Status codes retried by default.
pub const DEFAULT_RETRY_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Configuration for retry behavior.
///
/// Immutable once handed to a client. The default performs no retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Number of retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Backoff strategy to use.
    pub backoff: BackoffStrategy,
    /// HTTP status codes eligible for retry.
    pub retry_statuses: BTreeSet<u16>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_millis(500),
            backoff: BackoffStrategy::Constant,
            retry_statuses: DEFAULT_RETRY_STATUSES.into_iter().collect(),
        }
    }
}

impl RetryConfig {
    /// Set the number of retries.
    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the base delay between retries.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Enable or disable exponential backoff.
    pub fn with_backoff(mut self, enabled: bool) -> Self {
        self.backoff = if enabled {
            BackoffStrategy::Exponential
        } else {
            BackoffStrategy::Constant
        };
        self
    }

    /// Replace the set of retryable status codes.
    pub fn with_retry_statuses(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.retry_statuses = statuses.into_iter().collect();
        self
    }

    /// Disable retries.
    pub fn no_retry() -> Self {
        Self::default()
    }

    /// Whether a failure at `attempt` (0-indexed) may be retried.
    ///
    /// Transport failures carry no status and are always eligible while the
    /// attempt budget lasts.
    pub fn should_retry(&self, status: Option<u16>, attempt: u32) -> bool {
        if attempt >= self.max_retries {
            return false;
        }
        match status {
            Some(status) => self.retry_statuses.contains(&status),
            None => true,
        }
    }

    /// Delay to sleep after a failure at `attempt` (0-indexed).
    pub fn delay(&self, attempt: u32) -> Duration {
        self.backoff.delay(attempt, self.base_delay)
    }
}

/// Backoff strategy for determining retry delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackoffStrategy {
    /// Constant delay between retries.
    #[default]
    Constant,
    /// Delay doubles with every attempt (`base * 2^attempt`).
    Exponential,
}

impl BackoffStrategy {
    /// Calculate the delay for a given attempt number (0-indexed).
    pub fn delay(&self, attempt: u32, base_delay: Duration) -> Duration {
        match self {
            BackoffStrategy::Constant => base_delay,
            BackoffStrategy::Exponential => {
                let multiplier = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
                base_delay.saturating_mul(multiplier)
            }
        }
    }
}

/// Per-call retry state: the attempt index of one logical request.
///
/// Each call to the engine gets its own policy, so concurrent requests never
/// share retry state.
#[derive(Debug, Clone)]
pub struct RetryPolicy<'a> {
    config: &'a RetryConfig,
    attempt: u32,
}

impl<'a> RetryPolicy<'a> {
    /// Create a new retry policy from config.
    pub fn new(config: &'a RetryConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// Returns the current attempt number (0-indexed).
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Record a failed attempt and return the delay before the next one.
    ///
    /// Returns `None` when the failure is not retryable or the budget is spent;
    /// the attempt index is left untouched in that case.
    pub fn next_delay(&mut self, status: Option<u16>) -> Option<Duration> {
        if !self.config.should_retry(status, self.attempt) {
            return None;
        }

        let delay = self.config.delay(self.attempt);
        self.attempt += 1;
        Some(delay)
    }
}
