//! Retry policy for idempotent reads.

use std::time::Duration;

/// Default number of attempts for a GET request.
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Default fixed delay between attempts in milliseconds.
pub const DEFAULT_BACKOFF_MS: u64 = 2000;

/// Rejected retry policy parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidRetryPolicy {
    /// At least one attempt is required.
    ZeroAttempts,
    /// Backoff must be a finite, non-negative number of seconds.
    InvalidBackoff(f64),
}

impl std::fmt::Display for InvalidRetryPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidRetryPolicy::ZeroAttempts => {
                write!(f, "Invalid retry policy: max_attempts must be at least 1")
            }
            InvalidRetryPolicy::InvalidBackoff(secs) => {
                write!(
                    f,
                    "Invalid retry policy: backoff must be a non-negative number of seconds (got {})",
                    secs
                )
            }
        }
    }
}

impl std::error::Error for InvalidRetryPolicy {}

/// How many times a transient failure is retried and how long to wait in between.
///
/// The delay is fixed: no jitter and no growth between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: usize,
    backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, backoff: Duration) -> Result<Self, InvalidRetryPolicy> {
        if max_attempts == 0 {
            return Err(InvalidRetryPolicy::ZeroAttempts);
        }
        Ok(Self {
            max_attempts,
            backoff,
        })
    }

    /// Builds a policy from a backoff given in (fractional) seconds, as taken from the CLI.
    pub fn from_secs_f64(max_attempts: usize, backoff_secs: f64) -> Result<Self, InvalidRetryPolicy> {
        let backoff = Duration::try_from_secs_f64(backoff_secs)
            .map_err(|_| InvalidRetryPolicy::InvalidBackoff(backoff_secs))?;
        Self::new(max_attempts, backoff)
    }

    /// A single attempt, used for non-idempotent requests.
    pub fn once() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: Duration::from_millis(DEFAULT_BACKOFF_MS),
        }
    }
}
