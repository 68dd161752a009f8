//! Reconnection backoff policy for the cache client.
//!
//! The policy is a pure function of the attempt count and total elapsed
//! time, so it can be unit-tested without a live connection.

use std::time::Duration;

/// Outcome of a retry decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Wait this long, then try again.
    RetryAfter(Duration),
    /// Stop retrying and surface the last error.
    GiveUp,
}

/// Backoff policy: linearly growing delay with a cap, bounded by a maximum
/// attempt count and a total time budget.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Give up after this many failed attempts.
    pub max_attempts: u32,
    /// Give up once this much time has been spent retrying.
    pub max_total: Duration,
    /// Delay grows as `attempt * base_delay`.
    pub base_delay: Duration,
    /// Upper bound on a single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            max_attempts: 10,
            max_total: Duration::from_secs(60 * 60),
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    /// Decide whether to retry after the given failed attempt.
    ///
    /// `attempt` is 1-based: pass 1 after the first failure.
    pub fn decide(&self, attempt: u32, total_elapsed: Duration) -> RetryDecision {
        if attempt >= self.max_attempts || total_elapsed >= self.max_total {
            return RetryDecision::GiveUp;
        }

        let delay = self.base_delay.saturating_mul(attempt).min(self.max_delay);
        RetryDecision::RetryAfter(delay)
    }
}
