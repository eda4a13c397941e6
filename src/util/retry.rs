//! Opt-in retry with exponential backoff.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::TernError;

/// Retry policy for completion calls.
///
/// The default performs exactly one attempt, so errors propagate to the
/// caller unchanged. Retrying is an explicit choice via
/// [`RetryPolicy::standard`] or a hand-built policy, and only errors
/// reporting [`TernError::is_retryable`] are ever retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, counting the first call.
    pub max_attempts: u32,
    /// Delay before the first re-attempt.
    pub initial_backoff: Duration,
    /// Ceiling on the delay between attempts.
    pub max_backoff: Duration,
    /// Growth factor applied to the delay after each failure.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Three attempts with exponential backoff.
    pub fn standard() -> Self {
        Self {
            max_attempts: 3,
            ..Self::default()
        }
    }

    /// Execute an async operation under this policy.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, TernError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TernError>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut delay = self.initial_backoff;

        for attempt in 1..=attempts {
            let error = match operation().await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            if attempt == attempts || !error.is_retryable() {
                return Err(error);
            }

            warn!(attempt, max_attempts = attempts, error = %error, "retrying transient failure");

            tokio::time::sleep(delay.mul_f64(jitter_factor())).await;
            delay = delay.mul_f64(self.multiplier).min(self.max_backoff);
        }

        unreachable!("the final attempt returns above")
    }
}

/// Spread factor in [0.75, 1.25), keeping concurrent retries out of lockstep.
fn jitter_factor() -> f64 {
    use std::collections::hash_map::RandomState;
    use std::hash::{BuildHasher, Hasher};

    let bits = RandomState::new().build_hasher().finish();
    0.75 + (bits % 1_000) as f64 / 2_000.0
}
