//! Exponential backoff with jitter between retry attempts.
//!
//! The delay before retry number `attempt` (1-based) is
//! `base * 2^(attempt - 1) + jitter`, where `jitter` is drawn uniformly from
//! `(0, jitter_bound]`. Arithmetic saturates instead of overflowing.
//!
//! Waiting and randomness are behind the [`Sleeper`] and [`JitterSource`]
//! traits so tests can observe delays without real time passing.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

/// Waits for a backoff interval.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspends the current task for `duration`.
    async fn sleep(&self, duration: Duration);
}

/// [`Sleeper`] backed by `tokio::time::sleep`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Draws the random component of a backoff delay.
pub trait JitterSource: Send + Sync {
    /// Returns a duration in `(0, bound]`, or zero when `bound` is zero.
    fn sample(&self, bound: Duration) -> Duration;
}

/// [`JitterSource`] backed by the thread-local RNG.
#[derive(Clone, Copy, Debug, Default)]
pub struct ThreadRngJitter;

impl JitterSource for ThreadRngJitter {
    fn sample(&self, bound: Duration) -> Duration {
        if bound.is_zero() {
            return Duration::ZERO;
        }
        // gen::<f64>() is in [0, 1), so the factor lands in (0, 1].
        let factor = 1.0 - rand::thread_rng().gen::<f64>();
        bound.mul_f64(factor).clamp(Duration::from_nanos(1), bound)
    }
}

impl<F> JitterSource for F
where
    F: Fn(Duration) -> Duration + Send + Sync,
{
    fn sample(&self, bound: Duration) -> Duration {
        (self)(bound)
    }
}

/// Backoff parameters for one client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackoffPolicy {
    base: Duration,
    jitter_bound: Duration,
}

impl BackoffPolicy {
    /// Creates a policy from its base delay and jitter bound.
    #[must_use]
    pub const fn new(base: Duration, jitter_bound: Duration) -> Self {
        Self { base, jitter_bound }
    }

    /// Returns the base delay.
    #[must_use]
    pub const fn base(&self) -> Duration {
        self.base
    }

    /// Returns the jitter bound.
    #[must_use]
    pub const fn jitter_bound(&self) -> Duration {
        self.jitter_bound
    }

    /// Returns the deterministic part of the delay, `base * 2^(attempt - 1)`.
    ///
    /// An `attempt` of 0 is treated as 1.
    ///
    /// ```rust
    /// use cronbeat::clients::BackoffPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = BackoffPolicy::new(Duration::from_millis(250), Duration::ZERO);
    /// assert_eq!(policy.exponential_delay(1), Duration::from_millis(250));
    /// assert_eq!(policy.exponential_delay(3), Duration::from_millis(1000));
    /// ```
    #[must_use]
    pub fn exponential_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base.saturating_mul(factor)
    }

    /// Returns the full delay before retry number `attempt`.
    #[must_use]
    pub fn delay(&self, attempt: u32, jitter: &dyn JitterSource) -> Duration {
        self.exponential_delay(attempt)
            .saturating_add(jitter.sample(self.jitter_bound))
    }
}
