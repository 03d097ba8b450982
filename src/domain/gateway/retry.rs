use std::time::Duration;

/// Attempt bound and exponential backoff for one logical call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts allowed, including the first one
    pub max_retries: u32,
    /// Delay before the second attempt; doubles afterwards
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Delay after the failed attempt `attempt` (0-indexed): `base_delay * 2^attempt`
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .and_then(|factor| self.base_delay.checked_mul(factor))
            .unwrap_or(Duration::MAX)
    }

    /// Whether another attempt may follow the failed attempt `attempt`
    pub fn has_attempt_after(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_retries
    }

    /// Every delay a fully failing call sleeps through, in order
    pub fn schedule(&self) -> Vec<Duration> {
        (0..self.max_retries.saturating_sub(1))
            .map(|attempt| self.delay_for_attempt(attempt))
            .collect()
    }
}
