//! Outgoing request limiter
//!
//! Sliding one-minute window over the attempts sent to the provider.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

const WINDOW: Duration = Duration::from_secs(60);

/// Result of a rate limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Remaining requests in the current window
    pub remaining: u32,
    /// Time until the oldest request leaves the window
    pub retry_in: Duration,
}

/// Per-minute limiter shared by every call of one gateway
#[derive(Debug)]
pub struct RequestRateLimiter {
    requests_per_minute: u32,
    records: Mutex<VecDeque<Instant>>,
}

impl RequestRateLimiter {
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
            records: Mutex::new(VecDeque::new()),
        }
    }

    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }

    /// Check and record in one operation
    pub async fn check_and_record(&self) -> RateLimitResult {
        let now = Instant::now();
        let mut records = self.records.lock().await;

        while records
            .front()
            .is_some_and(|oldest| now.duration_since(*oldest) >= WINDOW)
        {
            records.pop_front();
        }

        let used = records.len() as u32;

        if used >= self.requests_per_minute {
            let retry_in = records
                .front()
                .map(|oldest| WINDOW.saturating_sub(now.duration_since(*oldest)))
                .unwrap_or(WINDOW);

            return RateLimitResult {
                allowed: false,
                remaining: 0,
                retry_in,
            };
        }

        records.push_back(now);

        RateLimitResult {
            allowed: true,
            remaining: self.requests_per_minute - used - 1,
            retry_in: Duration::ZERO,
        }
    }

    /// Wait until the window has room, then record the request
    pub async fn acquire(&self) {
        if self.requests_per_minute == 0 {
            return;
        }

        loop {
            let result = self.check_and_record().await;
            if result.allowed {
                return;
            }

            debug!(
                retry_in_ms = result.retry_in.as_millis() as u64,
                "Outgoing request limit reached, waiting"
            );
            tokio::time::sleep(result.retry_in).await;
        }
    }
}
