//! Retrying access to the chat-completion provider

mod chat_gateway;
mod rate_limiter;
mod retry;

pub use chat_gateway::ChatGateway;
pub use rate_limiter::{RateLimitResult, RequestRateLimiter};
pub use retry::RetryPolicy;
