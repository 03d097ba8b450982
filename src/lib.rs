//! Insights Gateway
//!
//! LLM access layer for a data-insights dashboard:
//! - Dataset insight prompts and chart layout summaries
//! - Retrying chat completions with exponential backoff and rate limiting
//! - Fallback content and explanatory notices when the provider fails
//! - Configuration gate for the OpenAI credential

pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;
