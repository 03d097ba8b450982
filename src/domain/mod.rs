//! Domain layer - prompt building, retry policy, fallback and classification

pub mod classifier;
pub mod dataset;
pub mod error;
pub mod fallback;
pub mod gateway;
pub mod llm;
pub mod notice;
pub mod prompt;

pub use classifier::{ResponseClassifier, ResponseKind};
pub use dataset::{Column, ColumnData, Dataset, DatasetError, NumericSummary};
pub use error::{ErrorKind, GatewayError};
pub use fallback::FallbackComposer;
pub use gateway::{ChatGateway, RateLimitResult, RequestRateLimiter, RetryPolicy};
pub use llm::{
    ChatCompletion, ChatOutcome, ChatRequest, ChatRequestBuilder, ChatTransport, FinishReason,
    Message, MessageRole, Usage,
};
pub use prompt::{PromptBuilder, layout_fallback_info, layout_prompt};
