//! Chat-completion domain models and the transport seam

mod message;
mod outcome;
mod provider;
mod request;
mod response;

pub use message::{Message, MessageRole};
pub use outcome::ChatOutcome;
pub use provider::ChatTransport;
pub use request::{ChatRequest, ChatRequestBuilder};
pub use response::{ChatCompletion, FinishReason, Usage};

#[cfg(test)]
pub use provider::mock::MockTransport;
