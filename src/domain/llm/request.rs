use serde::Serialize;
use serde_json::{Map, Value};

use super::Message;

/// A single logical chat-completion call
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    /// Overrides the configured model when set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Provider-specific keyword parameters merged into the request body
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Default::default()
        }
    }

    /// A request carrying one user message
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self::new(vec![Message::user(prompt)])
    }

    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::new()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Builder for ChatRequest
#[derive(Debug, Default)]
pub struct ChatRequestBuilder {
    request: ChatRequest,
}

impl ChatRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: Message) -> Self {
        self.request.messages.push(message);
        self
    }

    pub fn system(self, content: impl Into<String>) -> Self {
        self.message(Message::system(content))
    }

    pub fn user(self, content: impl Into<String>) -> Self {
        self.message(Message::user(content))
    }

    pub fn assistant(self, content: impl Into<String>) -> Self {
        self.message(Message::assistant(content))
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.request.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temp: f32) -> Self {
        self.request.temperature = Some(temp);
        self
    }

    pub fn max_tokens(mut self, tokens: u32) -> Self {
        self.request.max_tokens = Some(tokens);
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.request.params.insert(name.into(), value.into());
        self
    }

    pub fn build(self) -> ChatRequest {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MessageRole;

    #[test]
    fn test_request_builder() {
        let request = ChatRequest::builder()
            .system("You are a data analyst")
            .user("Any outliers?")
            .model("gpt-4o")
            .temperature(0.2)
            .max_tokens(200)
            .param("seed", 7)
            .build();

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, MessageRole::System);
        assert_eq!(request.model.as_deref(), Some("gpt-4o"));
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.max_tokens, Some(200));
        assert_eq!(request.params.get("seed"), Some(&Value::from(7)));
    }

    #[test]
    fn test_from_prompt_is_single_user_message() {
        let request = ChatRequest::from_prompt("What's the trend?");

        assert!(!request.is_empty());
        assert_eq!(request.messages, vec![Message::user("What's the trend?")]);
        assert!(request.model.is_none());
    }

    #[test]
    fn test_empty_request() {
        assert!(ChatRequest::default().is_empty());
    }
}
