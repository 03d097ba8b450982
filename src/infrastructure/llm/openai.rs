use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::HttpClientTrait;
use crate::domain::{ChatCompletion, ChatRequest, ChatTransport, FinishReason, GatewayError, Usage};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

/// OpenAI chat-completions transport
#[derive(Debug)]
pub struct OpenAiTransport<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> OpenAiTransport<C> {
    pub fn new(client: C, api_key: &str) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(client: C, api_key: &str, base_url: impl Into<String>) -> Self {
        let auth_header = format!("Bearer {}", api_key);
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            client,
            auth_header,
            base_url,
        }
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }

    fn build_request(&self, model: &str, request: &ChatRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": model,
            "messages": request.messages,
        });

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        // Extra keyword parameters never replace the model or the messages
        for (key, value) in &request.params {
            if key != "model" && key != "messages" {
                body[key.as_str()] = value.clone();
            }
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<ChatCompletion, GatewayError> {
        let response: OpenAiResponse = serde_json::from_value(json)
            .map_err(|e| GatewayError::unexpected(format!("Failed to parse response: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::unexpected("No choices in response"))?;

        let mut completion = ChatCompletion::new(response.id, response.model, choice.message.content);

        if let Some(reason) = choice.finish_reason {
            completion = completion.with_finish_reason(FinishReason::parse(&reason));
        }

        if let Some(usage) = response.usage {
            completion =
                completion.with_usage(Usage::new(usage.prompt_tokens, usage.completion_tokens));
        }

        Ok(completion)
    }
}

#[async_trait]
impl<C: HttpClientTrait> ChatTransport for OpenAiTransport<C> {
    async fn chat(
        &self,
        model: &str,
        request: &ChatRequest,
    ) -> Result<ChatCompletion, GatewayError> {
        let url = self.chat_completions_url();
        let body = self.build_request(model, request);
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

// OpenAI API types

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: OpenAiResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;

    const TEST_URL: &str = "https://api.openai.com/v1/chat/completions";

    fn completion_json(content: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "chatcmpl-123",
            "model": "gpt-4o-mini",
            "choices": [{
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 10, "completion_tokens": 8, "total_tokens": 18 }
        })
    }

    #[tokio::test]
    async fn test_openai_chat() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, completion_json("Revenue peaks in July.".into()));
        let transport = OpenAiTransport::new(client, "sk-test");

        let completion = transport
            .chat("gpt-4o-mini", &ChatRequest::from_prompt("When?"))
            .await
            .unwrap();

        assert_eq!(completion.id, "chatcmpl-123");
        assert_eq!(completion.content.as_deref(), Some("Revenue peaks in July."));
        assert_eq!(completion.finish_reason, Some(FinishReason::Stop));
        assert_eq!(completion.usage, Some(Usage::new(10, 8)));
    }

    #[tokio::test]
    async fn test_openai_null_content() {
        let client =
            MockHttpClient::new().with_response(TEST_URL, completion_json(serde_json::Value::Null));
        let transport = OpenAiTransport::new(client, "sk-test");

        let completion = transport
            .chat("gpt-4o-mini", &ChatRequest::from_prompt("When?"))
            .await
            .unwrap();

        assert_eq!(completion.content, None);
    }

    #[tokio::test]
    async fn test_openai_request_body() {
        let client = MockHttpClient::new().with_response(TEST_URL, completion_json("ok".into()));
        let transport = OpenAiTransport::new(client, "sk-test");

        let request = ChatRequest::builder()
            .user("Any outliers?")
            .temperature(0.5)
            .max_tokens(120)
            .param("seed", 42)
            .param("model", "ignored")
            .build();

        transport.chat("gpt-4o", &request).await.unwrap();

        let requests = transport.client.requests();
        assert_eq!(requests.len(), 1);

        let (url, body) = &requests[0];
        assert_eq!(url, TEST_URL);
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Any outliers?");
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["max_tokens"], 120);
        assert_eq!(body["seed"], 42);
    }

    #[tokio::test]
    async fn test_openai_error_passthrough() {
        let client = MockHttpClient::new()
            .with_error(TEST_URL, GatewayError::rate_limit("HTTP 429: insufficient_quota"));
        let transport = OpenAiTransport::new(client, "sk-test");

        let error = transport
            .chat("gpt-4o-mini", &ChatRequest::from_prompt("q"))
            .await
            .unwrap_err();

        assert!(error.is_retryable());
    }

    #[tokio::test]
    async fn test_openai_no_choices_is_unexpected() {
        let client = MockHttpClient::new()
            .with_response(TEST_URL, serde_json::json!({"id": "x", "model": "m", "choices": []}));
        let transport = OpenAiTransport::new(client, "sk-test");

        let error = transport
            .chat("gpt-4o-mini", &ChatRequest::from_prompt("q"))
            .await
            .unwrap_err();

        assert!(matches!(error, GatewayError::Unexpected { .. }));
    }

    #[tokio::test]
    async fn test_openai_custom_base_url() {
        let custom_url = "http://localhost:8080/v1/chat/completions";
        let client = MockHttpClient::new().with_response(custom_url, completion_json("Custom".into()));
        let transport = OpenAiTransport::with_base_url(client, "sk-test", "http://localhost:8080/");

        let completion = transport
            .chat("gpt-4o-mini", &ChatRequest::from_prompt("q"))
            .await
            .unwrap();

        assert_eq!(completion.content.as_deref(), Some("Custom"));
    }
}
