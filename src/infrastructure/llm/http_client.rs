use async_trait::async_trait;
use std::time::Duration;

use crate::domain::GatewayError;

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::unexpected(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        let response = request
            .json(body)
            .send()
            .await
            .map_err(|e| classify_transport_error(&e, "Request failed"))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(classify_status(status.as_u16(), &error_body));
        }

        response
            .json()
            .await
            .map_err(|e| classify_transport_error(&e, "Failed to parse response"))
    }
}

/// Map a reqwest failure onto the retryable / non-retryable split
fn classify_transport_error(error: &reqwest::Error, context: &str) -> GatewayError {
    let message = format!("{}: {}", context, error);

    if error.is_timeout() {
        GatewayError::timeout(message)
    } else if error.is_connect() || error.is_request() {
        GatewayError::connection(message)
    } else {
        GatewayError::unexpected(message)
    }
}

/// Map a non-success HTTP status onto the error taxonomy
pub(crate) fn classify_status(status: u16, body: &str) -> GatewayError {
    let message = format!("HTTP {}: {}", status, body);

    match status {
        429 => GatewayError::rate_limit(message),
        408 | 504 => GatewayError::timeout(message),
        _ => GatewayError::api(Some(status), message),
    }
}
