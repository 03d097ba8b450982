//! Insights service - dataset questions and layout summaries over the chat gateway

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::domain::prompt::LAYOUT_FALLBACK_QUESTION;
use crate::domain::{
    ChatGateway, ChatOutcome, ChatRequest, ChatTransport, Dataset, PromptBuilder,
    ResponseClassifier, ResponseKind, layout_fallback_info, layout_prompt,
};

/// Displayable reply together with how it should be rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightsReply {
    pub outcome: ChatOutcome,
    pub kind: ResponseKind,
}

impl InsightsReply {
    pub fn new(outcome: ChatOutcome) -> Self {
        let kind = ResponseClassifier::classify(&outcome);
        Self { outcome, kind }
    }

    pub fn text(&self) -> &str {
        self.outcome.text()
    }

    pub fn is_error(&self) -> bool {
        self.kind == ResponseKind::ErrorNotice
    }
}

/// Insights service for the dashboard's question box and layout summaries
#[derive(Debug)]
pub struct InsightsService<T: ChatTransport> {
    gateway: ChatGateway<T>,
    prompts: PromptBuilder,
}

impl<T: ChatTransport> InsightsService<T> {
    pub fn new(gateway: ChatGateway<T>) -> Self {
        Self {
            gateway,
            prompts: PromptBuilder::new(),
        }
    }

    pub fn with_prompt_builder(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn gateway(&self) -> &ChatGateway<T> {
        &self.gateway
    }

    pub fn prompt_builder(&self) -> &PromptBuilder {
        &self.prompts
    }

    /// Answer a free-form question about the dataset
    pub async fn ask(&self, dataset: &Dataset, question: &str) -> InsightsReply {
        info!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "Asking question about dataset"
        );

        let prompt = self.prompts.generate_prompt(dataset, question);
        let outcome = self
            .gateway
            .safe_complete(
                ChatRequest::from_prompt(prompt),
                &dataset.shape_summary(),
                question,
            )
            .await;

        InsightsReply::new(outcome)
    }

    /// Summarize a saved layout given its chart figures
    pub async fn summarize_layout(&self, figures: &[Value]) -> InsightsReply {
        info!(charts = figures.len(), "Summarizing layout");

        let outcome = self
            .gateway
            .safe_complete(
                ChatRequest::from_prompt(layout_prompt(figures)),
                &layout_fallback_info(figures.len()),
                LAYOUT_FALLBACK_QUESTION,
            )
            .await;

        InsightsReply::new(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::config::GatewayConfig;
    use crate::domain::llm::MockTransport;
    use crate::domain::{Column, ErrorKind, GatewayError};

    fn config() -> GatewayConfig {
        GatewayConfig::default()
            .with_api_key("sk-test")
            .with_retry(3, Duration::from_secs(1))
            .with_rate_limit(false, 0)
    }

    fn revenue_dataset() -> Dataset {
        Dataset::new(vec![
            Column::from_strings("date", (1..=100).map(|day| format!("2024-01-{:03}", day))),
            Column::from_numbers("revenue", (1..=100).map(|n| n as f64 * 10.0)),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn test_ask_returns_answer() {
        let gateway = ChatGateway::new(config(), MockTransport::answering("Revenue grows steadily."));
        let service = InsightsService::new(gateway);

        let reply = service.ask(&revenue_dataset(), "Is revenue growing?").await;

        assert_eq!(reply.outcome, ChatOutcome::answer("Revenue grows steadily."));
        assert_eq!(reply.kind, ResponseKind::NormalAnswer);
        assert!(!reply.is_error());
    }

    #[tokio::test(start_paused = true)]
    async fn test_ask_falls_back_when_provider_is_unreachable() {
        let transport = MockTransport::failing(GatewayError::connection("connection refused"));
        let service = InsightsService::new(ChatGateway::new(config(), transport));
        let dataset = revenue_dataset();

        let prompt = service
            .prompt_builder()
            .generate_prompt(&dataset, "What is the trend?");
        assert!(prompt.contains("100 rows and 2 columns"));

        let reply = service.ask(&dataset, "What is the trend?").await;

        assert!(matches!(reply.outcome, ChatOutcome::Fallback { .. }));
        assert_eq!(reply.outcome.error_kind(), Some(ErrorKind::RetryExhausted));
        assert_eq!(reply.kind, ResponseKind::NormalAnswer);
        assert!(reply.text().contains("AI service unavailable"));
        assert!(reply.text().contains("Dataset has 100 rows and 2 columns"));
        assert!(reply.text().contains("Columns: date, revenue"));
        assert!(reply.text().contains("*\"What is the trend?\"*"));
        assert_eq!(service.gateway().transport().call_count(), 3);
    }

    #[tokio::test]
    async fn test_ask_without_credential_is_an_error_notice() {
        let gateway = ChatGateway::new(GatewayConfig::default(), MockTransport::answering("unused"));
        let service = InsightsService::new(gateway);

        let reply = service.ask(&revenue_dataset(), "Anything?").await;

        assert!(reply.is_error());
        assert_eq!(reply.outcome.error_kind(), Some(ErrorKind::InvalidConfiguration));
        assert_eq!(service.gateway().transport().call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_summarize_layout_fallback_mentions_chart_count() {
        let transport = MockTransport::failing(GatewayError::timeout("timed out"));
        let service = InsightsService::new(ChatGateway::new(config(), transport));
        let figures = vec![
            serde_json::json!({"data": [{"type": "bar", "y": [1, 2, 3]}]}),
            serde_json::json!({"data": [{"type": "line", "y": [3, 2, 1]}]}),
        ];

        let reply = service.summarize_layout(&figures).await;

        assert!(matches!(reply.outcome, ChatOutcome::Fallback { .. }));
        assert!(reply.text().contains("Layout contains 2 charts"));
        assert!(reply.text().contains(LAYOUT_FALLBACK_QUESTION));
    }

    #[tokio::test]
    async fn test_summarize_layout_answer() {
        let gateway = ChatGateway::new(config(), MockTransport::answering("Two charts, both flat."));
        let service = InsightsService::new(gateway);

        let reply = service.summarize_layout(&[serde_json::json!({})]).await;

        assert_eq!(reply.text(), "Two charts, both flat.");
        assert_eq!(reply.kind, ResponseKind::NormalAnswer);
    }
}
