//! Chat gateway - retrying completion calls with fallback and error notices

use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use super::{RequestRateLimiter, RetryPolicy};
use crate::config::GatewayConfig;
use crate::domain::fallback::FallbackComposer;
use crate::domain::llm::{ChatOutcome, ChatRequest, ChatTransport};
use crate::domain::notice::{error_notice, retry_exhausted_notice, with_detail};
use crate::domain::{ErrorKind, GatewayError};

/// Why a call ended without an answer
#[derive(Debug)]
enum Unanswered {
    /// Every attempt failed with a retryable error; holds the last one
    Exhausted(GatewayError),
    /// A non-retryable error, an unusable reply or the deadline ended the call
    Stopped(GatewayError),
}

impl Unanswered {
    /// Quota exhaustion stays visible after retries; other retryable
    /// failures collapse into `RetryExhausted`.
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Exhausted(e) if e.kind() == ErrorKind::QuotaExceeded => ErrorKind::QuotaExceeded,
            Self::Exhausted(_) => ErrorKind::RetryExhausted,
            Self::Stopped(e) => e.kind(),
        }
    }

    fn notice(&self, detailed: bool) -> String {
        match self {
            Self::Exhausted(e) if e.kind() == ErrorKind::QuotaExceeded => error_notice(e, detailed),
            Self::Exhausted(e) => with_detail(retry_exhausted_notice(), e, detailed),
            Self::Stopped(e) => error_notice(e, detailed),
        }
    }
}

/// Owns the retry loop against one chat-completion transport.
///
/// Holds no state across calls apart from the optional outgoing rate limiter.
#[derive(Debug)]
pub struct ChatGateway<T: ChatTransport> {
    transport: T,
    config: GatewayConfig,
    policy: RetryPolicy,
    limiter: Option<RequestRateLimiter>,
}

impl<T: ChatTransport> ChatGateway<T> {
    /// Create a gateway; the rate limiter is enabled from the config flags
    pub fn new(config: GatewayConfig, transport: T) -> Self {
        let policy = RetryPolicy::new(config.max_retries, config.base_delay);
        let limiter = config
            .rate_limit_enabled
            .then(|| RequestRateLimiter::new(config.max_requests_per_minute));

        Self {
            transport,
            config,
            policy,
            limiter,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run up to `max_retries` attempts.
    ///
    /// `Ok(None)` means no answer: retries exhausted, a non-retryable
    /// provider error, or an unexpected failure. `Err` is returned only when
    /// the call could not be attempted at all.
    pub async fn complete(&self, request: ChatRequest) -> Result<Option<String>, GatewayError> {
        self.complete_with_deadline(request, None).await
    }

    /// Same as `complete`, giving up with `Ok(None)` once `deadline` passes
    pub async fn complete_with_deadline(
        &self,
        request: ChatRequest,
        deadline: Option<Instant>,
    ) -> Result<Option<String>, GatewayError> {
        Ok(self.attempt(request, deadline).await?.ok())
    }

    /// Always returns displayable text: the answer, the fallback content,
    /// or a notice explaining why the call could not be made.
    pub async fn safe_complete(
        &self,
        request: ChatRequest,
        fallback_info: &str,
        question: &str,
    ) -> ChatOutcome {
        self.safe_complete_with_deadline(request, fallback_info, question, None)
            .await
    }

    pub async fn safe_complete_with_deadline(
        &self,
        request: ChatRequest,
        fallback_info: &str,
        question: &str,
        deadline: Option<Instant>,
    ) -> ChatOutcome {
        let unanswered = match self.attempt(request, deadline).await {
            Ok(Ok(answer)) if !answer.trim().is_empty() => return ChatOutcome::answer(answer),
            Ok(Ok(_)) => Unanswered::Stopped(GatewayError::unexpected("Completion content is empty")),
            Ok(Err(unanswered)) => unanswered,
            Err(e) => {
                error!(error = %e, "Error in safe chat completion");
                return ChatOutcome::notice(
                    e.kind(),
                    error_notice(&e, self.config.show_detailed_errors),
                );
            }
        };

        let kind = unanswered.kind();
        if self.config.fallback_enabled {
            ChatOutcome::fallback(kind, FallbackComposer::compose(question, fallback_info))
        } else {
            ChatOutcome::notice(kind, unanswered.notice(self.config.show_detailed_errors))
        }
    }

    /// Outer `Err`: the call could not be attempted. Inner `Err`: attempted
    /// without an answer.
    async fn attempt(
        &self,
        request: ChatRequest,
        deadline: Option<Instant>,
    ) -> Result<Result<String, Unanswered>, GatewayError> {
        self.config
            .validate()
            .map_err(|e| GatewayError::configuration(e.to_string()))?;

        if request.is_empty() {
            return Err(GatewayError::invalid_request(
                "chat request must contain at least one message",
            ));
        }

        let model = request
            .model
            .clone()
            .unwrap_or_else(|| self.config.model.clone());

        let attempts = self.run_attempts(&model, &request);

        match deadline {
            None => Ok(attempts.await),
            Some(deadline) => match tokio::time::timeout_at(deadline, attempts).await {
                Ok(result) => Ok(result),
                Err(_) => {
                    warn!(model = %model, "Chat completion deadline passed, giving up");
                    Ok(Err(Unanswered::Stopped(GatewayError::timeout(
                        "Deadline passed before the provider answered",
                    ))))
                }
            },
        }
    }

    async fn run_attempts(&self, model: &str, request: &ChatRequest) -> Result<String, Unanswered> {
        for attempt in 0..self.policy.max_retries {
            if let Some(limiter) = &self.limiter {
                limiter.acquire().await;
            }

            match self.transport.chat(model, request).await {
                Ok(completion) => {
                    debug!(
                        provider = self.transport.provider_name(),
                        model = %model,
                        attempts = attempt + 1,
                        usage = ?completion.usage,
                        "Chat completion succeeded"
                    );
                    return completion.content.ok_or_else(|| {
                        Unanswered::Stopped(GatewayError::unexpected("Completion has no content"))
                    });
                }
                Err(e) if e.is_retryable() => {
                    warn!(attempt = attempt + 1, error = %e, "API error on attempt");

                    if self.policy.has_attempt_after(attempt) {
                        let delay = self.policy.delay_for_attempt(attempt);
                        info!(delay_secs = delay.as_secs_f64(), "Retrying chat completion");
                        tokio::time::sleep(delay).await;
                    } else {
                        error!(error = %e, "All retry attempts failed");
                        return Err(Unanswered::Exhausted(e));
                    }
                }
                Err(e) => {
                    error!(kind = %e.kind(), error = %e, "Chat completion failed");
                    return Err(Unanswered::Stopped(e));
                }
            }
        }

        // only reached with max_retries == 0
        Err(Unanswered::Exhausted(GatewayError::unexpected(
            "No attempts allowed by the retry policy",
        )))
    }
}
