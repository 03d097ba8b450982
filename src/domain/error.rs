use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Failures raised while talking to the chat-completion provider
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("Rate limit error: {message}")]
    RateLimit { message: String },

    #[error("Connection error: {message}")]
    Connection { message: String },

    #[error("Timeout error: {message}")]
    Timeout { message: String },

    #[error("API error: {message}")]
    Api { status: Option<u16>, message: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Unexpected error: {message}")]
    Unexpected { message: String },
}

impl GatewayError {
    pub fn rate_limit(message: impl Into<String>) -> Self {
        Self::RateLimit {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Rate limits, connection failures and timeouts are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimit { .. } | Self::Connection { .. } | Self::Timeout { .. }
        )
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RateLimit { message } => {
                if message.to_lowercase().contains("quota") {
                    ErrorKind::QuotaExceeded
                } else {
                    ErrorKind::RateLimited
                }
            }
            Self::Connection { .. } => ErrorKind::ConnectionFailure,
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Api { .. } => ErrorKind::ProviderError,
            Self::Configuration { .. } => ErrorKind::InvalidConfiguration,
            Self::InvalidRequest { .. } | Self::Unexpected { .. } => {
                ErrorKind::UnclassifiedFailure
            }
        }
    }

    /// The provider or transport message without the variant prefix
    pub fn message(&self) -> &str {
        match self {
            Self::RateLimit { message }
            | Self::Connection { message }
            | Self::Timeout { message }
            | Self::Api { message, .. }
            | Self::InvalidRequest { message }
            | Self::Configuration { message }
            | Self::Unexpected { message } => message,
        }
    }
}

/// User-facing error taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    QuotaExceeded,
    RateLimited,
    ConnectionFailure,
    Timeout,
    ProviderError,
    UnclassifiedFailure,
    RetryExhausted,
    InvalidConfiguration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::QuotaExceeded => "quota_exceeded",
            Self::RateLimited => "rate_limited",
            Self::ConnectionFailure => "connection_failure",
            Self::Timeout => "timeout",
            Self::ProviderError => "provider_error",
            Self::UnclassifiedFailure => "unclassified_failure",
            Self::RetryExhausted => "retry_exhausted",
            Self::InvalidConfiguration => "invalid_configuration",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(GatewayError::rate_limit("slow down").is_retryable());
        assert!(GatewayError::connection("refused").is_retryable());
        assert!(GatewayError::timeout("took too long").is_retryable());
        assert!(!GatewayError::api(Some(400), "bad request").is_retryable());
        assert!(!GatewayError::unexpected("boom").is_retryable());
        assert!(!GatewayError::configuration("no key").is_retryable());
    }

    #[test]
    fn test_rate_limit_with_quota_is_quota_exceeded() {
        let error = GatewayError::rate_limit("You exceeded your current QUOTA");
        assert_eq!(error.kind(), ErrorKind::QuotaExceeded);

        let error = GatewayError::rate_limit("{\"code\": \"insufficient_quota\"}");
        assert_eq!(error.kind(), ErrorKind::QuotaExceeded);

        let error = GatewayError::rate_limit("Too many requests");
        assert_eq!(error.kind(), ErrorKind::RateLimited);
    }

    #[test]
    fn test_kind_mapping() {
        assert_eq!(GatewayError::connection("x").kind(), ErrorKind::ConnectionFailure);
        assert_eq!(GatewayError::timeout("x").kind(), ErrorKind::Timeout);
        assert_eq!(GatewayError::api(None, "x").kind(), ErrorKind::ProviderError);
        assert_eq!(
            GatewayError::configuration("x").kind(),
            ErrorKind::InvalidConfiguration
        );
        assert_eq!(
            GatewayError::invalid_request("x").kind(),
            ErrorKind::UnclassifiedFailure
        );
    }

    #[test]
    fn test_error_display() {
        let error = GatewayError::api(Some(401), "Incorrect API key provided");
        assert_eq!(error.to_string(), "API error: Incorrect API key provided");
        assert_eq!(error.message(), "Incorrect API key provided");
    }
}
