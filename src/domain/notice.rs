//! User-facing warning texts for each error kind

use super::{ErrorKind, GatewayError};

pub const WARNING_GLYPH: &str = "⚠️";

/// Markdown notice for an error the user should see instead of an answer
pub fn error_notice(error: &GatewayError, detailed: bool) -> String {
    let notice = match error.kind() {
        ErrorKind::QuotaExceeded => format!(
            "{WARNING_GLYPH} **API Quota Exceeded**\n\n\
             Your OpenAI API quota has been exceeded. Please check your billing details and plan \
             limits. You can:\n\n\
             - Check your usage at [OpenAI Platform](https://platform.openai.com/usage)\n\
             - Upgrade your plan if needed\n\
             - Wait for your quota to reset\n\n\
             For now, a basic analysis of your data is available instead."
        ),
        ErrorKind::RateLimited => format!(
            "{WARNING_GLYPH} **Rate Limit Exceeded**\n\n\
             Too many requests to the AI service. Please wait a moment and try again."
        ),
        ErrorKind::ConnectionFailure => format!(
            "{WARNING_GLYPH} **Connection Error**\n\n\
             Unable to connect to the AI service. Please check your internet connection and try again."
        ),
        ErrorKind::Timeout => format!(
            "{WARNING_GLYPH} **Request Timeout**\n\n\
             The AI service is taking too long to respond. Please try again with a simpler question."
        ),
        ErrorKind::ProviderError => format!(
            "{WARNING_GLYPH} **API Error**\n\n\
             An error occurred with the AI service: {}",
            error.message()
        ),
        ErrorKind::InvalidConfiguration => format!(
            "{WARNING_GLYPH} **Configuration Error**\n\n\
             The AI service is not configured correctly: {}",
            error.message()
        ),
        ErrorKind::RetryExhausted => retry_exhausted_notice(),
        ErrorKind::UnclassifiedFailure => format!(
            "{WARNING_GLYPH} **Unexpected Error**\n\n\
             An unexpected error occurred: {}",
            error.message()
        ),
    };

    with_detail(notice, error, detailed)
}

/// Append the error's Debug rendering when detailed errors are enabled
pub fn with_detail(notice: String, error: &GatewayError, detailed: bool) -> String {
    if detailed {
        format!("{}\n\n```\n{:?}\n```", notice, error)
    } else {
        notice
    }
}

/// Notice shown when every attempt failed and the fallback is switched off
pub fn retry_exhausted_notice() -> String {
    format!(
        "{WARNING_GLYPH} **AI Service Unavailable**\n\n\
         The AI service did not answer after several attempts. Please try again later."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_notice_has_remediation_steps() {
        let notice = error_notice(&GatewayError::rate_limit("insufficient_quota"), false);

        assert!(notice.starts_with("⚠️ **API Quota Exceeded**"));
        assert!(notice.contains("- Upgrade your plan if needed"));
        assert!(notice.contains("- Wait for your quota to reset"));
    }

    #[test]
    fn test_provider_and_unexpected_notices_include_raw_message() {
        let notice = error_notice(&GatewayError::api(Some(400), "model not found"), false);
        assert!(notice.contains("**API Error**"));
        assert!(notice.contains("model not found"));

        let notice = error_notice(&GatewayError::unexpected("socket closed"), false);
        assert!(notice.contains("**Unexpected Error**"));
        assert!(notice.contains("socket closed"));
    }

    #[test]
    fn test_every_notice_carries_warning_glyph() {
        let errors = [
            GatewayError::rate_limit("slow down"),
            GatewayError::connection("refused"),
            GatewayError::timeout("late"),
            GatewayError::configuration("missing key"),
            GatewayError::invalid_request("no messages"),
        ];

        for error in &errors {
            assert!(error_notice(error, false).starts_with(WARNING_GLYPH));
        }
        assert!(retry_exhausted_notice().starts_with(WARNING_GLYPH));
    }

    #[test]
    fn test_detailed_notice_appends_debug_rendering() {
        let error = GatewayError::timeout("read timed out");

        let plain = error_notice(&error, false);
        let detailed = error_notice(&error, true);

        assert!(!plain.contains("read timed out"));
        assert!(detailed.starts_with(&plain));
        assert!(detailed.contains("Timeout { message: \"read timed out\" }"));
    }
}
