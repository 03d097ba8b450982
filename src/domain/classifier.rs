//! Decides how a caller should render the text it got back

use serde::Serialize;

use super::llm::ChatOutcome;
use super::notice::WARNING_GLYPH;

/// Rendering treatment for a reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    ErrorNotice,
    NormalAnswer,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseClassifier;

impl ResponseClassifier {
    /// Typed decision: only notices render as errors
    pub fn classify(outcome: &ChatOutcome) -> ResponseKind {
        match outcome {
            ChatOutcome::Notice { .. } => ResponseKind::ErrorNotice,
            ChatOutcome::Answer { .. } | ChatOutcome::Fallback { .. } => {
                ResponseKind::NormalAnswer
            }
        }
    }

    /// Substring rule over rendered text. An answer that merely mentions
    /// "API" is misclassified; prefer `classify` where an outcome exists.
    pub fn classify_text(text: &str) -> ResponseKind {
        if text.contains(WARNING_GLYPH) || text.contains("API") || text.to_lowercase().contains("quota")
        {
            ResponseKind::ErrorNotice
        } else {
            ResponseKind::NormalAnswer
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorKind;

    #[test]
    fn test_classify_text_plain_sentence() {
        assert_eq!(
            ResponseClassifier::classify_text("The sales column peaks in July."),
            ResponseKind::NormalAnswer
        );
    }

    #[test]
    fn test_classify_text_markers() {
        assert_eq!(
            ResponseClassifier::classify_text("Your QuOtA is gone"),
            ResponseKind::ErrorNotice
        );
        assert_eq!(
            ResponseClassifier::classify_text("Check the API settings"),
            ResponseKind::ErrorNotice
        );
        assert_eq!(
            ResponseClassifier::classify_text("⚠️ **Request Timeout**"),
            ResponseKind::ErrorNotice
        );
        // "api" in lowercase is not a marker
        assert_eq!(
            ResponseClassifier::classify_text("The rapid growth in Q3 stands out."),
            ResponseKind::NormalAnswer
        );
    }

    #[test]
    fn test_classify_outcome() {
        assert_eq!(
            ResponseClassifier::classify(&ChatOutcome::answer("Mentions the API freely.")),
            ResponseKind::NormalAnswer
        );
        assert_eq!(
            ResponseClassifier::classify(&ChatOutcome::fallback(
                ErrorKind::RetryExhausted,
                "**Basic Data Analysis**"
            )),
            ResponseKind::NormalAnswer
        );
        assert_eq!(
            ResponseClassifier::classify(&ChatOutcome::notice(ErrorKind::Timeout, "late")),
            ResponseKind::ErrorNotice
        );
    }
}
