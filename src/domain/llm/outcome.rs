use serde::Serialize;

use crate::domain::ErrorKind;

/// What a safe completion resolved to. Every variant is displayable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatOutcome {
    /// The provider answered
    Answer { text: String },
    /// Locally computed substitute; `kind` is why the provider gave no answer
    Fallback { kind: ErrorKind, text: String },
    /// Explanatory warning for a failure the user can act on
    Notice { kind: ErrorKind, text: String },
}

impl ChatOutcome {
    pub fn answer(text: impl Into<String>) -> Self {
        Self::Answer { text: text.into() }
    }

    pub fn fallback(kind: ErrorKind, text: impl Into<String>) -> Self {
        Self::Fallback {
            kind,
            text: text.into(),
        }
    }

    pub fn notice(kind: ErrorKind, text: impl Into<String>) -> Self {
        Self::Notice {
            kind,
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Answer { text } | Self::Fallback { text, .. } | Self::Notice { text, .. } => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Answer { text } | Self::Fallback { text, .. } | Self::Notice { text, .. } => text,
        }
    }

    /// Error kind behind a degraded outcome; `None` for a real answer
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Answer { .. } => None,
            Self::Fallback { kind, .. } | Self::Notice { kind, .. } => Some(*kind),
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, Self::Answer { .. })
    }
}
