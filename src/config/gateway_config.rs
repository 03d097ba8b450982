use std::fmt;
use std::time::Duration;

use thiserror::Error;

use super::app_config::GatewaySettings;

/// Environment variable holding the provider credential
pub const API_KEY_VAR: &str = "OPEN_AI_KEY";
/// Environment variable switching on debug logging
pub const DEBUG_VAR: &str = "DEBUG";
/// Prefix every provider credential starts with
pub const API_KEY_PREFIX: &str = "sk-";

/// Why a configuration cannot be used to reach the provider
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("OpenAI API key not found. Please set the OPEN_AI_KEY environment variable.")]
    MissingApiKey,

    #[error("Invalid OpenAI API key format. API keys should start with 'sk-'.")]
    InvalidApiKeyFormat,
}

/// Secret credential; never printed
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Credential, model and retry policy for the chat gateway.
/// Built once at startup and only read afterwards.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub api_key: Option<ApiKey>,
    pub model: String,
    pub max_retries: u32,
    pub base_delay: Duration,
    pub rate_limit_enabled: bool,
    pub max_requests_per_minute: u32,
    pub show_detailed_errors: bool,
    pub fallback_enabled: bool,
    pub debug: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::from_settings(&GatewaySettings::default(), None, false)
    }
}

impl GatewayConfig {
    pub fn from_settings(settings: &GatewaySettings, api_key: Option<String>, debug: bool) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.is_empty()).map(ApiKey::new),
            model: settings.model.clone(),
            max_retries: settings.max_retries,
            base_delay: Duration::try_from_secs_f64(settings.base_delay_secs).unwrap_or_default(),
            rate_limit_enabled: settings.rate_limit_enabled,
            max_requests_per_minute: settings.max_requests_per_minute,
            show_detailed_errors: settings.show_detailed_errors,
            fallback_enabled: settings.fallback_enabled,
            debug,
        }
    }

    /// Read the credential and debug flag from the process environment
    pub fn from_env(settings: &GatewaySettings) -> Self {
        Self::from_lookup(settings, |name| std::env::var(name).ok())
    }

    /// Same as `from_env` with an explicit variable lookup
    pub fn from_lookup(settings: &GatewaySettings, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let debug = lookup(DEBUG_VAR)
            .map(|value| value.to_lowercase() == "true")
            .unwrap_or(false);

        Self::from_settings(settings, lookup(API_KEY_VAR), debug)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(ApiKey::new(key));
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_retry(mut self, max_retries: u32, base_delay: Duration) -> Self {
        self.max_retries = max_retries;
        self.base_delay = base_delay;
        self
    }

    pub fn with_rate_limit(mut self, enabled: bool, max_requests_per_minute: u32) -> Self {
        self.rate_limit_enabled = enabled;
        self.max_requests_per_minute = max_requests_per_minute;
        self
    }

    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback_enabled = enabled;
        self
    }

    pub fn with_detailed_errors(mut self, enabled: bool) -> Self {
        self.show_detailed_errors = enabled;
        self
    }

    /// Check the credential before any network call is attempted
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let key = self
            .api_key
            .as_ref()
            .ok_or(ConfigValidationError::MissingApiKey)?;

        if !key.expose().starts_with(API_KEY_PREFIX) {
            return Err(ConfigValidationError::InvalidApiKeyFormat);
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn status_message(&self) -> String {
        match self.validate() {
            Ok(()) => "✅ OpenAI API configuration is valid".to_string(),
            Err(e) => format!("⚠️ OpenAI API configuration issue: {}", e),
        }
    }
}
