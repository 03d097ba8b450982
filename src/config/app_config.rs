use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub gateway: GatewaySettings,
    pub openai: OpenAiSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Retry, rate limiting and error presentation knobs of the chat gateway
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewaySettings {
    pub model: String,
    pub max_retries: u32,
    pub base_delay_secs: f64,
    pub rate_limit_enabled: bool,
    pub max_requests_per_minute: u32,
    pub show_detailed_errors: bool,
    pub fallback_enabled: bool,
}

/// Where and how the chat-completion endpoint is reached
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OpenAiSettings {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_retries: 3,
            base_delay_secs: 1.0,
            rate_limit_enabled: true,
            max_requests_per_minute: 60,
            show_detailed_errors: false,
            fallback_enabled: true,
        }
    }
}

impl Default for OpenAiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
