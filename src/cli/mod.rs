//! CLI module for the insights gateway
//!
//! Provides subcommands:
//! - `status`: check the OpenAI configuration, optionally with a live probe
//! - `ask`: ask a question about a CSV dataset
//! - `summarize`: summarize a saved layout of chart figures

pub mod ask;
pub mod status;
pub mod summarize;

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{debug, warn};

use crate::config::{self, AppConfig, GatewayConfig};
use crate::domain::ChatGateway;
use crate::infrastructure::llm::{HttpClient, OpenAiTransport};
use crate::infrastructure::logging;
use crate::infrastructure::services::{InsightsReply, InsightsService};

/// Insights gateway - LLM-backed answers about tabular data
#[derive(Parser)]
#[command(name = "insights-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Report whether the OpenAI configuration is usable
    Status(status::StatusArgs),

    /// Ask a question about a CSV dataset
    Ask(ask::AskArgs),

    /// Summarize a layout given as a JSON array of chart figures
    Summarize(summarize::SummarizeArgs),
}

/// Settings shared by every subcommand once the environment is loaded
pub struct Bootstrap {
    pub app: AppConfig,
    pub gateway: GatewayConfig,
}

/// Apply `secrets.env`, load layered settings and start logging
pub fn bootstrap() -> anyhow::Result<Bootstrap> {
    let env_file = config::load_env_file(config::DEFAULT_ENV_FILE)?;

    let app = AppConfig::load().unwrap_or_default();
    let gateway = GatewayConfig::from_env(&app.gateway);
    logging::init_logging(&app.logging, gateway.debug);

    if !env_file.skipped_lines.is_empty() {
        warn!(
            file = config::DEFAULT_ENV_FILE,
            skipped = env_file.skipped_lines.len(),
            "Skipped malformed lines in env file"
        );
    }

    debug!(
        env_file = config::DEFAULT_ENV_FILE,
        loaded = env_file.found,
        model = %gateway.model,
        "Configuration loaded"
    );

    Ok(Bootstrap { app, gateway })
}

/// Insights service talking to the configured OpenAI endpoint
pub fn build_service(
    settings: &Bootstrap,
) -> anyhow::Result<InsightsService<OpenAiTransport<HttpClient>>> {
    let timeout = Duration::from_secs(settings.app.openai.request_timeout_secs);
    let client = HttpClient::with_timeout(timeout)?;

    let api_key = settings
        .gateway
        .api_key
        .as_ref()
        .map(|key| key.expose())
        .unwrap_or_default();
    let transport = OpenAiTransport::with_base_url(client, api_key, &settings.app.openai.base_url);

    let gateway = ChatGateway::new(settings.gateway.clone(), transport);
    Ok(InsightsService::new(gateway))
}

/// Print a reply as plain text or as JSON
pub fn print_reply(reply: &InsightsReply, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
    } else {
        println!("{}", reply.text());
    }

    Ok(())
}
