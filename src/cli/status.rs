//! Status command - configuration check with an optional live probe

use clap::Args;
use tracing::info;

use super::{bootstrap, build_service};
use crate::domain::{ChatRequest, ResponseClassifier, ResponseKind};

pub const PING_PROMPT: &str = "Say 'Hello, API is working!'";
pub const PING_FALLBACK_INFO: &str = "Test fallback response";
pub const PING_QUESTION: &str = "API connection test";

/// Arguments for the status command
#[derive(Args, Clone)]
pub struct StatusArgs {
    /// Also send a short request to the provider
    #[arg(long)]
    pub ping: bool,
}

/// Print the configuration status; fails when the configuration is unusable
pub async fn run(args: StatusArgs) -> anyhow::Result<()> {
    let settings = bootstrap()?;

    println!("{}", settings.gateway.status_message());
    println!("Model: {}", settings.gateway.model);
    println!("Max retries: {}", settings.gateway.max_retries);
    println!(
        "Rate limiting: {}",
        if settings.gateway.rate_limit_enabled {
            format!("{} requests/minute", settings.gateway.max_requests_per_minute)
        } else {
            "disabled".to_string()
        }
    );

    if let Err(e) = settings.gateway.validate() {
        anyhow::bail!(e);
    }

    if args.ping {
        info!(model = %settings.gateway.model, "Sending connectivity probe");

        let service = build_service(&settings)?;
        let outcome = service
            .gateway()
            .safe_complete(
                ChatRequest::from_prompt(PING_PROMPT),
                PING_FALLBACK_INFO,
                PING_QUESTION,
            )
            .await;

        let verdict = match ResponseClassifier::classify(&outcome) {
            ResponseKind::NormalAnswer if outcome.is_answer() => "✅ API connection is working",
            ResponseKind::NormalAnswer => "⚠️ API unreachable, fallback content was served",
            ResponseKind::ErrorNotice => "❌ API connection failed",
        };

        println!("{}", verdict);
        println!("Response: {}", outcome.text());
    }

    Ok(())
}
