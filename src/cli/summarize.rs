//! Summarize command - narrative summary of a saved chart layout

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde_json::Value;

use super::{bootstrap, build_service, print_reply};

/// Arguments for the summarize command
#[derive(Args, Clone)]
pub struct SummarizeArgs {
    /// JSON file holding an array of chart figures
    #[arg(long)]
    pub layout: PathBuf,

    /// Print the reply as JSON, including its rendering kind
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: SummarizeArgs) -> anyhow::Result<()> {
    let settings = bootstrap()?;

    let raw = std::fs::read_to_string(&args.layout)
        .with_context(|| format!("Failed to read layout file {}", args.layout.display()))?;
    let figures: Vec<Value> = serde_json::from_str(&raw)
        .with_context(|| format!("Layout file {} is not a JSON array", args.layout.display()))?;

    let service = build_service(&settings)?;
    let reply = service.summarize_layout(&figures).await;

    print_reply(&reply, args.json)
}
