//! Ask command - one question over a CSV dataset

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use super::{bootstrap, build_service, print_reply};
use crate::domain::Dataset;

/// Arguments for the ask command
#[derive(Args, Clone)]
pub struct AskArgs {
    /// CSV file with a header row
    #[arg(long)]
    pub csv: PathBuf,

    /// Print the reply as JSON, including its rendering kind
    #[arg(long)]
    pub json: bool,

    /// Question about the data
    pub question: String,
}

pub async fn run(args: AskArgs) -> anyhow::Result<()> {
    let settings = bootstrap()?;

    let dataset = Dataset::from_csv_path(&args.csv)?;
    info!(
        path = %args.csv.display(),
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "Dataset loaded"
    );

    let service = build_service(&settings)?;
    let reply = service.ask(&dataset, &args.question).await;

    print_reply(&reply, args.json)
}
