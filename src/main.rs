use clap::Parser;
use insights_gateway::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Status(args) => cli::status::run(args).await,
        Command::Ask(args) => cli::ask::run(args).await,
        Command::Summarize(args) => cli::summarize::run(args).await,
    }
}
