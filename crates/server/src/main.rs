//! HTTP server binary for the college finder.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use server::{run_server, FinderArgs, FinderConfig};

#[derive(Parser, Debug)]
#[command(name = "college-finder-server", about = "Streams college recommendations over HTTP")]
struct Cli {
    #[command(flatten)]
    finder: FinderArgs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    server::init_tracing("info,server=debug,pipeline=debug");

    let config = FinderConfig::load(&cli.finder)?;
    info!(
        bind = %config.bind,
        match_policy = %config.match_policy,
        llm = config.llm_enabled(),
        "Starting college finder server"
    );

    run_server(config).await
}
