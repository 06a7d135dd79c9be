use anyhow::{Context, Result};
use catalog::CollegeRecord;
use clap::{Parser, Subcommand};
use colored::Colorize;
use server::{run_server, FinderArgs, FinderConfig, PacingConfig, StreamEmitter};
use std::io::Write;
use std::time::Instant;
use tokio_stream::StreamExt;
use tracing::info;

/// College Finder - streamed college recommendations
#[derive(Parser)]
#[command(name = "college-finder")]
#[command(about = "Find colleges from a free-text request", long_about = None)]
struct Cli {
    #[command(flatten)]
    finder: FinderArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server
    Serve,

    /// Answer a query and stream it to the terminal
    Ask {
        /// Free-text request, e.g. "engineering colleges in Delhi"
        #[arg(long)]
        query: String,

        /// Print the answer at once instead of word by word
        #[arg(long)]
        no_pacing: bool,
    },

    /// Show which catalog records a query matches
    Search {
        #[arg(long)]
        query: String,
    },

    /// List the loaded catalog
    Catalog,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs share stdout with the answer, so keep one-shot commands quiet
    let default_filter = match cli.command {
        Commands::Serve => "info",
        _ => "warn",
    };
    server::init_tracing(default_filter);

    let config = FinderConfig::load(&cli.finder).context("Invalid configuration")?;

    match cli.command {
        Commands::Serve => run_server(config).await?,
        Commands::Ask { query, no_pacing } => handle_ask(&config, query, no_pacing).await?,
        Commands::Search { query } => handle_search(&config, &query).await?,
        Commands::Catalog => handle_catalog(&config)?,
    }

    Ok(())
}

/// Handle the 'ask' command
async fn handle_ask(config: &FinderConfig, query: String, no_pacing: bool) -> Result<()> {
    let query = query.trim().to_string();
    anyhow::ensure!(!query.is_empty(), "Query is required");

    let finder = server::build_finder(config)?;
    if !finder.llm_available() {
        println!("{}", "(offline mode: answering from the local catalog)".dimmed());
    }

    let pacing = if no_pacing {
        PacingConfig::disabled()
    } else {
        config.pacing
    };

    let start = Instant::now();
    let mut stream = StreamEmitter::new(pacing).spawn(async move { finder.answer(&query).await });

    let mut stdout = std::io::stdout();
    while let Some(item) = stream.next().await {
        let chunk = item.unwrap_or_else(|never| match never {});
        stdout.write_all(&chunk)?;
        stdout.flush()?;
    }
    println!();
    info!("Answer streamed in {:?}", start.elapsed());
    Ok(())
}

/// Handle the 'search' command
async fn handle_search(config: &FinderConfig, query: &str) -> Result<()> {
    let finder = server::build_finder(config)?;
    let (terms, matches) = finder.search(query).await?;

    let terms: Vec<&str> = terms.iter().collect();
    println!(
        "{} [{}] ({} policy)",
        "Search terms:".bold().blue(),
        terms.join(", "),
        config.match_policy
    );
    println!(
        "{} of {} colleges match\n",
        matches.len().to_string().green(),
        finder.catalog().len()
    );
    print_records(&matches);
    Ok(())
}

/// Handle the 'catalog' command
fn handle_catalog(config: &FinderConfig) -> Result<()> {
    let catalog = server::load_catalog(config)?;
    println!(
        "{}",
        format!("Catalog ({} colleges):", catalog.len()).bold().blue()
    );
    print_records(catalog.records());
    Ok(())
}

fn print_records(records: &[CollegeRecord]) {
    for (rank, record) in records.iter().enumerate() {
        println!(
            "{}. {} - {} [{}/5, {}]",
            (rank + 1).to_string().green(),
            record.name.bold(),
            record.location,
            record.rating,
            record.fees
        );
        if !record.courses.is_empty() {
            println!("   Courses: {}", record.courses.join(", "));
        }
    }
}
