//! Index-Ripple main entry point
//!
//! This is the command-line interface for the Index-Ripple directory listing crawler.

use anyhow::Context;
use clap::Parser;
use index_ripple::config::{load_config, CrawlConfig};
use index_ripple::crawler::{crawl, SeedSource};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Index-Ripple: a directory listing crawler
///
/// Crawls "Index of" pages served by static file servers and prints every
/// file and directory it finds. Seeds are taken from the arguments, or read
/// one per line from stdin when none are given.
#[derive(Parser, Debug)]
#[command(name = "index-ripple")]
#[command(version)]
#[command(about = "A directory listing crawler", long_about = None)]
struct Cli {
    /// URLs of listing pages to start from
    #[arg(value_name = "URL")]
    urls: Vec<String>,

    /// Number of pages fetched in parallel [default: 10]
    #[arg(short, long, value_parser = parse_concurrency)]
    concurrency: Option<usize>,

    /// Only print files; directories are still crawled
    #[arg(short, long)]
    files_only: bool,

    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all logging except errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load {}", path.display()))?
        }
        None => CrawlConfig::default(),
    };
    let config = file_config.with_overrides(cli.concurrency, cli.files_only);

    if cli.urls.is_empty() {
        tracing::info!("No URLs given, reading seeds from stdin");
    }
    let seeds = SeedSource::args_or_stdin(cli.urls);

    let summary = crawl(config, seeds).await.context("crawl failed")?;
    tracing::info!("{}", summary);

    Ok(())
}

/// Parses a worker count, which must fit in `usize` and be at least 1
fn parse_concurrency(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout carries nothing but results.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("index_ripple=warn,warn"),
            1 => EnvFilter::new("index_ripple=info,warn"),
            2 => EnvFilter::new("index_ripple=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
