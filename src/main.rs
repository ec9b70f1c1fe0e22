//! HCPCS-Harvest main entry point
//!
//! Command-line interface for the HCPCS code catalog scraper. Running with
//! no arguments crawls the public reference site with built-in defaults
//! and writes the full catalog CSV.

use clap::Parser;
use hcpcs_harvest::config::load_config;
use hcpcs_harvest::scrape::harvest;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// HCPCS-Harvest: scrape the HCPCS billing-code reference into a CSV catalog
#[derive(Parser, Debug)]
#[command(name = "hcpcs-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Compile the HCPCS code reference into a flat CSV catalog", long_about = None)]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the output CSV path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate configuration and show the crawl plan without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = load_config(cli.config.as_deref())?;
    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    tracing::info!(
        "Starting harvest of {}{}",
        config.source.base_url,
        config.source.directory_path
    );

    match harvest(config).await {
        Ok(()) => {
            tracing::info!("Harvest completed successfully");
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hcpcs_harvest=info,warn"),
            1 => EnvFilter::new("hcpcs_harvest=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: print the crawl plan without touching the network
fn handle_dry_run(config: &hcpcs_harvest::config::Config) {
    println!("=== HCPCS-Harvest Dry Run ===\n");

    println!("Source:");
    println!("  Base URL: {}", config.source.base_url);
    println!("  Directory path: {}", config.source.directory_path);
    println!("  User-Agent: {}", config.source.user_agent);

    println!("\nOutput:");
    println!("  CSV path: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would crawl {}{} and every linked group and code page",
        config.source.base_url, config.source.directory_path
    );
}
