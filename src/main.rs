//! Page-Harvest main entry point
//!
//! This is the command-line interface for the Page-Harvest page scraper.

use anyhow::Context;
use clap::Parser;
use page_harvest::config::{load_config, validate, Config};
use page_harvest::output::{print_download_summary, render_json, DownloadSummary};
use page_harvest::download::download_media_with_config;
use page_harvest::{validate_target_url, Harvester};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Page-Harvest: contact and media extraction for a single page
///
/// Page-Harvest fetches one web page and reports its title, description,
/// emails, phone numbers, social links, images, videos and documents as
/// JSON. Discovered media can optionally be downloaded.
#[derive(Parser, Debug)]
#[command(name = "page-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Contact and media extraction for a single web page", long_about = None)]
struct Cli {
    /// Page to scrape (scheme optional, https is assumed)
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Download discovered media after scraping
    #[arg(long)]
    download: bool,

    /// Download destination directory
    #[arg(long, value_name = "DIR")]
    dest: Option<PathBuf>,

    /// Maximum size of a downloaded file in megabytes
    #[arg(long, value_name = "MB")]
    max_file_size: Option<u64>,

    /// Maximum number of downloads in flight
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Exit with the fetch error instead of printing empty data
    #[arg(long)]
    strict: bool,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,

    /// Validate URL and config, print the effective settings, and exit
    #[arg(long)]
    dry_run: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_config(&cli)?;
    let target = validate_target_url(&cli.url).context("Invalid target URL")?;

    if cli.dry_run {
        handle_dry_run(&config, target.as_str(), cli.download);
        return Ok(());
    }

    let harvester = Harvester::new(&config.fetcher)?;

    let data = if cli.strict {
        harvester
            .try_scrape(target.as_str())
            .await
            .with_context(|| format!("Failed to scrape {}", target))?
    } else {
        harvester.scrape(target.as_str()).await
    };

    println!("{}", render_json(&data, !cli.compact)?);

    if cli.download {
        tracing::info!(
            "Starting media download to {}",
            config.download.destination.display()
        );
        let results =
            download_media_with_config(&data, &config.download, &config.fetcher).await;

        if !cli.quiet {
            println!();
            print_download_summary(&DownloadSummary::from_results(&results));
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("page_harvest=info,warn"),
            1 => EnvFilter::new("page_harvest=debug,info"),
            2 => EnvFilter::new("page_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so the JSON on stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(dest) = &cli.dest {
        config.download.destination = dest.clone();
    }
    if let Some(mb) = cli.max_file_size {
        config.download.max_file_size_mb = mb;
    }
    if let Some(n) = cli.concurrency {
        config.download.max_concurrent_downloads = n;
    }

    validate(&config).context("Invalid settings")?;
    Ok(config)
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config, target: &str, download: bool) {
    println!("=== Page-Harvest Dry Run ===\n");

    println!("Target:");
    println!("  URL: {}", target);

    println!("\nFetcher Configuration:");
    println!("  Timeout: {}ms", config.fetcher.timeout_ms);
    println!("  Max redirects: {}", config.fetcher.max_redirects);
    println!("  User agent: {}", config.fetcher.user_agent);

    let options = &config.download;
    println!("\nDownload Configuration:");
    println!("  Enabled: {}", download);
    println!("  Destination: {}", options.destination.display());
    println!("  Max file size: {}MB", options.max_file_size_mb);
    println!("  Max concurrent downloads: {}", options.max_concurrent_downloads);
    println!("  HEAD timeout: {}ms", options.head_timeout_ms);
    println!("  Download timeout: {}ms", options.download_timeout_ms);
    println!("  Image types: {}", options.allowed_image_types.join(", "));
    println!("  Video types: {}", options.allowed_video_types.join(", "));
    println!("  Document types: {}", options.allowed_document_types.join(", "));

    println!("\n✓ Configuration is valid");
}
