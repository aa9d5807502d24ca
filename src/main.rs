//! Shopcrawl main entry point
//!
//! Command-line interface for the product-page discovery crawler.

use anyhow::Context;
use clap::Parser;
use shopcrawl::config::load_config_with_hash;
use shopcrawl::crawler::crawl;
use shopcrawl::output::write_report;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Shopcrawl: a product-page discovery crawler
///
/// Crawls each configured seed domain concurrently, collects URLs whose
/// path matches the configured product patterns, and writes an aggregate
/// JSON report.
#[derive(Parser, Debug)]
#[command(name = "shopcrawl")]
#[command(version = "1.0.0")]
#[command(about = "A product-page discovery crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(config).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shopcrawl=info,warn"),
            1 => EnvFilter::new("shopcrawl=debug,info"),
            2 => EnvFilter::new("shopcrawl=trace,debug"),
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

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &shopcrawl::config::Config) {
    println!("=== Shopcrawl Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max retries: {}", config.crawler.max_retries);
    println!("  Fetch timeout: {}s", config.crawler.fetch_timeout_secs);
    println!("  Backoff unit: {}ms", config.crawler.backoff_unit_ms);
    println!(
        "  Max workers per domain: {}",
        config.crawler.max_workers_per_domain
    );
    println!(
        "  Max concurrent fetches: {}",
        config.crawler.max_concurrent_fetches
    );

    println!("\nUser Agent:");
    println!("  {}", config.user_agent.header_value());

    println!("\nProduct Patterns ({}):", config.classifier.product_patterns.len());
    for pattern in &config.classifier.product_patterns {
        println!("  - {}", pattern);
    }

    println!("\nOutput:");
    println!("  Report: {}", config.output.report_path);

    println!("\nSeed Domains ({}):", config.seeds.len());
    for domain in &config.seeds {
        println!("  - {} (https://{})", domain, domain);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation
async fn handle_crawl(config: shopcrawl::config::Config) -> anyhow::Result<()> {
    tracing::info!("Seed domains: {}", config.seeds.len());

    let report_path = PathBuf::from(&config.output.report_path);

    let cancel = CancellationToken::new();
    spawn_ctrl_c_handler(cancel.clone());

    let report = crawl(config, cancel).await.context("crawl failed")?;

    tracing::info!(
        "Discovered {} product URLs across {} domains ({} failed fetches)",
        report.total_products(),
        report.products.len(),
        report.failed_urls
    );

    write_report(&report, Path::new(&report_path))
        .with_context(|| format!("failed to write report to {}", report_path.display()))?;

    Ok(())
}

/// Cancels the crawl on Ctrl-C; in-flight pages finish before the report
fn spawn_ctrl_c_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, stopping crawl after in-flight pages");
            cancel.cancel();
        }
    });
}
