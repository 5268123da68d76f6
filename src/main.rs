//! Campus-Harvest main entry point
//!
//! This is the command-line interface for the Campus-Harvest crawler.

use anyhow::Context;
use campus_harvest::config::{load_config_with_hash, Config};
use campus_harvest::crawler::{domain_roots, run_crawl};
use campus_harvest::output::{export_csv, print_statistics};
use clap::Parser;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Campus-Harvest: a section-aware campus web crawler
///
/// Crawls the allow-listed university subdomains breadth-first, extracts
/// heading-delimited text sections and writes them to a CSV file.
#[derive(Parser, Debug)]
#[command(name = "campus-harvest")]
#[command(version = "1.0.0")]
#[command(about = "A section-aware campus web crawler", long_about = None)]
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

    /// Write the CSV here instead of the configured csv-path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Crawl from these URLs instead of the configured seeds (repeatable)
    #[arg(long = "seed", value_name = "URL")]
    seeds: Vec<String>,

    /// Override the configured page cap
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Append the log stream to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    match run(cli).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::error!("Fatal error: {:#}", e);
            Err(e)
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("campus_harvest=info,warn"),
            1 => EnvFilter::new("campus_harvest=debug,info"),
            2 => EnvFilter::new("campus_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }

    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (mut config, hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", hash);

    apply_overrides(&mut config, &cli);
    campus_harvest::config::validate(&config).context("invalid command-line overrides")?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    handle_crawl(&config).await
}

/// Applies command-line overrides on top of the loaded configuration
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(output) = &cli.output {
        config.output.csv_path = output.display().to_string();
    }
    if !cli.seeds.is_empty() {
        config.seeds.urls = cli.seeds.clone();
    }
    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
}

/// Handles the --dry-run mode: shows the resolved configuration
fn handle_dry_run(config: &Config) {
    println!("=== Campus-Harvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Max pages: {}", config.crawler.max_pages);
    println!("  Delay between requests: {}ms", config.crawler.delay_ms);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nRequest Headers:");
    println!("  User-Agent: {}", config.user_agent.user_agent);
    println!("  Accept-Language: {}", config.user_agent.accept_language);

    println!("\nAllowed Domains ({}):", config.scope.allowed_domains.len());
    for domain in &config.scope.allowed_domains {
        println!("  - {}", domain);
    }
    println!(
        "\nExcluded Extensions: {}",
        config.scope.excluded_extensions.join(", ")
    );

    println!("\nSeeds:");
    if !config.seeds.urls.is_empty() {
        for seed in &config.seeds.urls {
            println!("  * {}", seed);
        }
    } else if config.seeds.from_allowed_domains {
        for root in domain_roots(&config.scope.allowed_domains) {
            println!("  * {}", root);
        }
    } else if let Some(sitemap) = config.seeds.sitemap() {
        println!("  From sitemap: {}", sitemap);
    }

    println!("\nOutput:");
    println!("  CSV: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
}

/// Handles the main crawl operation followed by the CSV export
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    let report = run_crawl(config).await.context("crawl could not start")?;

    tracing::info!("Saving results to {}", config.output.csv_path);
    let rows = export_csv(&report.pages, Path::new(&config.output.csv_path))
        .with_context(|| format!("failed to write {}", config.output.csv_path))?;

    print_statistics(&report.stats, Some(rows));
    tracing::info!(
        "Crawl complete. Saved {} pages ({} rows)",
        report.pages.len(),
        rows
    );

    Ok(())
}
