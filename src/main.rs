//! Luna Crawler main entry point
//!
//! This is the command-line interface for the Luna site crawler and offer
//! calculator.

use anyhow::Context;
use clap::Parser;
use luna_crawler::config::{load_config, validate, Config};
use luna_crawler::output::{export_csv, print_report, CrawlLog, FileCrawlLog, NoopCrawlLog};
use luna_crawler::{CrawlService, CrawlStatus, SessionKey};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Luna Crawler: find every page of a website and size the offer
///
/// Crawls all HTML pages reachable from DOMAIN through links on the same
/// host, shows live progress, and prints the page list together with the
/// calculated Luna package.
#[derive(Parser, Debug)]
#[command(name = "luna-crawler")]
#[command(version)]
#[command(about = "Same-domain website crawler and offer calculator", long_about = None)]
struct Cli {
    /// Start URL, including the scheme (e.g. https://example.com)
    #[arg(value_name = "DOMAIN")]
    domain: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Session key to report under (generated when omitted)
    #[arg(long)]
    session: Option<String>,

    /// Write the found pages to this CSV file
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Append the crawl log to this file
    #[arg(long, value_name = "FILE", conflicts_with = "no_log")]
    log: Option<PathBuf>,

    /// Do not write a crawl log
    #[arg(long)]
    no_log: bool,

    /// Stop after this many pages have been found
    #[arg(long)]
    max_pages: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Interval between status polls in milliseconds
    #[arg(long, default_value_t = 1000)]
    poll_interval_ms: u64,

    /// Print the final report as JSON
    #[arg(long)]
    json: bool,

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
    let log: Arc<dyn CrawlLog> = if cli.no_log {
        Arc::new(NoopCrawlLog)
    } else {
        Arc::new(FileCrawlLog::new(&config.output.log_path))
    };

    let service = CrawlService::from_config_with_log(&config, log)?;
    let key = service.start_crawl(&cli.domain, cli.session.as_deref().map(SessionKey::from))?;

    poll_until_done(&service, &key, &cli).await;
    service.join(&key).await;

    let report = service
        .results(&key)
        .context("crawl session finished without results")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if !cli.quiet {
        print_report(&report);
    }

    let csv_path = cli
        .csv
        .clone()
        .or_else(|| config.output.csv_path.as_ref().map(PathBuf::from));
    if let Some(csv_path) = csv_path {
        export_csv(&report.urls, &csv_path)
            .with_context(|| format!("failed to write {}", csv_path.display()))?;
        if !cli.quiet && !cli.json {
            println!("\n✓ CSV exported to: {}", csv_path.display());
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
            0 => EnvFilter::new("luna_crawler=info,warn"),
            1 => EnvFilter::new("luna_crawler=debug,info"),
            2 => EnvFilter::new("luna_crawler=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the configuration file (if any) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            load_config(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = Some(max_pages);
    }
    if let Some(timeout) = cli.timeout {
        config.crawler.request_timeout_secs = timeout;
    }
    if let Some(log) = &cli.log {
        config.output.log_path = log.display().to_string();
    }

    validate(&config).context("invalid configuration")?;
    Ok(config)
}

/// Polls the session and prints progress until it is done
///
/// Ctrl-C cancels the crawl; the pages found so far are still reported.
async fn poll_until_done(service: &CrawlService, key: &SessionKey, cli: &Cli) {
    let mut interval = tokio::time::interval(Duration::from_millis(cli.poll_interval_ms.max(10)));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut cancelled = false;

    loop {
        tokio::select! {
            _ = interval.tick() => {}
            result = &mut ctrl_c, if !cancelled => {
                if result.is_ok() {
                    tracing::warn!("Interrupted, cancelling crawl");
                    service.cancel(key);
                }
                cancelled = true;
            }
        }

        let status = service.status(key);
        if status.status == CrawlStatus::Done {
            break;
        }

        if !cli.quiet && !cli.json {
            eprintln!(
                "Status: {} | Gefunden: {} | Aktuell: {}",
                status.status, status.found_count, status.current_url
            );
        }
    }
}
