use crate::package::{calculate_package, Package};
use crate::state::{CrawlOutcome, CrawlSession, CrawlStatus};
use serde::Serialize;

/// Final result of a finished crawl session
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrawlReport {
    /// Seed URL the crawl started from
    pub seed: String,

    /// Sorted page URLs
    pub urls: Vec<String>,

    pub package: Package,
    pub outcome: CrawlOutcome,
}

impl CrawlReport {
    /// Builds the report for a session; None unless the session is done
    pub fn from_session(session: &CrawlSession) -> Option<Self> {
        if session.status != CrawlStatus::Done {
            return None;
        }

        Some(Self {
            seed: session.seed.clone(),
            urls: session.results.clone(),
            package: calculate_package(session.results.len()),
            outcome: session.outcome.unwrap_or(CrawlOutcome::Completed),
        })
    }
}

/// Prints a crawl report to stdout
pub fn print_report(report: &CrawlReport) {
    println!("=== Luna Crawl Report ===\n");
    println!("Domain: {}", report.seed);
    if !report.outcome.is_complete() {
        println!("Note: crawl stopped early ({})", report.outcome);
    }

    println!("\nGefundene Unterseiten ({}):", report.urls.len());
    for url in &report.urls {
        println!("  - {}", url);
    }

    println!("\nBerechnetes Luna-Paket:");
    println!("  {}", report.package.tier);
    println!("  Preis: {}", report.package.upfront_price);
    println!("  Monatliche Gebühr: {}", report.package.monthly_fee);
}
