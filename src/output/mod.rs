//! Output module for crawl results
//!
//! This module handles:
//! - Exporting found pages as CSV
//! - The append-only, timestamped crawl log
//! - Building and printing the final crawl report

mod csv_export;
mod crawl_log;
mod report;

pub use csv_export::{export_csv, write_csv, CSV_HEADER};
pub use crawl_log::{CrawlLog, FileCrawlLog, NoopCrawlLog};
pub use report::{print_report, CrawlReport};

use thiserror::Error;

/// Errors raised while writing output files
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
