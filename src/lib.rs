//! Luna Crawler: a same-domain site mapper with live progress
//!
//! This crate discovers every HTML page reachable from a seed URL through
//! same-host hyperlinks, exposes per-session progress for polling, and sizes
//! the result into a commercial package.

pub mod config;
pub mod crawler;
pub mod output;
pub mod package;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Luna Crawler operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Luna Crawler operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlEngine, CrawlService};
pub use package::{calculate_package, Package, Tier};
pub use state::{CrawlOutcome, CrawlSession, CrawlStatus, SessionKey, StatusSnapshot};
pub use storage::{MemorySessionStore, SessionStore};
pub use crate::url::{is_excluded, normalize_url};
