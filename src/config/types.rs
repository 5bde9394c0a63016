use serde::Deserialize;
use std::time::Duration;

/// Default per-request timeout, matching the interactive crawler's five seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 5;

/// Main configuration structure for Luna Crawler
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub sessions: SessionConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Timeout for a single page fetch (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Stop a crawl once this many pages have been found
    #[serde(rename = "max-pages", default)]
    pub max_pages: Option<usize>,
}

impl CrawlerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            max_pages: None,
        }
    }
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value as `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "LunaCrawler".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the append-only crawl log
    #[serde(rename = "log-path", default = "default_log_path")]
    pub log_path: String,

    /// Path the CSV export is written to
    #[serde(rename = "csv-path", default)]
    pub csv_path: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
            csv_path: None,
        }
    }
}

fn default_log_path() -> String {
    "crawl_log.txt".to_string()
}

/// Session retention configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Maximum number of sessions kept; oldest finished sessions are evicted first
    #[serde(rename = "max-sessions", default)]
    pub max_sessions: Option<usize>,
}
