//! HTTP fetcher implementation
//!
//! This module is the boundary to the HTTP transport:
//! - The `Fetcher` trait the engine fetches through
//! - A reqwest-backed implementation with a per-request timeout
//! - Classification of transport failures into `FetchError`

use crate::config::UserAgentConfig;
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// A response received for a fetched URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value, if present
    pub content_type: Option<String>,

    /// Page body; implementations may leave it empty for non-HTML responses
    pub body: String,
}

impl FetchedPage {
    /// Returns true for an HTTP 200 response whose Content-Type contains `text/html`
    pub fn is_html(&self) -> bool {
        self.status_code == StatusCode::OK.as_u16()
            && self
                .content_type
                .as_deref()
                .map(|value| value.to_lowercase().contains("text/html"))
                .unwrap_or(false)
    }
}

/// Reason a URL could not be fetched
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {message}")]
    Connect { url: String, message: String },

    #[error("HTTP error for {url}: {message}")]
    Request { url: String, message: String },

    #[error("Failed to read body of {url}: {message}")]
    Body { url: String, message: String },
}

/// Result of a single fetch
pub type FetchResult = Result<FetchedPage, FetchError>;

/// Transport used by the crawl engine
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Sends a GET request, giving up after `timeout`
    async fn get(&self, url: &str, timeout: Duration) -> FetchResult;
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed with reqwest's default policy.
///
/// # Example
///
/// ```no_run
/// use luna_crawler::config::UserAgentConfig;
/// use luna_crawler::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .gzip(true)
        .brotli(true)
        .build()
}

/// reqwest-backed fetcher
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// Fetches a URL
    ///
    /// | Condition                   | Result                |
    /// |-----------------------------|-----------------------|
    /// | URL does not parse          | `FetchError::InvalidUrl` |
    /// | Timeout                     | `FetchError::Timeout` |
    /// | Connection refused / DNS    | `FetchError::Connect` |
    /// | Any status, HTML 200        | page with body        |
    /// | Any other status or type    | page with empty body  |
    async fn get(&self, url: &str, timeout: Duration) -> FetchResult {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let response = self
            .client
            .get(parsed)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_error(url, e))?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let mut page = FetchedPage {
            status_code,
            content_type,
            body: String::new(),
        };

        // Only pages the engine will parse need their body downloaded
        if page.is_html() {
            page.body = response.text().await.map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    FetchError::Body {
                        url: url.to_string(),
                        message: e.to_string(),
                    }
                }
            })?;
        }

        Ok(page)
    }
}

/// Maps a reqwest error onto the fetch error taxonomy
fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    let url = url.to_string();
    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_connect() {
        FetchError::Connect {
            url,
            message: error.to_string(),
        }
    } else if error.is_builder() {
        FetchError::InvalidUrl {
            url,
            message: error.to_string(),
        }
    } else {
        FetchError::Request {
            url,
            message: error.to_string(),
        }
    }
}
