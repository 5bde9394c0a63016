//! Session state definitions for tracking crawl progress

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Opaque identifier of a crawl session
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Generates a fresh random key (UUID v4)
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Lifecycle state of a crawl session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlStatus {
    /// Never started
    #[default]
    Idle,

    /// A crawl is traversing the site
    Running,

    /// Terminal; results are available
    Done,
}

impl CrawlStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for CrawlStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reason a finished crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CrawlOutcome {
    /// The frontier was exhausted
    Completed,

    /// The run was cancelled before the frontier was exhausted
    Cancelled,

    /// The configured page cap was reached with links still queued
    PageCapReached,

    /// The crawl task failed unexpectedly
    Aborted,
}

impl CrawlOutcome {
    /// Returns true if the result set covers the whole reachable site
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl fmt::Display for CrawlOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::PageCapReached => "page-cap-reached",
            Self::Aborted => "aborted",
        };
        f.write_str(label)
    }
}

/// Full state of one crawl session
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlSession {
    pub status: CrawlStatus,

    /// Normalized URL currently being fetched (empty before the first fetch)
    pub current_url: String,

    /// Number of HTML pages found so far
    pub found_count: usize,

    /// Sorted, deduplicated page URLs; empty until `status` is `Done`
    pub results: Vec<String>,

    /// Generation of the run owning this slot; writes from other runs are ignored
    pub run_id: u64,

    /// Set once the session is done
    pub outcome: Option<CrawlOutcome>,

    /// Seed URL the run started from
    pub seed: String,

    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl CrawlSession {
    /// Creates the running state a new run starts from
    pub fn start(run_id: u64, seed: impl Into<String>) -> Self {
        Self {
            status: CrawlStatus::Running,
            current_url: String::new(),
            found_count: 0,
            results: Vec::new(),
            run_id,
            outcome: None,
            seed: seed.into(),
            started_at: Some(Utc::now()),
            finished_at: None,
        }
    }

    /// Transitions to `Done`, storing the sorted and deduplicated results
    pub fn finish(&mut self, mut pages: Vec<String>, outcome: CrawlOutcome) {
        pages.sort();
        pages.dedup();
        self.found_count = pages.len();
        self.results = pages;
        self.status = CrawlStatus::Done;
        self.outcome = Some(outcome);
        self.finished_at = Some(Utc::now());
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            status: self.status,
            current_url: self.current_url.clone(),
            found_count: self.found_count,
        }
    }
}

impl Default for CrawlSession {
    fn default() -> Self {
        Self {
            status: CrawlStatus::Idle,
            current_url: String::new(),
            found_count: 0,
            results: Vec::new(),
            run_id: 0,
            outcome: None,
            seed: String::new(),
            started_at: None,
            finished_at: None,
        }
    }
}

/// Poll-facing view of a session
///
/// Serializes as `{"status": "...", "current": "...", "found": N}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StatusSnapshot {
    pub status: CrawlStatus,
    #[serde(rename = "current")]
    pub current_url: String,
    #[serde(rename = "found")]
    pub found_count: usize,
}
