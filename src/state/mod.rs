//! State module for tracking crawl progress
//!
//! This module provides the per-session state that a running crawl writes and
//! pollers read.
//!
//! # Components
//!
//! - `CrawlStatus`: idle → running → done lifecycle of a session
//! - `CrawlOutcome`: why a finished session stopped
//! - `CrawlSession`: the full record kept in the session store
//! - `StatusSnapshot`: the poll-facing view of a session

mod session;

// Re-export main types
pub use session::{CrawlOutcome, CrawlSession, CrawlStatus, SessionKey, StatusSnapshot};
