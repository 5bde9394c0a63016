//! Crawler module for site discovery
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching behind the `Fetcher` trait
//! - HTML link extraction behind the `LinkExtractor` trait
//! - The breadth-first crawl engine
//! - The service that spawns, cancels and queries crawl runs

mod engine;
mod fetcher;
mod parser;
mod progress;
mod service;

pub use engine::{CrawlEngine, CrawlSettings};
pub use fetcher::{build_http_client, FetchError, FetchResult, FetchedPage, Fetcher, HttpFetcher};
pub use parser::{resolve_link, HtmlLinkExtractor, LinkExtractor};
pub use service::CrawlService;
