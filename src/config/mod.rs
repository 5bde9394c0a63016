//! Configuration module for Luna Crawler
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file means `Config::default()`.
//!
//! # Example
//!
//! ```no_run
//! use luna_crawler::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("luna.toml")).unwrap();
//! println!("Request timeout: {}s", config.crawler.request_timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, OutputConfig, SessionConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
