//! URL handling module for Luna Crawler
//!
//! This module provides URL normalization, crawl-scope (network location)
//! extraction, and the non-HTML extension pre-filter.

mod domain;
mod filter;
mod normalize;

// Re-export main functions
pub use domain::{network_location, network_location_of};
pub use filter::{is_excluded, EXCLUDED_EXTENSIONS};
pub use normalize::normalize_url;
