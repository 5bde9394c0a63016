//! HTML link extraction
//!
//! This module is the boundary to HTML parsing: it yields the raw `href`
//! targets of a document and resolves them against the page they came from.

use scraper::{Html, Selector};
use url::Url;

/// Extracts hyperlink targets from an HTML document
pub trait LinkExtractor: Send + Sync {
    /// Returns the raw (possibly relative) `href` values in document order
    fn extract_hyperlinks(&self, html: &str) -> Vec<String>;
}

/// Link extractor backed by `scraper`, reading every `<a href>`
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlLinkExtractor;

impl LinkExtractor for HtmlLinkExtractor {
    fn extract_hyperlinks(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);
        let Ok(selector) = Selector::parse("a[href]") else {
            return Vec::new();
        };

        document
            .select(&selector)
            .filter_map(|element| element.value().attr("href"))
            .map(str::to_string)
            .collect()
    }
}

/// Resolves a link href to an absolute HTTP(S) URL
///
/// Returns None for empty hrefs, hrefs that cannot be joined onto the base,
/// and targets with any other scheme (`mailto:`, `javascript:`, ...).
///
/// # Example
///
/// ```
/// use luna_crawler::crawler::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/intro").unwrap();
/// assert_eq!(
///     resolve_link("setup", &base),
///     Some("https://example.com/docs/setup".to_string())
/// );
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    match absolute_url.scheme() {
        "http" | "https" => Some(absolute_url.into()),
        _ => None,
    }
}
