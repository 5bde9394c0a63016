/// Suffixes of resources that are never HTML pages
pub const EXCLUDED_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".svg", ".ico", ".pdf", ".doc", ".docx",
    ".xls", ".xlsx", ".zip", ".rar", ".7z", ".mp4", ".mp3",
];

/// Returns true if the URL ends with a known non-HTML extension
///
/// The comparison is case-insensitive and applies to the whole string, so
/// `/report.pdf?download=1` is not excluded. This is a cheap pre-filter to
/// save fetches; the Content-Type check after fetching is authoritative.
///
/// # Examples
///
/// ```
/// use luna_crawler::url::is_excluded;
///
/// assert!(is_excluded("http://x/a.PDF"));
/// assert!(!is_excluded("http://x/a.html"));
/// ```
pub fn is_excluded(url: &str) -> bool {
    let lowered = url.to_lowercase();
    EXCLUDED_EXTENSIONS
        .iter()
        .any(|extension| lowered.ends_with(extension))
}
