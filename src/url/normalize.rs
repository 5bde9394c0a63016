use url::Url;

/// Normalizes a URL for deduplication
///
/// # Normalization Steps
///
/// 1. Parse the URL
/// 2. Remove fragment (everything after #)
/// 3. Remove the query string when `keep_query` is false
/// 4. Serialize back to a string (lowercased scheme and host, empty path becomes /)
///
/// Strings that do not parse as absolute URLs are never rejected here. They
/// are cut at `#` (and at `?` when dropping the query) and returned as-is, so
/// the fetch for them fails later instead.
///
/// # Examples
///
/// ```
/// use luna_crawler::url::normalize_url;
///
/// assert_eq!(normalize_url("http://a.test/p1#frag", true), "http://a.test/p1");
/// assert_eq!(normalize_url("http://a.test/p1?x=1#frag", false), "http://a.test/p1");
/// ```
pub fn normalize_url(url_str: &str, keep_query: bool) -> String {
    match Url::parse(url_str) {
        Ok(mut url) => {
            url.set_fragment(None);
            if !keep_query {
                url.set_query(None);
            }
            url.into()
        }
        Err(_) => normalize_unparsed(url_str, keep_query),
    }
}

fn normalize_unparsed(url_str: &str, keep_query: bool) -> String {
    let without_fragment = url_str.split('#').next().unwrap_or_default();
    if keep_query {
        without_fragment.to_string()
    } else {
        without_fragment
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string()
    }
}
