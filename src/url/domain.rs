use url::Url;

/// Extracts the network location (host plus explicit port) from a URL
///
/// This is the crawl scope: two URLs belong to the same site only when their
/// network locations are equal. Subdomains and schemes are not considered.
/// Default ports are omitted by the URL parser, so `http://a.test:80/` and
/// `http://a.test/` share a location.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use luna_crawler::url::network_location;
///
/// let url = Url::parse("https://EXAMPLE.com/path").unwrap();
/// assert_eq!(network_location(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(network_location(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn network_location(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Parses a URL string and returns its network location, if any
pub fn network_location_of(url_str: &str) -> Option<String> {
    Url::parse(url_str).ok().as_ref().and_then(network_location)
}
