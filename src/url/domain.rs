use url::Url;

/// Extracts the host from a URL, lowercased
///
/// # Arguments
///
/// * `url` - The URL to extract the host from
///
/// # Returns
///
/// * `Some(String)` - The lowercase host
/// * `None` - If the URL has no host
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_word_finder::url::host_of;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(host_of(&url), Some("example.com".to_string()));
/// ```
pub fn host_of(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns true if the URL's host equals the scope host, ignoring case
pub fn is_in_scope(url: &Url, scope_host: &str) -> bool {
    url.host_str()
        .is_some_and(|host| host.eq_ignore_ascii_case(scope_host))
}
