use crate::UrlError;
use url::Url;

/// Scheme prepended to seeds that do not carry one
const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Normalizes a user-supplied URL string
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Prepend `http://` unless the string already starts with `http://` or `https://`
/// 3. Parse the URL; reject if malformed or hostless
///
/// # Arguments
///
/// * `raw` - The URL string to normalize, scheme optional
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse the URL
///
/// # Examples
///
/// ```
/// use site_word_finder::url::normalize_url;
///
/// let url = normalize_url("example.com/home").unwrap();
/// assert_eq!(url.as_str(), "http://example.com/home");
/// ```
pub fn normalize_url(raw: &str) -> Result<Url, UrlError> {
    let raw = raw.trim();
    let lower = raw.to_ascii_lowercase();

    let with_scheme = if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else {
        format!("{}{}", DEFAULT_SCHEME_PREFIX, raw)
    };

    let url = Url::parse(&with_scheme).map_err(|e| UrlError::Parse(format!("{}: {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}

/// Strips the fragment from a URL
///
/// Scheme, user-info, host, port, path and query are preserved. Two URLs that
/// differ only by fragment canonicalize to the same value, which makes the result
/// usable as a frontier key.
///
/// # Examples
///
/// ```
/// use site_word_finder::url::canonicalize;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/page?q=1#section").unwrap();
/// assert_eq!(canonicalize(&url).as_str(), "https://example.com/page?q=1");
/// ```
pub fn canonicalize(url: &Url) -> Url {
    let mut canonical = url.clone();
    canonical.set_fragment(None);
    canonical
}
