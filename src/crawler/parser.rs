//! HTML parser for extracting in-scope links
//!
//! Every `<a href>` is resolved against the page URL, filtered to the scope host
//! and to http(s), and canonicalized before it reaches the frontier.

use crate::url::{canonicalize, is_in_scope};
use scraper::{Html, Selector};
use url::Url;

/// Extracts same-host links from an HTML document
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document, resolved against `base_url`
///
/// **Exclude:**
/// - Links whose host differs from `scope_host` (case-insensitive)
/// - Non-HTTP(S) links (`javascript:`, `mailto:`, `tel:`, data URIs, ...)
/// - Fragment-only links (same page anchors)
/// - Hrefs that fail to resolve
///
/// Returned URLs have their fragment stripped. The iterator is lazy and can be
/// consumed once.
///
/// # Example
///
/// ```
/// use site_word_finder::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/about#team">About</a><a href="https://other.test/">Out</a>"#;
/// let base_url = Url::parse("http://example.test/home").unwrap();
/// let links: Vec<Url> = extract_links(html, &base_url, "example.test").collect();
/// assert_eq!(links.len(), 1);
/// assert_eq!(links[0].as_str(), "http://example.test/about");
/// ```
pub fn extract_links<'a>(
    html: &str,
    base_url: &'a Url,
    scope_host: &'a str,
) -> impl Iterator<Item = Url> + 'a {
    collect_hrefs(html)
        .into_iter()
        .filter_map(move |href| resolve_link(&href, base_url))
        .filter(move |url| is_in_scope(url, scope_host))
}

/// Collects raw href attribute values from all anchors
fn collect_hrefs(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);

    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Resolves a link href to an absolute, canonical URL
///
/// Returns None if the link should be excluded:
/// - Empty or fragment-only hrefs
/// - Invalid URLs
/// - Schemes not starting with "http" after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if absolute_url.scheme().starts_with("http") => {
            Some(canonicalize(&absolute_url))
        }
        Ok(_) => None,
        Err(e) => {
            tracing::trace!("Skipping unresolvable href {:?}: {}", href, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    fn links(html: &str) -> Vec<String> {
        extract_links(html, &base_url(), "example.com")
            .map(|u| u.to_string())
            .collect()
    }

    #[test]
    fn test_extract_absolute_same_host_link() {
        let html = r#"<html><body><a href="https://example.com/other">Link</a></body></html>"#;
        assert_eq!(links(html), vec!["https://example.com/other"]);
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        assert_eq!(links(html), vec!["https://example.com/other"]);
    }

    #[test]
    fn test_extract_relative_path_link() {
        let html = r#"<html><body><a href="other">Link</a></body></html>"#;
        assert_eq!(links(html), vec!["https://example.com/other"]);
    }

    #[test]
    fn test_skip_other_host() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_skip_subdomain() {
        let html = r#"<html><body><a href="https://blog.example.com/">Blog</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_host_match_ignores_case() {
        let html = r#"<html><body><a href="https://EXAMPLE.com/Upper">Link</a></body></html>"#;
        assert_eq!(links(html), vec!["https://example.com/Upper"]);
    }

    #[test]
    fn test_scheme_change_within_host_allowed() {
        let html = r#"<html><body><a href="http://example.com/plain">Link</a></body></html>"#;
        assert_eq!(links(html), vec!["http://example.com/plain"]);
    }

    #[test]
    fn test_strips_fragment() {
        let html = r#"<html><body><a href="/doc?x=1#part-2">Link</a></body></html>"#;
        assert_eq!(links(html), vec!["https://example.com/doc?x=1"]);
    }

    #[test]
    fn test_skip_javascript_link() {
        let html = r#"<html><body><a href="javascript:void(0)">Link</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_skip_mailto_link() {
        let html = r#"<html><body><a href="mailto:test@example.com">Email</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_skip_tel_link() {
        let html = r#"<html><body><a href="tel:+1234567890">Call</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_skip_data_uri() {
        let html = r#"<html><body><a href="data:text/html,<h1>Test</h1>">Data</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_skip_fragment_only() {
        let html = r##"<html><body><a href="#section">Jump</a></body></html>"##;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_skip_unresolvable_href() {
        let html = r#"<html><body><a href="http://[broken">Bad</a><a href="/ok">Ok</a></body></html>"#;
        assert_eq!(links(html), vec!["https://example.com/ok"]);
    }

    #[test]
    fn test_anchor_without_href_ignored() {
        let html = r#"<html><body><a name="top">Top</a></body></html>"#;
        assert!(links(html).is_empty());
    }

    #[test]
    fn test_preserves_document_order() {
        let html = r#"
            <html>
            <body>
                <a href="/page1">Link 1</a>
                <a href="https://other.com/page3">Link 3</a>
                <a href="/page2">Link 2</a>
            </body>
            </html>
        "#;
        assert_eq!(
            links(html),
            vec!["https://example.com/page1", "https://example.com/page2"]
        );
    }

    #[test]
    fn test_malformed_html_still_yields_links() {
        let html = r#"<div><a href="/a">A<p><a href="/b">B"#;
        assert_eq!(
            links(html),
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }
}
