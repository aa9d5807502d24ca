//! HTML link extraction
//!
//! Turns a fetched page into the set of absolute http(s) URLs it links to.
//! Malformed HTML is never an error; whatever parses contributes links and
//! the rest is ignored.

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Extracts all absolute http(s) links from an HTML document
///
/// Relative hrefs are resolved against `base_url`. Links are de-duplicated
/// within the page; order follows document order of first occurrence.
pub fn extract_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&selector) {
        if let Some(href) = element.value().attr("href") {
            if let Some(url) = resolve_link(href, base_url) {
                if seen.insert(url.as_str().to_string()) {
                    links.push(url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only links (same page anchors)
/// - invalid URLs
/// - non-HTTP(S) URLs after resolution
fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) => {
            if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
                Some(absolute_url)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_url() -> Url {
        Url::parse("https://example.com/page").unwrap()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<html><body><a href="https://other.com/page">Link</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "https://other.com/page");
    }

    #[test]
    fn test_extract_relative_link() {
        let html = r#"<html><body><a href="/other">Link</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "https://example.com/other");
    }

    #[test]
    fn test_extract_relative_path_link() {
        let html = r#"<html><body><a href="other">Link</a></body></html>"#;
        let links = extract_links(html, &base_url());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].as_str(), "https://example.com/other");
    }

    #[test]
    fn test_skip_javascript_link() {
        let html = r#"<html><body><a href="javascript:void(0)">Link</a></body></html>"#;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_skip_mailto_link() {
        let html = r#"<html><body><a href="mailto:test@example.com">Email</a></body></html>"#;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_skip_tel_link() {
        let html = r#"<html><body><a href="tel:+1234567890">Call</a></body></html>"#;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_skip_data_uri() {
        let html = r#"<html><body><a href="data:text/html,<h1>Test</h1>">Data</a></body></html>"#;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_skip_fragment_only() {
        let html = r##"<html><body><a href="#section">Jump</a></body></html>"##;
        assert!(extract_links(html, &base_url()).is_empty());
    }

    #[test]
    fn test_duplicate_links_extracted_once() {
        let html = r#"
            <html><body>
                <a href="/page1">Link 1</a>
                <a href="/page1">Link 1 again</a>
                <a href="/page2">Link 2</a>
            </body></html>
        "#;
        let links = extract_links(html, &base_url());
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_mixed_valid_and_invalid_links() {
        let html = r#"
            <html><body>
                <a href="/valid">Valid</a>
                <a href="javascript:alert('no')">Invalid</a>
                <a href="mailto:test@example.com">Invalid</a>
                <a href="/another-valid">Valid</a>
            </body></html>
        "#;
        let links = extract_links(html, &base_url());
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_malformed_html_yields_what_parses() {
        let html = r#"<html><body><a href="/ok">Link</a><div><a href="/also-ok""#;
        let links = extract_links(html, &base_url());
        assert!(!links.is_empty());
        assert_eq!(links[0].as_str(), "https://example.com/ok");
    }
}
