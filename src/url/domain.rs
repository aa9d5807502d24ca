use url::Url;

/// Extracts the authority (`host[:port]`) from a URL
///
/// The host is lowercased. A port is included only when it is explicit and
/// non-default, so `https://example.com:443/` and `https://example.com/`
/// share one authority while two servers on different ports of the same
/// host do not. Crawl scoping compares authorities exactly; a subdomain is
/// a different authority.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use shopcrawl::url::extract_authority;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(extract_authority(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/path").unwrap();
/// assert_eq!(extract_authority(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn extract_authority(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_authority() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_authority(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain_is_distinct() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(
            extract_authority(&url),
            Some("blog.example.com".to_string())
        );
    }

    #[test]
    fn test_extract_with_explicit_port() {
        let url = Url::parse("http://127.0.0.1:8080/").unwrap();
        assert_eq!(extract_authority(&url), Some("127.0.0.1:8080".to_string()));
    }

    #[test]
    fn test_default_port_omitted() {
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(extract_authority(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_uppercase_converted_to_lowercase() {
        let url = Url::parse("https://EXAMPLE.COM/").unwrap();
        assert_eq!(extract_authority(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_with_path_and_query() {
        let url = Url::parse("https://example.com/path/to/page?query=value").unwrap();
        assert_eq!(extract_authority(&url), Some("example.com".to_string()));
    }
}
