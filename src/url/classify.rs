/// Product-URL classifier
///
/// Holds the configured path patterns and answers whether a URL looks like
/// a product-detail page. Matching is a case-insensitive substring check
/// against the whole URL, so `/Products/123` and query-string variants all
/// match. Classification is boolean; no precedence between patterns.
#[derive(Debug, Clone)]
pub struct ProductMatcher {
    patterns: Vec<String>,
}

impl ProductMatcher {
    /// Creates a matcher from the configured pattern list
    ///
    /// Patterns are lowercased once here so the per-URL check only pays for
    /// lowercasing the URL.
    pub fn new(patterns: &[String]) -> Self {
        Self {
            patterns: patterns.iter().map(|p| p.to_lowercase()).collect(),
        }
    }

    /// Returns true if the URL matches any configured product pattern
    pub fn is_product_url(&self, url: &str) -> bool {
        let lowered = url.to_lowercase();
        self.patterns.iter().any(|p| lowered.contains(p.as_str()))
    }
}
