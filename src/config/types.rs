use serde::Deserialize;

/// Main configuration structure for shopcrawl
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Bare seed domains (no scheme); each becomes `https://{domain}`
    pub seeds: Vec<String>,

    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum fetch attempts per URL before it counts as a failure
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-request timeout in seconds
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Backoff unit in milliseconds; attempt n waits (n + 1) units
    #[serde(rename = "backoff-unit-ms", default = "default_backoff_unit_ms")]
    pub backoff_unit_ms: u64,

    /// Maximum in-flight page tasks per domain
    #[serde(
        rename = "max-workers-per-domain",
        default = "default_max_workers_per_domain"
    )]
    pub max_workers_per_domain: u32,

    /// Maximum in-flight fetches across all domains
    #[serde(
        rename = "max-concurrent-fetches",
        default = "default_max_concurrent_fetches"
    )]
    pub max_concurrent_fetches: u32,
}

fn default_max_retries() -> u32 {
    5
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_backoff_unit_ms() -> u64 {
    1000
}

fn default_max_workers_per_domain() -> u32 {
    11
}

fn default_max_concurrent_fetches() -> u32 {
    64
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,
}

impl UserAgentConfig {
    /// Formats the full User-Agent header value
    pub fn header_value(&self) -> String {
        format!(
            "Mozilla/5.0 (compatible; {}/{}; +{})",
            self.crawler_name, self.crawler_version, self.contact_url
        )
    }
}

/// Product-URL classification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Path substrings that mark a URL as a product page.
    /// Tuned per target site; matching is case-insensitive.
    #[serde(rename = "product-patterns", default = "default_product_patterns")]
    pub product_patterns: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            product_patterns: default_product_patterns(),
        }
    }
}

fn default_product_patterns() -> Vec<String> {
    ["/product", "/products", "/collections", "/items"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the JSON report file
    #[serde(rename = "report-path")]
    pub report_path: String,
}
