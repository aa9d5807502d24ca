//! Per-domain crawl engine
//!
//! Each seed domain gets its own scheduling loop: a frontier of claimed,
//! not-yet-fetched URLs feeding a set of in-flight page tasks. A URL enters
//! the frontier only after winning the shared visited-set claim, so every
//! URL is fetched at most once per run no matter how many pages link to it,
//! and crawls of cyclic link graphs terminate once the reachable set is
//! exhausted.
//!
//! Concurrency is bounded twice: `max-workers-per-domain` caps the in-flight
//! page tasks of one domain, and a run-wide semaphore caps concurrent
//! fetches across all domains regardless of crawl depth.

use crate::crawler::fetcher::{FetchOutcome, Fetcher};
use crate::crawler::parser::extract_links;
use crate::state::CrawlState;
use crate::url::{extract_authority, ProductMatcher};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Drives the crawl of a single domain
///
/// Cheap to clone; clones share the fetcher pool, matcher, crawl state, and
/// the global fetch semaphore.
#[derive(Clone)]
pub struct CrawlEngine {
    fetcher: Fetcher,
    matcher: Arc<ProductMatcher>,
    state: Arc<CrawlState>,
    fetch_permits: Arc<Semaphore>,
    max_workers: usize,
    cancel: CancellationToken,
}

impl CrawlEngine {
    pub fn new(
        fetcher: Fetcher,
        matcher: Arc<ProductMatcher>,
        state: Arc<CrawlState>,
        fetch_permits: Arc<Semaphore>,
        max_workers: usize,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            fetcher,
            matcher,
            state,
            fetch_permits,
            max_workers,
            cancel,
        }
    }

    /// Crawls every reachable page of `domain` starting from `seed_url`
    ///
    /// Only URLs whose authority exactly matches `domain` are followed.
    /// Fetch failures and empty pages prune their branch silently; nothing
    /// here aborts the domain, and the loop ends when the frontier and the
    /// in-flight set are both empty. On cancellation the frontier stops
    /// draining and in-flight tasks are allowed to finish.
    pub async fn crawl_domain(&self, seed_url: Url, domain: String) {
        let mut frontier: VecDeque<Url> = VecDeque::new();
        let mut in_flight: JoinSet<Vec<Url>> = JoinSet::new();

        if let Some(ordinal) = self.state.claim(seed_url.as_str()) {
            log_progress(ordinal);
            frontier.push_back(seed_url);
        }

        loop {
            // Fill worker slots from the frontier
            while in_flight.len() < self.max_workers && !self.cancel.is_cancelled() {
                let Some(url) = frontier.pop_front() else {
                    break;
                };

                let engine = self.clone();
                let domain = domain.clone();
                in_flight.spawn(async move { engine.process_page(url, &domain).await });
            }

            match in_flight.join_next().await {
                Some(Ok(discovered)) => {
                    // Claim children as they are enqueued; losing a claim
                    // means some other task (any domain) already owns the URL
                    for url in discovered {
                        if let Some(ordinal) = self.state.claim(url.as_str()) {
                            log_progress(ordinal);
                            frontier.push_back(url);
                        }
                    }
                }
                Some(Err(e)) => {
                    tracing::error!(domain, error = %e, "page task aborted");
                }
                None => {
                    if frontier.is_empty() || self.cancel.is_cancelled() {
                        break;
                    }
                }
            }
        }

        if self.cancel.is_cancelled() {
            tracing::info!(domain, "crawl stopped by cancellation");
        } else {
            tracing::info!(domain, "domain crawl complete");
        }
    }

    /// Processes one claimed URL and returns its same-domain candidate links
    ///
    /// The returned links are unclaimed; the scheduling loop performs the
    /// claim so the frontier never holds a URL twice.
    async fn process_page(&self, url: Url, domain: &str) -> Vec<Url> {
        let outcome = {
            // Permit scope covers the fetch (including retries), keeping the
            // run-wide in-flight request count bounded
            let _permit = match self.fetch_permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => return Vec::new(),
            };
            self.fetcher.fetch(url.as_str()).await
        };

        let body = match outcome {
            FetchOutcome::Body(body) => body,
            // Dead or empty branches end here without affecting siblings
            FetchOutcome::NoContent { .. } | FetchOutcome::Failed => return Vec::new(),
        };

        if self.matcher.is_product_url(url.as_str()) {
            self.state.record_product(domain, url.as_str());
        }

        extract_links(&body, &url)
            .into_iter()
            .filter(|link| extract_authority(link).as_deref() == Some(domain))
            .collect()
    }
}

/// Sampled progress log: one line per 100 claimed pages, run-wide
fn log_progress(ordinal: u64) {
    if ordinal % 100 == 0 {
        tracing::info!(pages = ordinal, "crawl progress");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CrawlerConfig, UserAgentConfig};
    use crate::crawler::fetcher::build_http_client;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_crawler_config() -> CrawlerConfig {
        CrawlerConfig {
            max_retries: 2,
            fetch_timeout_secs: 5,
            backoff_unit_ms: 10,
            max_workers_per_domain: 4,
            max_concurrent_fetches: 8,
        }
    }

    fn test_engine(state: Arc<CrawlState>, cancel: CancellationToken) -> CrawlEngine {
        let config = test_crawler_config();
        let user_agent = UserAgentConfig {
            crawler_name: "TestCrawler".to_string(),
            crawler_version: "1.0".to_string(),
            contact_url: "https://example.com/bot".to_string(),
        };
        let client = build_http_client(&user_agent, &config).unwrap();
        let fetcher = Fetcher::new(client, Arc::clone(&state), &config);
        let matcher = Arc::new(ProductMatcher::new(&[
            "/product".to_string(),
            "/products".to_string(),
        ]));
        let permits = Arc::new(Semaphore::new(
            config.max_concurrent_fetches as usize,
        ));
        CrawlEngine::new(
            fetcher,
            matcher,
            state,
            permits,
            config.max_workers_per_domain as usize,
            cancel,
        )
    }

    fn html_page(links: &[String]) -> String {
        let anchors: String = links
            .iter()
            .map(|l| format!(r#"<a href="{}">link</a>"#, l))
            .collect();
        format!("<html><body>{}</body></html>", anchors)
    }

    async fn mock_page(server: &MockServer, page_path: &str, links: &[String]) {
        Mock::given(method("GET"))
            .and(path(page_path))
            .respond_with(ResponseTemplate::new(200).set_body_string(html_page(links)))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_cyclic_graph_terminates_and_records_products() {
        let server = MockServer::start().await;
        let base = server.uri();
        let url = Url::parse(&base).unwrap();
        let domain = format!("{}:{}", url.host_str().unwrap(), url.port().unwrap());

        // / <-> /shop form a cycle; /products/1 is a leaf product page
        mock_page(
            &server,
            "/",
            &[format!("{}/shop", base), format!("{}/products/1", base)],
        )
        .await;
        mock_page(&server, "/shop", &[format!("{}/", base)]).await;
        mock_page(&server, "/products/1", &[]).await;

        let state = Arc::new(CrawlState::new());
        let engine = test_engine(Arc::clone(&state), CancellationToken::new());

        let seed = Url::parse(&format!("{}/", base)).unwrap();
        engine.crawl_domain(seed, domain.clone()).await;

        assert_eq!(state.pages_claimed(), 3);
        let products = state.products();
        assert_eq!(products[&domain].len(), 1);
        assert!(products[&domain]
            .iter()
            .any(|u| u.ends_with("/products/1")));
    }

    #[tokio::test]
    async fn test_other_authority_links_not_followed() {
        let server = MockServer::start().await;
        let base = server.uri();
        let url = Url::parse(&base).unwrap();
        let domain = format!("{}:{}", url.host_str().unwrap(), url.port().unwrap());

        mock_page(
            &server,
            "/",
            &[
                "https://elsewhere.example/products/1".to_string(),
                format!("{}/local", base),
            ],
        )
        .await;
        mock_page(&server, "/local", &[]).await;

        let state = Arc::new(CrawlState::new());
        let engine = test_engine(Arc::clone(&state), CancellationToken::new());

        let seed = Url::parse(&format!("{}/", base)).unwrap();
        engine.crawl_domain(seed, domain).await;

        // Seed and /local only; the cross-host product link is ignored
        assert_eq!(state.pages_claimed(), 2);
        assert!(state.products().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_token_stops_dispatch() {
        let server = MockServer::start().await;
        let base = server.uri();
        let url = Url::parse(&base).unwrap();
        let domain = format!("{}:{}", url.host_str().unwrap(), url.port().unwrap());

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .expect(0)
            .mount(&server)
            .await;

        let cancel = CancellationToken::new();
        cancel.cancel();

        let state = Arc::new(CrawlState::new());
        let engine = test_engine(Arc::clone(&state), cancel);

        let seed = Url::parse(&format!("{}/", base)).unwrap();
        engine.crawl_domain(seed, domain).await;
    }

    #[tokio::test]
    async fn test_dead_branch_does_not_abort_domain() {
        let server = MockServer::start().await;
        let base = server.uri();
        let url = Url::parse(&base).unwrap();
        let domain = format!("{}:{}", url.host_str().unwrap(), url.port().unwrap());

        mock_page(
            &server,
            "/",
            &[format!("{}/gone", base), format!("{}/products/2", base)],
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/gone"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        mock_page(&server, "/products/2", &[]).await;

        let state = Arc::new(CrawlState::new());
        let engine = test_engine(Arc::clone(&state), CancellationToken::new());

        let seed = Url::parse(&format!("{}/", base)).unwrap();
        engine.crawl_domain(seed, domain.clone()).await;

        let products = state.products();
        assert_eq!(products[&domain].len(), 1);
        // 404 is absent content, not a terminal failure
        assert_eq!(state.failed_urls(), 0);
    }
}
