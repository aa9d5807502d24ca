//! Crawl orchestration
//!
//! The coordinator owns the pieces shared by every domain (HTTP client,
//! classifier, crawl state, fetch permits) and runs one engine loop per
//! seed domain concurrently. Domains are independent: one domain failing or
//! stalling never aborts the others.

use crate::config::Config;
use crate::crawler::engine::CrawlEngine;
use crate::crawler::fetcher::{build_http_client, Fetcher};
use crate::output::Report;
use crate::state::CrawlState;
use crate::url::{extract_authority, ProductMatcher};
use crate::CrawlError;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    state: Arc<CrawlState>,
    engine: CrawlEngine,
    seeds: Vec<(String, Url)>,
}

impl Coordinator {
    /// Creates a new coordinator from a validated configuration
    ///
    /// Bare seeds resolve to an `https://{domain}` crawl root; seeds with
    /// an explicit scheme are used verbatim. A seed that does not parse is
    /// a construction error, mirroring the config validation rules.
    pub fn new(config: Config, cancel: CancellationToken) -> Result<Self, CrawlError> {
        let client = build_http_client(&config.user_agent, &config.crawler)?;

        let state = Arc::new(CrawlState::new());
        let fetcher = Fetcher::new(client, Arc::clone(&state), &config.crawler);
        let matcher = Arc::new(ProductMatcher::new(&config.classifier.product_patterns));
        let fetch_permits = Arc::new(Semaphore::new(
            config.crawler.max_concurrent_fetches as usize,
        ));

        let mut seeds = Vec::with_capacity(config.seeds.len());
        for seed in &config.seeds {
            let root = if seed.contains("://") {
                seed.clone()
            } else {
                format!("https://{}", seed)
            };
            let url = Url::parse(&root).map_err(|source| CrawlError::Seed {
                domain: seed.clone(),
                source,
            })?;
            let domain = extract_authority(&url).ok_or(CrawlError::Seed {
                domain: seed.clone(),
                source: ::url::ParseError::EmptyHost,
            })?;
            seeds.push((domain, url));
        }

        let engine = CrawlEngine::new(
            fetcher,
            matcher,
            Arc::clone(&state),
            fetch_permits,
            config.crawler.max_workers_per_domain as usize,
            cancel,
        );

        Ok(Self {
            state,
            engine,
            seeds,
        })
    }

    /// Runs all domain crawls to completion and builds the final report
    pub async fn run(&self) -> Report {
        let mut domains: JoinSet<()> = JoinSet::new();

        for (domain, seed_url) in &self.seeds {
            tracing::info!(domain, "starting domain crawl");
            let engine = self.engine.clone();
            let domain = domain.clone();
            let seed_url = seed_url.clone();
            domains.spawn(async move { engine.crawl_domain(seed_url, domain).await });
        }

        // A panicked domain task is logged and isolated; its siblings and
        // the final report are unaffected
        while let Some(joined) = domains.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "domain crawl task aborted");
            }
        }

        tracing::info!(
            pages = self.state.pages_claimed(),
            failed = self.state.failed_urls(),
            "crawl finished"
        );

        Report::from_state(&self.state)
    }
}

/// Runs a complete crawl: one concurrent engine loop per seed domain
///
/// This is the main library entry point. The returned report is not yet
/// persisted; hand it to [`crate::output::write_report`].
pub async fn crawl(config: Config, cancel: CancellationToken) -> Result<Report, CrawlError> {
    let coordinator = Coordinator::new(config, cancel)?;
    Ok(coordinator.run().await)
}
