//! HTTP fetcher implementation
//!
//! Handles all page requests for the crawler: client construction with the
//! configured user agent, GET with a per-request timeout, retry with linear
//! backoff on transport errors, and terminal-failure accounting.

use crate::config::{CrawlerConfig, UserAgentConfig};
use crate::state::CrawlState;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;

/// Result of a fetch operation
///
/// Transport errors and non-success statuses are deliberately distinct
/// outcomes: a transport error is retried up to the configured limit and
/// counts as a terminal failure on exhaustion, while a non-200 response is
/// treated as absent content immediately: it consumes no retry and is not
/// counted as a failure.
#[derive(Debug)]
pub enum FetchOutcome {
    /// HTTP 200 with a text body
    Body(String),

    /// Any other final status (redirects already followed by the client)
    NoContent {
        /// The HTTP status code received
        status: u16,
    },

    /// Every attempt failed with a transport error; retries exhausted
    Failed,
}

/// Builds the shared HTTP client
///
/// One client is built per run and shared across every crawl task so the
/// connection pool is reused. Redirects are followed automatically; the
/// per-request timeout covers connect plus body read.
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(crawler.fetch_timeout_secs))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Retrying page fetcher
///
/// Cheap to clone; all clones share the client pool and the run state.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    state: Arc<CrawlState>,
    max_retries: u32,
    backoff_unit: Duration,
}

impl Fetcher {
    pub fn new(client: Client, state: Arc<CrawlState>, config: &CrawlerConfig) -> Self {
        Self {
            client,
            state,
            max_retries: config.max_retries,
            backoff_unit: Duration::from_millis(config.backoff_unit_ms),
        }
    }

    /// Fetches a page body with retry and backoff
    ///
    /// Attempt `n` (zero-based) that fails with a transport error waits
    /// `(n + 1) × backoff-unit` before the next try. A 200 response returns
    /// the body immediately; any other status returns [`FetchOutcome::NoContent`]
    /// without consuming further attempts. Exhausting all attempts increments
    /// the run's failure counter exactly once.
    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        for attempt in 0..self.max_retries {
            match self.client.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status != StatusCode::OK {
                        tracing::debug!(url, status = status.as_u16(), "non-200 response");
                        return FetchOutcome::NoContent {
                            status: status.as_u16(),
                        };
                    }

                    // Body read failures are transport errors and retryable
                    match response.text().await {
                        Ok(body) => return FetchOutcome::Body(body),
                        Err(e) => {
                            tracing::warn!(url, attempt, error = %e, "failed to read body");
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(url, attempt, error = %e, "fetch attempt failed");
                }
            }

            if attempt + 1 < self.max_retries {
                tokio::time::sleep(self.backoff_unit * (attempt + 1)).await;
            }
        }

        let total = self.state.record_failed_fetch();
        tracing::warn!(
            url,
            attempts = self.max_retries,
            total_failed = total,
            "giving up on URL"
        );
        FetchOutcome::Failed
    }
}
