//! Crawler module for web page fetching and traversal
//!
//! This module contains the core crawling logic:
//! - HTTP fetching with retry and backoff
//! - HTML link extraction
//! - The per-domain frontier/worker engine
//! - Overall crawl coordination across seed domains

mod coordinator;
mod engine;
mod fetcher;
mod parser;

pub use coordinator::{crawl, Coordinator};
pub use engine::CrawlEngine;
pub use fetcher::{build_http_client, FetchOutcome, Fetcher};
pub use parser::extract_links;
