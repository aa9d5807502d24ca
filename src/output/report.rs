use crate::state::CrawlState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Final crawl report
///
/// `products` maps each domain to the product URLs discovered there, in
/// lexicographic order. Domains where no product URL was found are absent;
/// entries exist only for domains that recorded at least one product URL.
/// `failed_urls` is the run-wide count of fetches that exhausted retries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub products: BTreeMap<String, Vec<String>>,
    pub failed_urls: u64,
}

impl Report {
    /// Builds a report by snapshotting the crawl state
    pub fn from_state(state: &CrawlState) -> Self {
        let products = state
            .products()
            .into_iter()
            .map(|(domain, urls)| (domain, urls.into_iter().collect()))
            .collect();

        Self {
            products,
            failed_urls: state.failed_urls(),
        }
    }

    /// Total product URLs across all domains
    pub fn total_products(&self) -> usize {
        self.products.values().map(|urls| urls.len()).sum()
    }
}
