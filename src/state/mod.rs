//! Shared crawl state
//!
//! The visited set, per-domain product collection, and failure counter are
//! the only mutable state shared between crawl tasks. Everything here is
//! safe to call from any task; locks are held only for the duration of a
//! single map or set operation, never across an await point.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Run-wide set of claimed URLs
///
/// Exposes only the atomic test-and-insert; there is deliberately no way to
/// read or remove entries. A URL claimed here is owned by exactly one crawl
/// task for the lifetime of the run, which is what guarantees both
/// fetch-at-most-once and termination on cyclic link graphs.
#[derive(Debug, Default)]
pub struct VisitedSet {
    inner: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Atomically inserts `url`, returning true only for the first caller
    pub fn insert(&self, url: &str) -> bool {
        self.inner.lock().unwrap().insert(url.to_string())
    }

    /// Number of URLs claimed so far
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared mutable state for one crawl run
///
/// Shared as `Arc<CrawlState>` across all domains and their page tasks.
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: VisitedSet,
    products: Mutex<BTreeMap<String, BTreeSet<String>>>,
    failed_urls: AtomicU64,
    pages_claimed: AtomicU64,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a URL for fetching
    ///
    /// Returns the run-wide claim ordinal (1-based) if this caller won the
    /// claim, or `None` if the URL was already claimed by any task for any
    /// domain. Concurrent claims of the same URL resolve so exactly one
    /// caller proceeds.
    pub fn claim(&self, url: &str) -> Option<u64> {
        if self.visited.insert(url) {
            Some(self.pages_claimed.fetch_add(1, Ordering::Relaxed) + 1)
        } else {
            None
        }
    }

    /// Records a classified product URL for a domain
    ///
    /// The domain entry is created lazily on first use; recording the same
    /// URL twice is a no-op (set semantics).
    pub fn record_product(&self, domain: &str, url: &str) {
        self.products
            .lock()
            .unwrap()
            .entry(domain.to_string())
            .or_default()
            .insert(url.to_string());
    }

    /// Records a fetch that exhausted all retries, returning the new total
    pub fn record_failed_fetch(&self) -> u64 {
        self.failed_urls.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Total fetches that exhausted retries
    pub fn failed_urls(&self) -> u64 {
        self.failed_urls.load(Ordering::Relaxed)
    }

    /// Total URLs claimed for fetching
    pub fn pages_claimed(&self) -> u64 {
        self.pages_claimed.load(Ordering::Relaxed)
    }

    /// Snapshot of the per-domain product URL sets
    pub fn products(&self) -> BTreeMap<String, BTreeSet<String>> {
        self.products.lock().unwrap().clone()
    }
}
