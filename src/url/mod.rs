//! URL handling module for shopcrawl
//!
//! Provides authority extraction for domain-scoped crawling and the
//! product-URL classifier.

mod classify;
mod domain;

pub use classify::ProductMatcher;
pub use domain::extract_authority;
