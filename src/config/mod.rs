//! Configuration module for shopcrawl
//!
//! Handles loading, parsing, and validating the TOML configuration file
//! that drives a crawl run.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{ClassifierConfig, Config, CrawlerConfig, OutputConfig, UserAgentConfig};
pub use validation::validate;
