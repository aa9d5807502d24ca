use crate::config::types::{ClassifierConfig, Config, CrawlerConfig, UserAgentConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_seeds(&config.seeds)?;
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_classifier_config(&config.classifier)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the seed list
///
/// A seed is normally a bare domain that becomes `https://{seed}`; a seed
/// carrying an explicit http(s) scheme is used verbatim as the crawl root.
fn validate_seeds(seeds: &[String]) -> Result<(), ConfigError> {
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed domain is required".to_string(),
        ));
    }

    for seed in seeds {
        let url = if seed.contains("://") {
            let url = Url::parse(seed)
                .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed '{}': {}", seed, e)))?;
            if url.scheme() != "http" && url.scheme() != "https" {
                return Err(ConfigError::Validation(format!(
                    "seed '{}' must use an http(s) scheme",
                    seed
                )));
            }
            url
        } else {
            if seed.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "seed '{}' must be a bare domain (no path)",
                    seed
                )));
            }
            Url::parse(&format!("https://{}", seed))
                .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed '{}': {}", seed, e)))?
        };

        if url.host_str().is_none() {
            return Err(ConfigError::Validation(format!(
                "seed '{}' has no host",
                seed
            )));
        }
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "max_retries must be >= 1, got {}",
            config.max_retries
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    if config.max_workers_per_domain < 1 || config.max_workers_per_domain > 100 {
        return Err(ConfigError::Validation(format!(
            "max_workers_per_domain must be between 1 and 100, got {}",
            config.max_workers_per_domain
        )));
    }

    if config.max_concurrent_fetches < 1 {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_fetches must be >= 1, got {}",
            config.max_concurrent_fetches
        )));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    Ok(())
}

/// Validates classifier configuration
fn validate_classifier_config(config: &ClassifierConfig) -> Result<(), ConfigError> {
    if config.product_patterns.is_empty() {
        return Err(ConfigError::Validation(
            "product_patterns cannot be empty".to_string(),
        ));
    }

    for pattern in &config.product_patterns {
        if pattern.trim().is_empty() {
            return Err(ConfigError::Validation(
                "product_patterns must not contain blank entries".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &crate::config::types::OutputConfig) -> Result<(), ConfigError> {
    if config.report_path.is_empty() {
        return Err(ConfigError::Validation(
            "report_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
