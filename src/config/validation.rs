use crate::config::types::{
    Config, CrawlConfig, FetcherConfig, QueryEntry, SeedEntry, UserAgentConfig,
};
use crate::url::validate_article_id;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetcher_config(&config.fetcher)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_crawl_config(&config.crawl)?;
    validate_seeds(&config.seeds)?;
    validate_queries(&config.queries)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    let prefix = Url::parse(&config.article_prefix).map_err(|e| {
        ConfigError::InvalidUrl(format!(
            "Invalid article_prefix '{}': {}",
            config.article_prefix, e
        ))
    })?;

    if prefix.scheme() != "http" && prefix.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "article_prefix must use http or https, got '{}'",
            prefix.scheme()
        )));
    }

    if !config.article_prefix.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "article_prefix must end with '/', got '{}'",
            config.article_prefix
        )));
    }

    if config.cache_dir.is_empty() {
        return Err(ConfigError::Validation(
            "cache_dir cannot be empty".to_string(),
        ));
    }

    if config.max_requests < 1 {
        return Err(ConfigError::Validation(format!(
            "max_requests must be >= 1, got {}",
            config.max_requests
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1s, got {}s",
            config.request_timeout
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

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates the default budgets
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.breadth_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "breadth_limit must be >= 1, got {}",
            config.breadth_limit
        )));
    }

    if config.tree_display_limit < 1 {
        return Err(ConfigError::Validation(format!(
            "tree_display_limit must be >= 1, got {}",
            config.tree_display_limit
        )));
    }

    Ok(())
}

fn validate_seeds(seeds: &[SeedEntry]) -> Result<(), ConfigError> {
    for seed in seeds {
        validate_id(&seed.id)?;

        if seed.breadth_limit == Some(0) {
            return Err(ConfigError::Validation(format!(
                "Seed '{}' has breadth_limit 0",
                seed.id
            )));
        }
    }
    Ok(())
}

fn validate_queries(queries: &[QueryEntry]) -> Result<(), ConfigError> {
    for query in queries {
        validate_id(&query.from)?;
        validate_id(&query.to)?;
    }
    Ok(())
}

fn validate_id(id: &str) -> Result<(), ConfigError> {
    validate_article_id(id).map_err(|e| ConfigError::Validation(e.to_string()))
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
