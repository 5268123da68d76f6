use crate::config::types::{
    Config, CrawlerConfig, OutputConfig, ScopeConfig, SeedConfig, UserAgentConfig,
};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_scope_config(&config.scope)?;
    validate_seed_config(&config.seeds)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max_pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates the identifying header set
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if !is_header_safe(&config.user_agent) || !is_header_safe(&config.accept_language) {
        return Err(ConfigError::Validation(
            "user_agent and accept_language must not contain control characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates the allow-list and extension filter
fn validate_scope_config(config: &ScopeConfig) -> Result<(), ConfigError> {
    if config.allowed_domains.is_empty() {
        return Err(ConfigError::Validation(
            "allowed_domains must list at least one domain".to_string(),
        ));
    }

    for domain in &config.allowed_domains {
        validate_domain_string(domain)?;
    }

    if config.excluded_extensions.iter().any(|e| e.is_empty()) {
        return Err(ConfigError::Validation(
            "excluded_extensions cannot contain empty entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates seed sources
fn validate_seed_config(config: &SeedConfig) -> Result<(), ConfigError> {
    if config.urls.is_empty() && !config.from_allowed_domains && config.sitemap().is_none() {
        return Err(ConfigError::Validation(
            "one of seeds.urls, seeds.from-allowed-domains or seeds.sitemap-url must be set"
                .to_string(),
        ));
    }

    for seed in &config.urls {
        validate_http_url(seed, "seed URL")?;
    }

    if let Some(sitemap) = config.sitemap() {
        validate_http_url(sitemap, "sitemap URL")?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_http_url(raw: &str, what: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", what, raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            what, raw
        )));
    }

    Ok(())
}

fn is_header_safe(value: &str) -> bool {
    !value.chars().any(|c| c.is_control())
}

/// Validates an allow-list entry
///
/// Entries are exact hostnames; wildcard patterns are rejected because the
/// allow-list never expands to subdomains.
fn validate_domain_string(domain: &str) -> Result<(), ConfigError> {
    if domain.is_empty() {
        return Err(ConfigError::InvalidPattern(
            "Domain cannot be empty".to_string(),
        ));
    }

    if !domain
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' contains invalid characters",
            domain
        )));
    }

    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot start or end with '.' or '-'",
            domain
        )));
    }

    if domain.contains("..") {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' cannot contain consecutive dots",
            domain
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::InvalidPattern(format!(
            "Domain '{}' must contain at least one dot (e.g., 'example.edu')",
            domain
        )));
    }

    Ok(())
}
