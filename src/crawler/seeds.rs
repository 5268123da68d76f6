//! Seed URL acquisition
//!
//! Seeds come straight from configuration, from the root page of every
//! allow-listed domain, or from a sitemap page whose allow-listed anchors
//! become the initial queue. Failures here abort the run.

use crate::config::{ScopeConfig, SeedConfig};
use crate::crawler::parser::extract_links_simple;
use crate::url::UrlScope;
use crate::HarvestError;
use reqwest::Client;
use std::collections::HashSet;
use url::Url;

/// Resolves the initial queue for a run
///
/// Explicit seed URLs take precedence, then the allow-listed domain roots,
/// then the sitemap. An empty result is an error.
pub async fn resolve_seeds(
    client: &Client,
    config: &SeedConfig,
    scope_config: &ScopeConfig,
) -> Result<Vec<String>, HarvestError> {
    let seeds = if !config.urls.is_empty() {
        tracing::info!("Using {} configured seed URLs", config.urls.len());
        config.urls.clone()
    } else if config.from_allowed_domains {
        let roots = domain_roots(&scope_config.allowed_domains);
        tracing::info!("Seeding from {} allowed domain roots", roots.len());
        roots
    } else if let Some(sitemap_url) = config.sitemap() {
        tracing::info!("Fetching seed URLs from sitemap: {}", sitemap_url);
        let scope = UrlScope::from_config(scope_config);
        fetch_sitemap_seeds(client, sitemap_url, &scope).await?
    } else {
        Vec::new()
    };

    if seeds.is_empty() {
        return Err(HarvestError::NoSeeds);
    }

    Ok(seeds)
}

/// `https://{domain}/` for every allow-listed domain, in allow-list order
///
/// Repeated domains are listed once.
pub fn domain_roots(allowed_domains: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();

    allowed_domains
        .iter()
        .map(|domain| domain.trim().to_lowercase())
        .filter(|domain| !domain.is_empty() && seen.insert(domain.clone()))
        .map(|domain| format!("https://{}/", domain))
        .collect()
}

/// Fetches a sitemap page and returns its allow-listed anchor targets
pub async fn fetch_sitemap_seeds(
    client: &Client,
    sitemap_url: &str,
    scope: &UrlScope,
) -> Result<Vec<String>, HarvestError> {
    let base_url = Url::parse(sitemap_url)?;

    let response = client
        .get(base_url.clone())
        .send()
        .await
        .map_err(|source| HarvestError::Http {
            url: sitemap_url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::SeedStatus {
            url: sitemap_url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.text().await.map_err(|source| HarvestError::Http {
        url: sitemap_url.to_string(),
        source,
    })?;

    let seeds = collect_seed_links(&body, &base_url, scope);
    tracing::info!("Found {} valid starting URLs", seeds.len());
    Ok(seeds)
}

/// Collects anchor targets on an allow-listed host, deduplicated
///
/// Only the host is checked; the extension filter and normalization are
/// applied later when each seed is processed. First-seen order is kept.
pub fn collect_seed_links(html: &str, base_url: &Url, scope: &UrlScope) -> Vec<String> {
    let mut seen = HashSet::new();

    extract_links_simple(html, base_url)
        .into_iter()
        .filter(|link| {
            Url::parse(link)
                .map(|url| scope.is_allowed_host(&url))
                .unwrap_or(false)
        })
        .filter(|link| seen.insert(link.clone()))
        .collect()
}
