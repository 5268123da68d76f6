use crate::config::ScopeConfig;
use crate::url::extract_domain;
use std::collections::HashSet;
use url::Url;

/// Decides which URLs belong to the crawl
///
/// A URL is in scope when its host is exactly one of the allow-listed
/// domains and its lower-cased path contains none of the excluded
/// extensions. The extension check is a substring match over the whole path,
/// so `/files/report.pdf/view` and `/xlsxreport` are both rejected.
#[derive(Debug, Clone)]
pub struct UrlScope {
    allowed_domains: HashSet<String>,
    excluded_extensions: Vec<String>,
}

impl UrlScope {
    /// Creates a scope from an allow-list and an extension filter
    ///
    /// Both lists are lower-cased on the way in.
    pub fn new<D, E>(allowed_domains: D, excluded_extensions: E) -> Self
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            allowed_domains: allowed_domains
                .into_iter()
                .map(|d| d.as_ref().to_lowercase())
                .collect(),
            excluded_extensions: excluded_extensions
                .into_iter()
                .map(|e| e.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Builds the scope described by the `[scope]` config section
    pub fn from_config(config: &ScopeConfig) -> Self {
        Self::new(&config.allowed_domains, &config.excluded_extensions)
    }

    /// Returns true if the URL's host is on the allow-list
    pub fn is_allowed_host(&self, url: &Url) -> bool {
        extract_domain(url)
            .map(|domain| self.allowed_domains.contains(&domain))
            .unwrap_or(false)
    }

    /// Returns true if the URL path contains an excluded extension
    pub fn has_excluded_extension(&self, url: &Url) -> bool {
        let path = url.path().to_lowercase();
        self.excluded_extensions
            .iter()
            .any(|ext| path.contains(ext.as_str()))
    }

    /// Returns true if the URL may be crawled
    ///
    /// Unparseable URLs and URLs without a host are never valid.
    pub fn is_valid(&self, url: &str) -> bool {
        match Url::parse(url) {
            Ok(parsed) => self.is_allowed_host(&parsed) && !self.has_excluded_extension(&parsed),
            Err(_) => false,
        }
    }

    /// Number of allow-listed domains
    pub fn domain_count(&self) -> usize {
        self.allowed_domains.len()
    }
}
