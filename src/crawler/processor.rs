//! Page processor: one dequeued URL in, discovered links out
//!
//! Order of checks for every URL:
//! 1. Page cap reached → drop without marking anything
//! 2. Normalized URL already visited → drop
//! 3. Mark visited (a failed fetch is never retried)
//! 4. Fetch, parse, extract sections and links
//! 5. Append the page record and hand the links back to the frontier

use crate::crawler::fetcher::fetch_page;
use crate::crawler::parser::parse_html;
use crate::crawler::Section;
use crate::output::CrawlStatistics;
use crate::state::{Frontier, PageOutcome};
use crate::url::{normalize_url, UrlScope};
use crate::PageError;
use reqwest::Client;
use url::Url;

/// Title recorded for pages without a usable `<title>`
pub const NO_TITLE: &str = "No Title";

/// One successfully fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Normalized URL; unique within a crawl run
    pub url: String,

    /// Page title or [`NO_TITLE`]
    pub title: String,

    /// Sections in document order
    pub sections: Vec<Section>,

    /// In-scope links discovered on this page, normalized
    pub links: Vec<String>,
}

/// Everything one crawl run mutates
#[derive(Debug, Default)]
pub struct CrawlState {
    pub frontier: Frontier,
    pub pages: Vec<PageRecord>,
    pub stats: CrawlStatistics,
}

impl CrawlState {
    /// Creates a fresh state whose queue holds the seeds in order
    pub fn new(seeds: Vec<String>) -> Self {
        Self {
            frontier: Frontier::new(seeds),
            pages: Vec::new(),
            stats: CrawlStatistics::new(),
        }
    }
}

/// Fetches and extracts single pages
pub struct PageProcessor {
    client: Client,
    scope: UrlScope,
    max_pages: usize,
}

impl PageProcessor {
    /// Creates a processor bound to an HTTP client, a scope and a page cap
    pub fn new(client: Client, scope: UrlScope, max_pages: usize) -> Self {
        Self {
            client,
            scope,
            max_pages,
        }
    }

    /// Processes one URL and returns the links to enqueue
    ///
    /// Never fails: every page-level error is logged (non-HTML responses are
    /// skipped silently) and turned into an empty result.
    pub async fn process(&self, url: &str, state: &mut CrawlState) -> Vec<String> {
        let (outcome, links) = self.resolve(url, state).await;
        tracing::debug!("{} -> {} ({} new links)", url, outcome, links.len());
        state.stats.record(outcome, links.len());
        links
    }

    async fn resolve(&self, url: &str, state: &mut CrawlState) -> (PageOutcome, Vec<String>) {
        if state.frontier.visited_count() >= self.max_pages {
            return (PageOutcome::CapReached, Vec::new());
        }

        let normalized = normalize_url(url);
        if state.frontier.is_visited(&normalized) {
            return (PageOutcome::AlreadyVisited, Vec::new());
        }

        state.frontier.mark_visited(normalized.clone());

        match self.fetch_record(url, normalized, &state.frontier).await {
            Ok(record) => {
                let links = record.links.clone();
                state.pages.push(record);
                (PageOutcome::Recorded, links)
            }
            Err(error) => {
                match &error {
                    PageError::UnsupportedContentType { .. } => {
                        tracing::debug!("Skipping non-HTML page: {}", error);
                    }
                    _ => tracing::error!("Error processing {}: {}", url, error),
                }
                (PageOutcome::from(&error), Vec::new())
            }
        }
    }

    async fn fetch_record(
        &self,
        url: &str,
        normalized: String,
        frontier: &Frontier,
    ) -> Result<PageRecord, PageError> {
        let base_url = Url::parse(url).map_err(|e| PageError::Parse {
            url: url.to_string(),
            message: format!("invalid URL: {}", e),
        })?;

        let fetched = fetch_page(&self.client, &base_url).await?;
        if fetched.final_url != base_url.as_str() {
            tracing::debug!("{} redirected to {}", url, fetched.final_url);
        }
        let parsed = parse_html(&fetched.body, &base_url);

        let links = parsed
            .links
            .iter()
            .map(|href| normalize_url(href))
            .filter(|candidate| self.scope.is_valid(candidate) && !frontier.is_visited(candidate))
            .collect();

        Ok(PageRecord {
            url: normalized,
            title: parsed.title.unwrap_or_else(|| NO_TITLE.to_string()),
            sections: parsed.sections,
            links,
        })
    }
}
