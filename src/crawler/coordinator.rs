//! Crawler coordinator - the breadth-first crawl loop
//!
//! The loop owns the frontier for the whole run:
//! - pop the oldest URL (FIFO, so traversal is breadth-first)
//! - hand it to the page processor
//! - append the discovered links to the tail of the queue
//! - sleep the configured delay, whatever the outcome
//!
//! It stops when the queue is drained or the visited set reaches the cap.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::processor::{CrawlState, PageProcessor, PageRecord};
use crate::crawler::seeds::resolve_seeds;
use crate::crawler::build_http_client;
use crate::output::CrawlStatistics;
use crate::url::UrlScope;
use crate::HarvestError;
use reqwest::Client;
use std::time::Duration;

/// Log a progress line every this many dequeued URLs
const PROGRESS_INTERVAL: u64 = 10;

/// Result of one crawl run
#[derive(Debug)]
pub struct CrawlReport {
    /// Page records in processing order
    pub pages: Vec<PageRecord>,

    /// Number of normalized URLs marked visited
    pub visited: usize,

    /// URLs still queued when the run stopped
    pub pending: usize,

    /// Counters collected during the run
    pub stats: CrawlStatistics,
}

/// Breadth-first crawler parameterized by scope, page cap and delay
pub struct Crawler {
    processor: PageProcessor,
    max_pages: usize,
    delay: Duration,
}

impl Crawler {
    /// Creates a crawler around an existing client
    pub fn with_client(client: Client, scope: UrlScope, config: &CrawlerConfig) -> Self {
        Self {
            processor: PageProcessor::new(client, scope, config.max_pages),
            max_pages: config.max_pages,
            delay: Duration::from_millis(config.delay_ms),
        }
    }

    /// Runs the crawl to completion from the given seeds
    ///
    /// Individual page failures never end the run; the report is returned
    /// once the queue is exhausted or the page cap is hit.
    pub async fn crawl(&self, seeds: Vec<String>) -> CrawlReport {
        tracing::info!(
            "Starting crawl: {} seed URLs, max {} pages, {:?} delay",
            seeds.len(),
            self.max_pages,
            self.delay
        );

        let mut state = CrawlState::new(seeds);

        while !state.frontier.is_exhausted() && state.frontier.visited_count() < self.max_pages {
            let url = match state.frontier.pop() {
                Some(url) => url,
                None => break,
            };

            let links = self.processor.process(&url, &mut state).await;
            state.frontier.extend(links);

            let processed = state.stats.urls_dequeued;
            if processed % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Progress: {} URLs processed, {} visited, {} pages recorded, {} in frontier",
                    processed,
                    state.frontier.visited_count(),
                    state.pages.len(),
                    state.frontier.pending()
                );
            }

            tokio::time::sleep(self.delay).await;
        }

        if state.frontier.visited_count() >= self.max_pages {
            tracing::info!("Page cap of {} reached", self.max_pages);
        } else {
            tracing::info!("Frontier is empty, crawl complete");
        }

        state.stats.finish();
        tracing::info!(
            "Crawl finished: {} pages recorded, {} URLs visited, {} errors",
            state.pages.len(),
            state.frontier.visited_count(),
            state.stats.errors()
        );

        CrawlReport {
            visited: state.frontier.visited_count(),
            pending: state.frontier.pending(),
            pages: state.pages,
            stats: state.stats,
        }
    }
}

/// Runs the main crawl operation
///
/// 1. Build the HTTP client
/// 2. Resolve seeds (configured list or sitemap)
/// 3. Crawl breadth-first until the queue drains or the cap is hit
///
/// Seed acquisition errors abort the run.
///
/// # Example
///
/// ```no_run
/// use campus_harvest::config::load_config;
/// use campus_harvest::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("harvest.toml"))?;
/// let report = run_crawl(&config).await?;
/// println!("{} pages", report.pages.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config) -> Result<CrawlReport, HarvestError> {
    let client = build_http_client(
        &config.user_agent,
        Duration::from_secs(config.crawler.request_timeout_secs),
    )?;
    let scope = UrlScope::from_config(&config.scope);
    tracing::info!("Crawl scope: {} allowed domains", scope.domain_count());

    let seeds = resolve_seeds(&client, &config.seeds, &config.scope).await?;
    let crawler = Crawler::with_client(client, scope, &config.crawler);

    Ok(crawler.crawl(seeds).await)
}
