//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with the configured header set
//! - Section-aware content extraction
//! - HTML parsing and link extraction
//! - Per-page processing against the frontier
//! - Seed acquisition and the breadth-first crawl loop

mod coordinator;
mod extractor;
mod fetcher;
mod parser;
mod processor;
mod seeds;

pub use coordinator::{run_crawl, CrawlReport, Crawler};
pub use extractor::{extract_sections, HeadingLevel, Section};
pub use fetcher::{build_http_client, fetch_page, FetchedPage};
pub use parser::{extract_links_simple, parse_html, ParsedPage};
pub use processor::{CrawlState, PageProcessor, PageRecord, NO_TITLE};
pub use seeds::{collect_seed_links, domain_roots, fetch_sitemap_seeds, resolve_seeds};
