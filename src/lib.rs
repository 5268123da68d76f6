//! Campus-Harvest: a section-aware campus web crawler
//!
//! This crate crawls an allow-listed set of university subdomains breadth-first,
//! extracts heading-delimited text sections from every HTML page, and exports
//! them as CSV rows for downstream retrieval pipelines.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for run-level failures
///
/// Anything surfacing as a `HarvestError` aborts the run. Page-level
/// failures are reported through [`PageError`] and never escape the crawl loop.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Seed page {url} returned HTTP {status}")]
    SeedStatus { url: String, status: u16 },

    #[error("No seed URLs available to crawl")]
    NoSeeds,

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid request header: {0}")]
    InvalidHeader(String),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid domain pattern: {0}")]
    InvalidPattern(String),
}

/// Errors that can occur while processing a single page
///
/// All of these are recoverable: the page is left without a record and the
/// crawl moves on to the next URL.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("Transport error for {url}: {message}")]
    Transport { url: String, message: String },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Unsupported content type '{content_type}' for {url}")]
    UnsupportedContentType { url: String, content_type: String },

    #[error("HTML parse error for {url}: {message}")]
    Parse { url: String, message: String },
}

/// Result type alias for run-level operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Crawler, CrawlReport, HeadingLevel, PageRecord, Section};
pub use state::{Frontier, PageOutcome};
pub use url::{normalize_url, UrlScope};
