//! URL handling module for Campus-Harvest
//!
//! This module provides URL normalization, host extraction, and the crawl
//! scope check that combines the domain allow-list with the extension filter.

mod domain;
mod normalize;
mod scope;

// Re-export main functions
pub use domain::extract_domain;
pub use normalize::normalize_url;
pub use scope::UrlScope;
