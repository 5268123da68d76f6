//! Output module for exporting crawl results
//!
//! This module handles:
//! - Flattening page records into one CSV row per section
//! - Recording and printing crawl statistics

mod csv_export;
pub mod stats;

pub use csv_export::{export_csv, flatten_records, write_csv, ExportRow, CSV_HEADER};
pub use stats::{print_statistics, CrawlStatistics};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
