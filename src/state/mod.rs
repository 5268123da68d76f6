//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `Frontier`: the FIFO queue of pending URLs and the visited set
//! - `PageOutcome`: how each dequeued URL was resolved

mod frontier;
mod page_outcome;

// Re-export main types
pub use frontier::Frontier;
pub use page_outcome::PageOutcome;
