//! Crawl statistics
//!
//! Counters collected while the crawl runs, and a plain-text report printed
//! by the binary once the CSV has been written.

use crate::state::PageOutcome;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the crawl loop started
    pub started_at: DateTime<Utc>,

    /// When the crawl loop returned
    pub finished_at: Option<DateTime<Utc>>,

    /// URLs popped from the frontier, including short-circuited ones
    pub urls_dequeued: u64,

    /// Count of dequeued URLs by outcome
    pub outcomes: HashMap<PageOutcome, u64>,

    /// Links handed back to the frontier
    pub links_discovered: u64,
}

impl Default for CrawlStatistics {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlStatistics {
    /// Creates an empty statistics record stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            urls_dequeued: 0,
            outcomes: HashMap::new(),
            links_discovered: 0,
        }
    }

    /// Records the outcome of one dequeued URL
    pub fn record(&mut self, outcome: PageOutcome, links_discovered: usize) {
        self.urls_dequeued += 1;
        *self.outcomes.entry(outcome).or_insert(0) += 1;
        self.links_discovered += links_discovered as u64;
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Number of URLs that ended with the given outcome
    pub fn count(&self, outcome: PageOutcome) -> u64 {
        self.outcomes.get(&outcome).copied().unwrap_or(0)
    }

    /// Number of page records produced
    pub fn pages_recorded(&self) -> u64 {
        self.sum_where(PageOutcome::is_success)
    }

    /// Number of URLs dropped by the visited or cap checks
    pub fn skipped(&self) -> u64 {
        self.sum_where(PageOutcome::is_skipped)
    }

    /// Number of logged page-level errors
    pub fn errors(&self) -> u64 {
        self.sum_where(PageOutcome::is_error)
    }

    fn sum_where(&self, predicate: impl Fn(&PageOutcome) -> bool) -> u64 {
        self.outcomes
            .iter()
            .filter(|(outcome, _)| predicate(*outcome))
            .map(|(_, count)| count)
            .sum()
    }

    /// Wall-clock duration of the crawl, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
/// * `rows_written` - CSV rows exported, if the export ran
pub fn print_statistics(stats: &CrawlStatistics, rows_written: Option<usize>) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Started: {}", stats.started_at.to_rfc3339());
    if let Some(finished) = stats.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = stats.duration_seconds() {
        println!(
            "  Duration: {} seconds ({:.2} minutes)",
            duration,
            duration as f64 / 60.0
        );
    }
    println!("  URLs dequeued: {}", stats.urls_dequeued);
    println!("  Links discovered: {}", stats.links_discovered);
    if let Some(rows) = rows_written {
        println!("  CSV rows written: {}", rows);
    }
    println!();

    println!("URLs by Outcome:");
    let mut outcome_counts: Vec<_> = stats.outcomes.iter().collect();
    outcome_counts.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.as_str().cmp(b.0.as_str())));

    for (outcome, count) in outcome_counts {
        let percentage = if stats.urls_dequeued > 0 {
            (*count as f64 / stats.urls_dequeued as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", outcome, count, percentage);
    }
    println!();

    println!(
        "Pages recorded: {} ({} skipped, {} errors)",
        stats.pages_recorded(),
        stats.skipped(),
        stats.errors()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_outcomes() {
        let mut stats = CrawlStatistics::new();
        stats.record(PageOutcome::Recorded, 4);
        stats.record(PageOutcome::Recorded, 1);
        stats.record(PageOutcome::HttpError, 0);
        stats.record(PageOutcome::Unreachable, 0);
        stats.record(PageOutcome::AlreadyVisited, 0);
        stats.record(PageOutcome::ContentMismatch, 0);

        assert_eq!(stats.urls_dequeued, 6);
        assert_eq!(stats.links_discovered, 5);
        assert_eq!(stats.pages_recorded(), 2);
        assert_eq!(stats.errors(), 2);
        assert_eq!(stats.skipped(), 1);
        assert_eq!(stats.count(PageOutcome::CapReached), 0);
    }

    #[test]
    fn test_duration_after_finish() {
        let mut stats = CrawlStatistics::new();
        assert_eq!(stats.duration_seconds(), None);

        stats.finish();
        assert!(stats.duration_seconds().unwrap() >= 0);
    }
}
