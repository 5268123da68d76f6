//! Crawl frontier: the pending queue plus the visited set
//!
//! Duplicates are allowed in the queue; they are filtered when a URL is
//! dequeued and checked against the visited set, not when it is enqueued.

use std::collections::{HashSet, VecDeque};

/// Pending URLs and the normalized URLs already claimed by the crawl
#[derive(Debug, Default)]
pub struct Frontier {
    /// Normalized URLs that have been marked visited; never shrinks
    visited: HashSet<String>,

    /// URLs waiting to be processed, in FIFO order
    queue: VecDeque<String>,
}

impl Frontier {
    /// Creates a frontier seeded with the given URLs, order preserved
    pub fn new<I, S>(seeds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            visited: HashSet::new(),
            queue: seeds.into_iter().map(Into::into).collect(),
        }
    }

    /// Removes and returns the oldest pending URL
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Appends URLs to the tail of the queue
    pub fn extend<I>(&mut self, urls: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.queue.extend(urls);
    }

    /// Returns true if the normalized URL was already marked visited
    pub fn is_visited(&self, normalized: &str) -> bool {
        self.visited.contains(normalized)
    }

    /// Marks a normalized URL visited
    ///
    /// Returns false if it was already present.
    pub fn mark_visited(&mut self, normalized: impl Into<String>) -> bool {
        self.visited.insert(normalized.into())
    }

    /// Number of URLs marked visited so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of URLs still queued (including duplicates)
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns true once the queue is drained
    pub fn is_exhausted(&self) -> bool {
        self.queue.is_empty()
    }
}
