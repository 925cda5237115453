//! Frontier queue for the breadth-first traversal
//!
//! URLs are fetched strictly in discovery order. The queue itself does not deduplicate;
//! the coordinator only pushes URLs it has just registered as pending, so each URL
//! passes through the queue at most once.

use std::collections::VecDeque;

/// Phase of the traversal loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    /// The root page has not been fetched yet
    NotStarted,

    /// Fetching; the queue may still grow
    Running,

    /// The queue is empty and every discovered URL has been attempted
    Done,
}

/// FIFO queue of canonical URLs awaiting a fetch
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<String>,
    enqueued_total: usize,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a URL to the back of the queue
    pub fn push(&mut self, url: String) {
        self.enqueued_total += 1;
        self.queue.push_back(url);
    }

    /// Removes the URL at the front of the queue
    pub fn pop(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    /// Returns the number of URLs waiting
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the frontier is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of URLs ever pushed
    pub fn enqueued_total(&self) -> usize {
        self.enqueued_total
    }
}
