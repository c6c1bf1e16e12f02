// src/crawl/queue.rs
// =============================================================================
// The crawl frontier: a FIFO queue plus the visited set.
//
// Three sets are kept:
// - seen:    every URL ever pushed (stops the queue filling with repeats)
// - claimed: every URL handed out for fetching
// - visited: every URL that answered HTTP 200 (counts toward the page cap)
//
// claim() is the check-and-mark step. It returns true exactly once per URL,
// so no URL is fetched twice even when several workers pull batches from the
// same frontier. A failed URL stays claimed but is never visited. URLs are
// normalized (fragment stripped) before any set is consulted.
// =============================================================================

use std::collections::{HashSet, VecDeque};
use url::Url;

use crate::checker::normalize_url;

#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Url>,
    seen: HashSet<String>,
    claimed: HashSet<String>,
    visited: HashSet<String>,
}

impl Frontier {
    pub fn new(seed: &Url) -> Self {
        let mut frontier = Self::default();
        frontier.push(seed);
        frontier
    }

    /// Adds a URL to the back of the queue. Returns false if it was already
    /// queued or claimed.
    pub fn push(&mut self, url: &Url) -> bool {
        let url = normalize_url(url);
        let key = url.to_string();

        if self.claimed.contains(&key) || !self.seen.insert(key) {
            return false;
        }

        self.queue.push_back(url);
        true
    }

    pub fn pop(&mut self) -> Option<Url> {
        self.queue.pop_front()
    }

    /// Hands a URL out for fetching. True if this call did the marking.
    pub fn claim(&mut self, url: &Url) -> bool {
        self.claimed.insert(normalize_url(url).to_string())
    }

    /// Records that a claimed URL answered HTTP 200.
    pub fn mark_visited(&mut self, url: &Url) {
        self.visited.insert(normalize_url(url).to_string());
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(normalize_url(url).as_str())
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed.len()
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
