// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a seed URL
// - Same-host restriction (external links are recorded, never followed)
// - Page-count cap, per-request delay, optional bounded worker pool
// - External cancellation between queue pops
//
// The result is a Corpus: every page fetched with HTTP 200, the link graph,
// and the internal URLs that failed.
// =============================================================================

mod controller;
mod queue;

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use url::Url;

use crate::checker::BrokenLinkRecord;

pub use controller::{crawl_site, CrawlSettings};
pub use queue::Frontier;

/// A successfully fetched page. Never modified after the crawl creates it.
#[derive(Debug, Clone)]
pub struct Page {
    /// Normalized absolute URL; also the corpus key.
    pub url: Url,
    pub html: String,
    pub status: u16,
    pub discovered_at: DateTime<Utc>,
}

/// Everything a crawl produced.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub seed: Url,
    /// Keyed by normalized URL string, so iteration order is stable.
    pub pages: BTreeMap<String, Page>,
    /// Adjacency list: source page -> every link found on it, in document
    /// order, duplicates included.
    pub links: BTreeMap<String, Vec<Url>>,
    /// Internal URLs that failed (non-200 or transport error).
    pub broken: Vec<BrokenLinkRecord>,
    /// URLs that answered HTTP 200, HTML or not. Bounded by the page cap.
    pub visited: usize,
    pub cancelled: bool,
}

impl Corpus {
    pub fn new(seed: Url) -> Self {
        Self {
            seed,
            pages: BTreeMap::new(),
            links: BTreeMap::new(),
            broken: Vec::new(),
            visited: 0,
            cancelled: false,
        }
    }

    /// Stores a page. Only the crawl controller and tests should call this.
    pub fn insert_page(&mut self, page: Page, links: Vec<Url>) {
        let key = page.url.to_string();
        self.links.insert(key.clone(), links);
        self.pages.insert(key, page);
    }

    /// Every link target seen anywhere in the corpus (with repeats).
    pub fn all_links(&self) -> impl Iterator<Item = &Url> {
        self.links.values().flatten()
    }
}

/// Shared stop signal. Cloning gives another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
