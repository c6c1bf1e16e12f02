// src/crawl/controller.rs
// =============================================================================
// Breadth-first crawl driver.
//
// How it works:
// 1. Start with the seed URL in the frontier
// 2. Pop up to `workers` URLs, claiming each one so it is fetched only once
// 3. Fetch the batch, at most `workers` requests in flight
// 4. HTTP 200: mark visited; if HTML, store the page and queue its
//    unclaimed internal links
//    Anything else: record a BrokenLinkRecord and move on
// 5. Repeat until the queue is empty, `max_pages` URLs have answered 200,
//    or the cancel flag is raised
//
// Failed URLs do not count toward the cap. A batch never holds more URLs
// than the cap has room left, so even a batch that succeeds in full stays
// within it.
//
// Politeness: every request except the very first waits `delay` first. With
// several workers the waits overlap, so the delay acts per worker.
//
// Failures never stop the crawl; the returned Corpus is always usable.
// =============================================================================

use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::{CancelFlag, Corpus, Frontier, Page};
use crate::checker::{extract_links, is_internal, normalize_url, BrokenLinkRecord, LinkKind};
use crate::config::AuditConfig;
use crate::error::FetchError;
use crate::fetch::{FetchedPage, Fetcher};

/// The subset of AuditConfig the crawler cares about.
#[derive(Debug, Clone)]
pub struct CrawlSettings {
    pub max_pages: usize,
    pub delay: Duration,
    pub workers: usize,
}

impl From<&AuditConfig> for CrawlSettings {
    fn from(config: &AuditConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            delay: config.crawl_delay(),
            workers: config.workers,
        }
    }
}

/// Crawls the site behind `seed`.
pub async fn crawl_site<F>(
    fetcher: &F,
    seed: &Url,
    settings: &CrawlSettings,
    cancel: &CancelFlag,
) -> Corpus
where
    F: Fetcher + ?Sized,
{
    let seed = normalize_url(seed);
    let workers = settings.workers.max(1);
    let delay = settings.delay;

    let mut corpus = Corpus::new(seed.clone());
    let mut frontier = Frontier::new(&seed);
    let mut first_request = true;

    info!(
        "Starting crawl from {} (max {} pages, {} worker(s))",
        seed, settings.max_pages, workers
    );

    loop {
        if cancel.is_cancelled() {
            info!("Crawl cancelled with {} URL(s) still queued", frontier.queued());
            corpus.cancelled = true;
            break;
        }

        let batch = next_batch(&mut frontier, workers, settings.max_pages);
        if batch.is_empty() {
            break;
        }

        let skip_delay = first_request;
        first_request = false;

        let results: Vec<(Url, Result<FetchedPage, FetchError>)> = stream::iter(
            batch.into_iter().enumerate().map(|(i, url)| async move {
                if !(skip_delay && i == 0) {
                    tokio::time::sleep(delay).await;
                }
                let result = fetcher.get(&url).await;
                (url, result)
            }),
        )
        .buffer_unordered(workers)
        .collect()
        .await;

        for (url, result) in results {
            record_result(&mut corpus, &mut frontier, url, result);
        }
    }

    corpus.visited = frontier.visited_count();

    info!(
        "Crawl complete: {} page(s) stored, {} URL(s) visited, {} failed",
        corpus.pages.len(),
        corpus.visited,
        corpus.broken.len()
    );

    corpus
}

// Pops and claims URLs until the batch is full, the queue runs dry, or the
// batch would fill what is left of the page cap.
fn next_batch(frontier: &mut Frontier, workers: usize, max_pages: usize) -> Vec<Url> {
    let room = max_pages.saturating_sub(frontier.visited_count());
    let size = workers.min(room);
    let mut batch = Vec::with_capacity(size);

    while batch.len() < size {
        let Some(url) = frontier.pop() else {
            break;
        };

        if frontier.claim(&url) {
            batch.push(url);
        } else {
            debug!(%url, "Already claimed, skipping");
        }
    }

    batch
}

fn record_result(
    corpus: &mut Corpus,
    frontier: &mut Frontier,
    url: Url,
    result: Result<FetchedPage, FetchError>,
) {
    match result {
        Ok(fetched) if fetched.status == 200 => {
            frontier.mark_visited(&url);

            if !fetched.is_html() {
                debug!(%url, content_type = ?fetched.content_type, "Skipping non-HTML resource");
                return;
            }

            info!("Crawled: {}", url);
            let links = extract_links(&fetched.body, &url);

            for link in links.iter().filter(|link| is_internal(&corpus.seed, link)) {
                frontier.push(link);
            }

            corpus.insert_page(
                Page {
                    url,
                    html: fetched.body,
                    status: fetched.status,
                    discovered_at: Utc::now(),
                },
                links,
            );
        }
        Ok(fetched) => {
            warn!("Failed to fetch {}: HTTP {}", url, fetched.status);
            corpus
                .broken
                .push(BrokenLinkRecord::with_status(&url, LinkKind::Internal, fetched.status));
        }
        Err(e) => {
            warn!("Error crawling {}: {}", url, e);
            corpus
                .broken
                .push(BrokenLinkRecord::with_error(&url, LinkKind::Internal, &e));
        }
    }
}
