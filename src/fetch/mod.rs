// src/fetch/mod.rs
// =============================================================================
// The network boundary of the auditor.
//
// Everything that talks to a website goes through the Fetcher trait:
// - the crawl controller uses get() to download pages
// - the link checker uses head() to see whether external links still exist
//
// Production code uses HttpFetcher (reqwest). Tests plug in an in-memory site
// so the crawler and pipeline can run without a network.
// =============================================================================

mod http;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use url::Url;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// A response to a GET request. Any status code is a "successful" fetch at
/// this level; the crawler decides what a non-200 means.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    /// Value of the Content-Type header, if the server sent one.
    pub content_type: Option<String>,
    pub body: String,
}

impl FetchedPage {
    /// True unless the server explicitly labelled the body as something
    /// other than HTML (stylesheets, images, PDFs...).
    pub fn is_html(&self) -> bool {
        self.content_type
            .as_deref()
            .map_or(true, |ct| ct.to_ascii_lowercase().contains("html"))
    }
}

/// Capability to retrieve pages and probe links.
///
/// Implementations apply their own timeouts; neither method may block
/// indefinitely.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Downloads a page.
    async fn get(&self, url: &Url) -> Result<FetchedPage, FetchError>;

    /// Lightweight existence check. Returns the final status code.
    async fn head(&self, url: &Url) -> Result<u16, FetchError>;
}
