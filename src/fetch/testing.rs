// src/fetch/testing.rs
// In-memory Fetcher used by crawler, checker and pipeline tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

use super::{FetchedPage, Fetcher};
use crate::error::FetchError;

/// A fake website: URL -> (status, body). Unknown URLs answer 404.
/// Bodies are served as text/html unless registered with `resource`.
/// Every request is logged so tests can assert on what was fetched.
#[derive(Default)]
pub(crate) struct StaticSite {
    pages: HashMap<String, (u16, String)>,
    resources: HashMap<String, String>,
    failures: HashMap<String, FetchError>,
    requests: Mutex<Vec<(String, String)>>,
}

impl StaticSite {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(key(url), (200, html.to_string()));
        self
    }

    /// A 200 response with a non-HTML content type.
    pub(crate) fn resource(mut self, url: &str, content_type: &str) -> Self {
        self.pages.insert(key(url), (200, String::new()));
        self.resources.insert(key(url), content_type.to_string());
        self
    }

    pub(crate) fn status(mut self, url: &str, status: u16) -> Self {
        self.pages.insert(key(url), (status, String::new()));
        self
    }

    pub(crate) fn failing(mut self, url: &str, error: FetchError) -> Self {
        self.failures.insert(key(url), error);
        self
    }

    /// (method, url) pairs in request order.
    pub(crate) fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn request_count(&self, method: &str) -> usize {
        self.requests().iter().filter(|(m, _)| m == method).count()
    }

    fn record(&self, method: &str, url: &Url) {
        self.requests
            .lock()
            .unwrap()
            .push((method.to_string(), url.to_string()));
    }

    fn lookup(&self, url: &Url) -> Result<(u16, String), FetchError> {
        let key = url.to_string();
        if let Some(error) = self.failures.get(&key) {
            return Err(error.clone());
        }
        Ok(self
            .pages
            .get(&key)
            .cloned()
            .unwrap_or((404, String::new())))
    }
}

fn key(url: &str) -> String {
    Url::parse(url).unwrap().to_string()
}

#[async_trait]
impl Fetcher for StaticSite {
    async fn get(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        self.record("GET", url);
        let (status, body) = self.lookup(url)?;
        let content_type = self
            .resources
            .get(url.as_str())
            .cloned()
            .unwrap_or_else(|| "text/html".to_string());
        Ok(FetchedPage {
            status,
            content_type: Some(content_type),
            body,
        })
    }

    async fn head(&self, url: &Url) -> Result<u16, FetchError> {
        self.record("HEAD", url);
        self.lookup(url).map(|(status, _)| status)
    }
}
