// src/fetch/http.rs
// =============================================================================
// reqwest-backed Fetcher.
//
// One Client per HttpFetcher (connection pooling). The client carries the
// user agent; each request carries its own timeout because page fetches and
// external link checks use different limits.
//
// HEAD requests follow redirects (reqwest's default policy, capped at 5 here)
// so a moved page reports the status of its final location.
// =============================================================================

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

use super::{FetchedPage, Fetcher};
use crate::config::AuditConfig;
use crate::error::{ConfigError, FetchError};

#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    page_timeout: Duration,
    check_timeout: Duration,
}

impl HttpFetcher {
    /// Builds a fetcher from the run's configuration.
    pub fn new(config: &AuditConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            page_timeout: config.page_timeout(),
            check_timeout: config.external_check_timeout(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &Url) -> Result<FetchedPage, FetchError> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .timeout(self.page_timeout)
            .send()
            .await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;

        Ok(FetchedPage {
            status,
            content_type,
            body,
        })
    }

    async fn head(&self, url: &Url) -> Result<u16, FetchError> {
        debug!(%url, "HEAD");
        let response = self
            .client
            .head(url.clone())
            .timeout(self.check_timeout)
            .send()
            .await?;

        Ok(response.status().as_u16())
    }
}
