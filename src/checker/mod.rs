// src/checker/mod.rs
// =============================================================================
// Link handling: extraction from HTML and integrity checking.
//
// Submodules:
// - html: pulls absolute links out of a page
// - http: checks a bounded number of external links with HEAD requests
//
// The types below are shared with the crawler, which records internal
// failures with the same BrokenLinkRecord.
// =============================================================================

mod html;
mod http;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::FetchError;

pub use html::{extract_document_links, extract_links, normalize_url};
pub use http::{check_external_links, ExternalCheck};

/// Where a broken link was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkKind {
    /// Found during the crawl (non-200 status or transport failure).
    Internal,
    /// External link answered with status >= 400.
    External,
    /// External link could not be reached at all.
    ExternalError,
}

/// One failed fetch or check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokenLinkRecord {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: LinkKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BrokenLinkRecord {
    pub fn with_status(url: &Url, kind: LinkKind, status: u16) -> Self {
        Self {
            url: url.to_string(),
            kind,
            status: Some(status),
            error: None,
        }
    }

    pub fn with_error(url: &Url, kind: LinkKind, error: &FetchError) -> Self {
        Self {
            url: url.to_string(),
            kind,
            status: None,
            error: Some(error.to_string()),
        }
    }
}

/// True when `url` lives on the same host and port as `seed`.
/// Default ports count as equal to an explicit one (":443" on https).
pub fn is_internal(seed: &Url, url: &Url) -> bool {
    seed.host_str() == url.host_str()
        && seed.port_or_known_default() == url.port_or_known_default()
}
