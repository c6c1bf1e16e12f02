// src/error.rs
// =============================================================================
// Error types for the audit library.
//
// Two families:
// - ConfigError: bad input detected before any crawling starts. Fatal.
// - FetchError: one HTTP request failed (timeout, DNS, TLS, ...). Never fatal;
//   the crawler and link checker turn these into BrokenLinkRecords.
//
// The binary uses anyhow on top of these for its own plumbing.
// =============================================================================

use thiserror::Error;

/// Invalid audit configuration. Raised by `AuditConfig::validate` and when
/// loading a config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid seed URL '{url}': {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Invalid placeholder rule '{pattern}': {source}")]
    InvalidRule {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// A single failed request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request timed out")]
    Timeout,

    #[error("Too many redirects")]
    TooManyRedirects,

    #[error("Could not resolve hostname")]
    Dns,

    #[error("SSL certificate error")]
    Tls,

    #[error("Connection failed")]
    Connect,

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for FetchError {
    // reqwest only exposes a few predicates, so DNS and TLS failures are
    // recognised from the error text.
    fn from(error: reqwest::Error) -> Self {
        let text = error.to_string().to_lowercase();

        if error.is_timeout() {
            FetchError::Timeout
        } else if error.is_redirect() {
            FetchError::TooManyRedirects
        } else if error.is_connect() {
            if text.contains("dns") {
                FetchError::Dns
            } else {
                FetchError::Connect
            }
        } else if text.contains("certificate") || text.contains("ssl") || text.contains("tls") {
            FetchError::Tls
        } else if error.is_body() || error.is_decode() {
            FetchError::Body(error.to_string())
        } else {
            FetchError::Other(error.to_string())
        }
    }
}
