// src/config.rs
// =============================================================================
// Audit configuration.
//
// One AuditConfig is built per run and passed explicitly to everything that
// needs it (the HTTP fetcher, the crawler, the analysis phases). Values come
// from three places, lowest priority first:
// 1. Defaults (AuditConfig::default)
// 2. An optional YAML file (AuditConfig::load)
// 3. Command-line flags (applied by the binary)
//
// validate() must succeed before any request is sent.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

use crate::analysis::placeholders::{compile_rules, default_rules, PlaceholderRule};
use crate::error::ConfigError;

/// Upper bound on concurrent crawl workers.
pub const MAX_WORKERS: usize = 16;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct AuditConfig {
    /// Where the crawl starts. Its host decides what counts as internal.
    pub seed_url: String,
    /// Maximum number of URLs the crawler will visit.
    pub max_pages: usize,
    /// Pause before each page fetch (per worker), in milliseconds.
    pub crawl_delay_ms: u64,
    pub page_timeout_secs: u64,
    /// 1 = strictly sequential crawl.
    pub workers: usize,
    /// Pairs scoring strictly above this are reported as similar content.
    pub similarity_threshold: f64,
    /// How many leading characters of normalized text are compared.
    pub similarity_window: usize,
    /// Maximum number of external links checked per run.
    pub external_check_cap: usize,
    pub external_check_timeout_secs: u64,
    pub external_check_delay_ms: u64,
    pub user_agent: String,
    pub placeholder_rules: Vec<PlaceholderRule>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            seed_url: String::new(),
            max_pages: 100,
            crawl_delay_ms: 500,
            page_timeout_secs: 10,
            workers: 1,
            similarity_threshold: 0.85,
            similarity_window: 500,
            external_check_cap: 50,
            external_check_timeout_secs: 5,
            external_check_delay_ms: 200,
            user_agent: format!("site-auditor/{}", env!("CARGO_PKG_VERSION")),
            placeholder_rules: default_rules(),
        }
    }
}

impl AuditConfig {
    /// Defaults with the given seed.
    pub fn for_seed(seed_url: impl Into<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            ..Self::default()
        }
    }

    /// Reads a YAML config file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Checks every setting and returns the parsed seed URL.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let seed = self.seed()?;

        if self.max_pages == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max-pages",
                reason: "must be at least 1".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "similarity-threshold",
                reason: format!("{} is outside [0, 1]", self.similarity_threshold),
            });
        }

        if self.similarity_window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "similarity-window",
                reason: "must be at least 1 character".to_string(),
            });
        }

        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(ConfigError::InvalidValue {
                field: "workers",
                reason: format!("{} is outside 1..={}", self.workers, MAX_WORKERS),
            });
        }

        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "user-agent",
                reason: "must not be empty".to_string(),
            });
        }

        compile_rules(&self.placeholder_rules)?;

        Ok(seed)
    }

    fn seed(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidSeed {
            url: self.seed_url.clone(),
            reason,
        };

        let url = Url::parse(self.seed_url.trim()).map_err(|e| invalid(e.to_string()))?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(invalid("URL has no host".to_string()));
        }

        Ok(url)
    }

    pub fn crawl_delay(&self) -> Duration {
        Duration::from_millis(self.crawl_delay_ms)
    }

    pub fn page_timeout(&self) -> Duration {
        Duration::from_secs(self.page_timeout_secs)
    }

    pub fn external_check_timeout(&self) -> Duration {
        Duration::from_secs(self.external_check_timeout_secs)
    }

    pub fn external_check_delay(&self) -> Duration {
        Duration::from_millis(self.external_check_delay_ms)
    }
}
