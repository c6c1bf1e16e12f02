// src/cli.rs
// =============================================================================
// Command-line interface (clap derive API).
//
// Every flag is optional except the URL. Flags override values from
// --config, which override the built-in defaults.
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

use site_auditor::AuditConfig;

#[derive(Parser, Debug)]
#[command(
    name = "site-auditor",
    version,
    about = "Crawl a website and report duplicate content, structural problems and broken links",
    long_about = "site-auditor crawls a website breadth-first, then reports exact and near-duplicate \
                  pages, heading and accessibility problems, leftover placeholder text, and broken \
                  internal and external links, with prioritized recommendations."
)]
pub struct Cli {
    /// Website URL to audit (e.g., https://example.com)
    pub url: String,

    /// YAML config file; flags given here take precedence over it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum number of URLs to visit
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Delay before each page request, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Concurrent page fetchers (1 = sequential)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Similarity above which two pages are reported as near-duplicates
    #[arg(long)]
    pub similarity_threshold: Option<f64>,

    /// Maximum number of external links to check
    #[arg(long)]
    pub external_cap: Option<usize>,

    /// User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,

    /// Print the full report as JSON instead of a summary table
    #[arg(long)]
    pub json: bool,

    /// Also write the JSON report to this file
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl Cli {
    /// Builds the run configuration: defaults, then --config, then flags.
    pub fn audit_config(&self) -> anyhow::Result<AuditConfig> {
        let mut config = match &self.config {
            Some(path) => AuditConfig::load(path)?,
            None => AuditConfig::default(),
        };

        config.seed_url = self.url.clone();

        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.crawl_delay_ms = delay_ms;
        }
        if let Some(workers) = self.workers {
            config.workers = workers;
        }
        if let Some(threshold) = self.similarity_threshold {
            config.similarity_threshold = threshold;
        }
        if let Some(cap) = self.external_cap {
            config.external_check_cap = cap;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }

        Ok(config)
    }
}
