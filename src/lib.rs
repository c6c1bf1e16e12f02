// src/lib.rs
// =============================================================================
// site_auditor: crawl a website and report on its content.
//
// The pipeline, leaf modules first:
// - fetch:    the Fetcher capability (HTTP GET/HEAD with timeouts)
// - checker:  link extraction and external link integrity checks
// - crawl:    breadth-first crawl producing a Corpus
// - analysis: duplicate content, structure, placeholders, navigation
// - report:   aggregation into a Report, plus sinks to write it somewhere
// - audit:    run_audit() ties all of the above together
//
// Typical use:
//
//     let config = AuditConfig::for_seed("https://example.com");
//     let fetcher = HttpFetcher::new(&config)?;
//     let report = run_audit(&config, &fetcher, &CancelFlag::default()).await?;
// =============================================================================

pub mod analysis;
pub mod audit;
pub mod checker;
pub mod config;
pub mod crawl;
pub mod error;
pub mod fetch;
pub mod report;

pub use audit::{analyze_content, run_audit};
pub use config::AuditConfig;
pub use crawl::CancelFlag;
pub use error::{ConfigError, FetchError};
pub use fetch::{Fetcher, HttpFetcher};
pub use report::{JsonFileSink, Report, ReportSink};
