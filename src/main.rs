// src/main.rs
// =============================================================================
// This is the entry point of the site-auditor CLI.
//
// What happens here:
// 1. Parse command-line arguments (and the optional config file)
// 2. Install logging (stderr, RUST_LOG aware) and the Ctrl-C handler
// 3. Run the audit
// 4. Print a summary table or the JSON report, optionally save it
// 5. Exit with 0 (nothing to fix), 1 (recommendations) or 2 (error)
// =============================================================================

mod cli;

use anyhow::Result;
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use site_auditor::report::{Priority, Report};
use site_auditor::{run_audit, CancelFlag, HttpFetcher, JsonFileSink, ReportSink};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    let config = cli.audit_config()?;

    // Validate up front so a bad flag never costs a request
    config.validate()?;
    let fetcher = HttpFetcher::new(&config)?;

    // First Ctrl-C stops the crawl; the partial report is still produced
    let cancel = CancelFlag::default();
    let handle = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, finishing with partial results");
            handle.cancel();
        }
    });

    let report = run_audit(&config, &fetcher, &cancel).await?;

    if let Some(path) = &cli.output {
        JsonFileSink::new(path).accept(&report)?;
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }

    if report.recommendations.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn print_summary(report: &Report) {
    let s = &report.summary;

    println!();
    println!("📊 Audit of {}", report.seed_url);
    if report.cancelled {
        println!("⚠️  Run was interrupted; results are partial");
    }
    println!("{}", "=".repeat(60));
    println!("{:<45} {:>10}", "Pages analyzed", s.total_pages_analyzed);
    println!("{:<45} {:>10}", "URLs visited", s.urls_visited);
    println!("{:<45} {:>10}", "Broken links (internal)", s.broken_internal);
    println!("{:<45} {:>10}", "Broken links (external)", s.broken_external);
    println!("{:<45} {:>10}", "Unreachable external links", s.external_errors);
    println!(
        "{:<45} {:>10}",
        "External links checked",
        format!("{}/{}", s.external_links_checked, s.external_links_found)
    );
    println!("{:<45} {:>10}", "Exact duplicate groups", s.exact_duplicate_groups);
    println!("{:<45} {:>10}", "Similar content pairs", s.similar_content_pairs);
    println!("{:<45} {:>10}", "Placeholder text instances", s.placeholder_text_instances);
    println!(
        "{:<45} {:>10}",
        "Pages with accessibility issues", s.pages_with_accessibility_issues
    );
    println!();

    if report.recommendations.is_empty() {
        println!("✅ No recommendations");
        return;
    }

    println!("Recommendations:");
    for (idx, rec) in report.recommendations.iter().enumerate() {
        let marker = match rec.priority {
            Priority::High => "🔴",
            Priority::Medium => "🟡",
        };
        println!("{} {}. [{}] {}", marker, idx + 1, rec.category, rec.issue);
        println!("     {}", rec.recommendation);
    }
}
