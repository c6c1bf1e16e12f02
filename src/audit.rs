// src/audit.rs
// =============================================================================
// The audit pipeline:
//
//   validate config -> crawl -> [content phases | external link check] -> report
//
// Configuration errors are the only way a run fails, and they are raised
// before the first request. After that every failure is recorded in the
// corpus or the report and the run carries on.
//
// The content phases (normalize, duplicates, structure, placeholders,
// navigation) are pure functions of the corpus; the external link check is
// the only post-crawl phase that does I/O. The two run side by side.
// =============================================================================

use chrono::Utc;
use tracing::info;

use crate::analysis::placeholders::{compile_rules, CompiledRule};
use crate::analysis::{
    analyze_navigation, analyze_page, detect_duplicates, find_placeholders, NormalizedContent,
    SimilarityOptions,
};
use crate::checker::check_external_links;
use crate::config::AuditConfig;
use crate::crawl::{crawl_site, CancelFlag, Corpus, CrawlSettings};
use crate::error::ConfigError;
use crate::fetch::Fetcher;
use crate::report::{build_report, PhaseOutputs, Report};

/// Runs a complete audit of the site named in `config`.
pub async fn run_audit<F>(
    config: &AuditConfig,
    fetcher: &F,
    cancel: &CancelFlag,
) -> Result<Report, ConfigError>
where
    F: Fetcher + ?Sized,
{
    let seed = config.validate()?;
    let rules = compile_rules(&config.placeholder_rules)?;

    let corpus = crawl_site(fetcher, &seed, &CrawlSettings::from(config), cancel).await;

    let similarity = SimilarityOptions {
        threshold: config.similarity_threshold,
        window: config.similarity_window,
    };

    let external = check_external_links(
        fetcher,
        &corpus.seed,
        corpus.all_links(),
        config.external_check_cap,
        config.external_check_delay(),
        cancel,
    );
    let content = async { analyze_content(&corpus, similarity, &rules) };

    let (external, mut phases) = tokio::join!(external, content);
    phases.external = external;

    let report = build_report(&corpus, phases, Utc::now());

    info!(
        "Audit complete: {} page(s), {} broken link(s), {} duplicate issue(s), \
         {} recommendation(s)",
        report.summary.total_pages_analyzed,
        report.summary.total_broken_links,
        report.summary.duplicate_content_issues,
        report.recommendations.len()
    );

    Ok(report)
}

/// Every network-free phase over a finished corpus. `external` is left empty.
pub fn analyze_content(
    corpus: &Corpus,
    similarity: SimilarityOptions,
    rules: &[CompiledRule],
) -> PhaseOutputs {
    info!("Analyzing {} page(s)", corpus.pages.len());

    let contents: Vec<NormalizedContent> = corpus
        .pages
        .values()
        .map(NormalizedContent::from_page)
        .collect();

    let duplicates = detect_duplicates(&contents, similarity);
    info!("Found {} duplicate/similar content issue(s)", duplicates.len());

    let placeholders = find_placeholders(&contents, rules);
    info!("Found {} placeholder text instance(s)", placeholders.len());

    let page_metadata = corpus.pages.values().map(analyze_page).collect();
    let navigation = analyze_navigation(corpus.pages.values());

    PhaseOutputs {
        navigation,
        duplicates,
        page_metadata,
        placeholders,
        ..PhaseOutputs::default()
    }
}
