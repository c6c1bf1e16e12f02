// src/report/aggregate.rs
// =============================================================================
// Merges the crawl and every analysis phase into one Report.
//
// build_report() is pure: the same inputs (including the timestamp) always
// give the same Report. Recommendations come from fixed rules:
//
//   more than one distinct navigation structure  -> High   (Navigation)
//   any duplicate or similar content group        -> High   (Content)
//   any page with accessibility issues            -> High   (Accessibility)
//   any broken link                               -> Medium (Links)
//   any placeholder text                          -> Medium (Content)
// =============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::analysis::{DuplicateGroup, NavigationSummary, PageMetadata, PlaceholderMatch};
use crate::checker::{BrokenLinkRecord, ExternalCheck, LinkKind};
use crate::crawl::Corpus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub category: String,
    pub priority: Priority,
    pub issue: String,
    pub recommendation: String,
}

/// Headline numbers, including failure counts per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_pages_analyzed: usize,
    pub urls_visited: usize,
    pub total_broken_links: usize,
    pub broken_internal: usize,
    pub broken_external: usize,
    pub external_errors: usize,
    pub external_links_found: usize,
    pub external_links_checked: usize,
    pub duplicate_content_issues: usize,
    pub exact_duplicate_groups: usize,
    pub similar_content_pairs: usize,
    pub placeholder_text_instances: usize,
    pub pages_with_accessibility_issues: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub seed_url: String,
    pub generated_at: DateTime<Utc>,
    /// True when the run was stopped early; the results cover what was done.
    pub cancelled: bool,
    pub summary: Summary,
    pub information_architecture: NavigationSummary,
    pub duplicate_content: Vec<DuplicateGroup>,
    pub broken_links: Vec<BrokenLinkRecord>,
    pub placeholder_text: Vec<PlaceholderMatch>,
    pub page_metadata: BTreeMap<String, PageMetadata>,
    pub recommendations: Vec<Recommendation>,
}

/// Results of the analysis phases, ready to be aggregated.
#[derive(Debug, Clone, Default)]
pub struct PhaseOutputs {
    pub navigation: NavigationSummary,
    pub duplicates: Vec<DuplicateGroup>,
    pub page_metadata: Vec<PageMetadata>,
    pub placeholders: Vec<PlaceholderMatch>,
    pub external: ExternalCheck,
}

pub fn build_report(corpus: &Corpus, phases: PhaseOutputs, generated_at: DateTime<Utc>) -> Report {
    let mut broken_links = corpus.broken.clone();
    broken_links.extend(phases.external.broken.iter().cloned());

    let page_metadata: BTreeMap<String, PageMetadata> = phases
        .page_metadata
        .into_iter()
        .map(|meta| (meta.url.clone(), meta))
        .collect();

    let count_kind = |kind: LinkKind| broken_links.iter().filter(|b| b.kind == kind).count();
    let exact_duplicate_groups = phases.duplicates.iter().filter(|g| g.is_exact()).count();

    let summary = Summary {
        total_pages_analyzed: corpus.pages.len(),
        urls_visited: corpus.visited,
        total_broken_links: broken_links.len(),
        broken_internal: count_kind(LinkKind::Internal),
        broken_external: count_kind(LinkKind::External),
        external_errors: count_kind(LinkKind::ExternalError),
        external_links_found: phases.external.external_found,
        external_links_checked: phases.external.checked,
        duplicate_content_issues: phases.duplicates.len(),
        exact_duplicate_groups,
        similar_content_pairs: phases.duplicates.len() - exact_duplicate_groups,
        placeholder_text_instances: phases.placeholders.len(),
        pages_with_accessibility_issues: page_metadata.values().filter(|m| m.has_issues()).count(),
    };

    let recommendations = recommend(&summary, &phases.navigation);

    Report {
        seed_url: corpus.seed.to_string(),
        generated_at,
        cancelled: corpus.cancelled,
        summary,
        information_architecture: phases.navigation,
        duplicate_content: phases.duplicates,
        broken_links,
        placeholder_text: phases.placeholders,
        page_metadata,
        recommendations,
    }
}

/// Applies the recommendation rules. Highest priority first; rule order is
/// kept within a priority.
pub fn recommend(summary: &Summary, navigation: &NavigationSummary) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if navigation.distinct_structures > 1 {
        recommendations.push(Recommendation {
            category: "Navigation".to_string(),
            priority: Priority::High,
            issue: format!(
                "Found {} different navigation structures",
                navigation.distinct_structures
            ),
            recommendation: "Consolidate navigation menus into a single, consistent structure \
                             across all pages".to_string(),
        });
    }

    if summary.duplicate_content_issues > 0 {
        recommendations.push(Recommendation {
            category: "Content".to_string(),
            priority: Priority::High,
            issue: format!(
                "Found {} duplicate or similar content issues",
                summary.duplicate_content_issues
            ),
            recommendation: "Consolidate duplicate pages and redirect old URLs to the \
                             canonical version".to_string(),
        });
    }

    if summary.pages_with_accessibility_issues > 0 {
        recommendations.push(Recommendation {
            category: "Accessibility".to_string(),
            priority: Priority::High,
            issue: format!(
                "{} pages have accessibility issues",
                summary.pages_with_accessibility_issues
            ),
            recommendation: "Fix heading hierarchy, add alt text to images, and ensure \
                             proper semantic HTML".to_string(),
        });
    }

    if summary.total_broken_links > 0 {
        recommendations.push(Recommendation {
            category: "Links".to_string(),
            priority: Priority::Medium,
            issue: format!("Found {} broken links", summary.total_broken_links),
            recommendation: "Update or remove broken links".to_string(),
        });
    }

    if summary.placeholder_text_instances > 0 {
        recommendations.push(Recommendation {
            category: "Content".to_string(),
            priority: Priority::Medium,
            issue: format!(
                "Found {} instances of placeholder text",
                summary.placeholder_text_instances
            ),
            recommendation: "Replace all placeholder text with actual content or remove \
                             placeholders".to_string(),
        });
    }

    recommendations.sort_by_key(|r| r.priority);
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::structure::analyze_html;
    use crate::error::FetchError;
    use url::Url;

    fn corpus() -> Corpus {
        Corpus::new(Url::parse("https://example.com/").unwrap())
    }

    fn timestamp() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-10-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_clean_run_has_no_recommendations() {
        let report = build_report(&corpus(), PhaseOutputs::default(), timestamp());
        assert!(report.recommendations.is_empty());
        assert_eq!(report.summary, Summary::default());
    }

    #[test]
    fn test_broken_links_counted_by_kind() {
        let mut corpus = corpus();
        let url = Url::parse("https://example.com/x").unwrap();
        corpus.broken.push(BrokenLinkRecord::with_status(&url, LinkKind::Internal, 500));

        let external_url = Url::parse("https://other.org/").unwrap();
        let phases = PhaseOutputs {
            external: ExternalCheck {
                external_found: 4,
                checked: 2,
                broken: vec![
                    BrokenLinkRecord::with_status(&external_url, LinkKind::External, 404),
                    BrokenLinkRecord::with_error(
                        &external_url,
                        LinkKind::ExternalError,
                        &FetchError::Timeout,
                    ),
                ],
            },
            ..PhaseOutputs::default()
        };

        let report = build_report(&corpus, phases, timestamp());
        assert_eq!(report.summary.total_broken_links, 3);
        assert_eq!(report.summary.broken_internal, 1);
        assert_eq!(report.summary.broken_external, 1);
        assert_eq!(report.summary.external_errors, 1);
        assert_eq!(report.summary.external_links_found, 4);
        assert_eq!(report.summary.external_links_checked, 2);
        assert_eq!(report.broken_links.len(), 3);
    }

    #[test]
    fn test_recommendations_ordered_by_priority() {
        let summary = Summary {
            total_broken_links: 2,
            placeholder_text_instances: 1,
            duplicate_content_issues: 1,
            pages_with_accessibility_issues: 3,
            ..Summary::default()
        };
        let navigation = NavigationSummary {
            distinct_structures: 2,
            ..NavigationSummary::default()
        };

        let recs = recommend(&summary, &navigation);
        let order: Vec<(&str, Priority)> = recs
            .iter()
            .map(|r| (r.category.as_str(), r.priority))
            .collect();
        assert_eq!(
            order,
            vec![
                ("Navigation", Priority::High),
                ("Content", Priority::High),
                ("Accessibility", Priority::High),
                ("Links", Priority::Medium),
                ("Content", Priority::Medium),
            ]
        );
    }

    #[test]
    fn test_single_navigation_structure_is_fine() {
        let navigation = NavigationSummary {
            distinct_structures: 1,
            ..NavigationSummary::default()
        };
        assert!(recommend(&Summary::default(), &navigation).is_empty());
    }

    #[test]
    fn test_recommendations_are_deterministic() {
        let summary = Summary {
            total_broken_links: 1,
            pages_with_accessibility_issues: 1,
            ..Summary::default()
        };
        let navigation = NavigationSummary::default();
        assert_eq!(recommend(&summary, &navigation), recommend(&summary, &navigation));
    }

    #[test]
    fn test_page_metadata_keyed_by_url_and_counted() {
        let phases = PhaseOutputs {
            page_metadata: vec![
                analyze_html("https://example.com/", "<title>t</title><h1>ok</h1>"),
                analyze_html("https://example.com/b", "<p>no heading</p>"),
            ],
            ..PhaseOutputs::default()
        };
        let report = build_report(&corpus(), phases, timestamp());

        assert_eq!(report.page_metadata.len(), 2);
        // Both lack a meta description; the second also lacks title and H1
        assert_eq!(report.summary.pages_with_accessibility_issues, 2);
        assert!(report.page_metadata["https://example.com/b"].has_issues());
    }

    #[test]
    fn test_report_serializes_as_nested_mapping() {
        let report = build_report(&corpus(), PhaseOutputs::default(), timestamp());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["seed_url"], "https://example.com/");
        assert_eq!(json["generated_at"], "2025-10-01T12:00:00Z");
        assert_eq!(json["summary"]["total_pages_analyzed"], 0);
        assert!(json["recommendations"].as_array().unwrap().is_empty());
    }
}
