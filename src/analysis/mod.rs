// src/analysis/mod.rs
// =============================================================================
// Post-crawl analysis phases.
//
// Every phase is a plain function over the finished corpus (or values derived
// from it). None of them touch the network or mutate pages, so each can be
// tested by handing it a few pages built in memory.
//
// Submodules:
// - normalize:    canonical text + fingerprint per page
// - duplicates:   exact and near-duplicate grouping
// - structure:    title/description/headings/semantic tags/alt text audit
// - placeholders: rule-driven placeholder text search
// - navigation:   menus and URL patterns across the site
// =============================================================================

pub mod duplicates;
pub mod navigation;
pub mod normalize;
pub mod placeholders;
pub mod structure;

pub use duplicates::{detect_duplicates, DuplicateGroup, SimilarityOptions};
pub use navigation::{analyze_navigation, NavigationSummary};
pub use normalize::NormalizedContent;
pub use placeholders::{find_placeholders, PlaceholderMatch, PlaceholderRule};
pub use structure::{analyze_page, PageMetadata};
