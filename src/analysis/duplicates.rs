// src/analysis/duplicates.rs
// =============================================================================
// Exact and near-duplicate content detection.
//
// Exact: pages are partitioned by fingerprint. Each partition with two or
//        more pages becomes one group. A page is in at most one exact group.
//
// Similar: every unordered pair of pages is scored with word-set Jaccard
//          similarity over the first `window` characters of their text:
//
//              |words(a) ∩ words(b)| / |words(a) ∪ words(b)|
//
//          Words are lowercased whitespace tokens. If either side has no
//          words the score is 0. Pairs scoring strictly above the threshold
//          become a two-page group carrying the score.
//
// The pair loop is O(P²). The crawl's page cap keeps P small; a shingling /
// MinHash sketch would be the replacement for much larger corpora.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use super::normalize::NormalizedContent;

/// Tunables for the similar-content pass.
#[derive(Debug, Clone, Copy)]
pub struct SimilarityOptions {
    pub threshold: f64,
    /// Leading characters of normalized text that are compared.
    pub window: usize,
}

impl Default for SimilarityOptions {
    fn default() -> Self {
        Self {
            threshold: 0.85,
            window: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DuplicateGroup {
    ExactDuplicate {
        pages: Vec<String>,
        content_length: usize,
        /// Suggested page to keep; the others should redirect to it.
        canonical_url: String,
    },
    SimilarContent {
        pages: Vec<String>,
        similarity: f64,
    },
}

impl DuplicateGroup {
    pub fn pages(&self) -> &[String] {
        match self {
            DuplicateGroup::ExactDuplicate { pages, .. } => pages,
            DuplicateGroup::SimilarContent { pages, .. } => pages,
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, DuplicateGroup::ExactDuplicate { .. })
    }
}

/// Runs both passes. Exact groups come first, then similar pairs.
pub fn detect_duplicates(
    contents: &[NormalizedContent],
    options: SimilarityOptions,
) -> Vec<DuplicateGroup> {
    let mut groups = exact_groups(contents);
    groups.extend(similar_pairs(contents, options));
    groups
}

pub fn exact_groups(contents: &[NormalizedContent]) -> Vec<DuplicateGroup> {
    let mut by_fingerprint: BTreeMap<&str, Vec<&NormalizedContent>> = BTreeMap::new();
    for content in contents {
        by_fingerprint
            .entry(content.fingerprint.as_str())
            .or_default()
            .push(content);
    }

    by_fingerprint
        .into_values()
        .filter(|members| members.len() > 1)
        .map(|members| {
            let pages: Vec<String> = members.iter().map(|c| c.url.clone()).collect();
            DuplicateGroup::ExactDuplicate {
                canonical_url: choose_canonical(&pages),
                content_length: members[0].length,
                pages,
            }
        })
        .collect()
}

pub fn similar_pairs(
    contents: &[NormalizedContent],
    options: SimilarityOptions,
) -> Vec<DuplicateGroup> {
    let word_sets: Vec<HashSet<String>> = contents
        .iter()
        .map(|c| word_set(&c.text, options.window))
        .collect();

    let mut groups = Vec::new();

    for i in 0..contents.len() {
        if word_sets[i].is_empty() {
            continue;
        }
        for j in (i + 1)..contents.len() {
            let score = jaccard(&word_sets[i], &word_sets[j]);
            if score > options.threshold {
                groups.push(DuplicateGroup::SimilarContent {
                    pages: vec![contents[i].url.clone(), contents[j].url.clone()],
                    similarity: score,
                });
            }
        }
    }

    groups
}

/// Similarity of two texts over their first `window` characters.
pub fn similarity(a: &str, b: &str, window: usize) -> f64 {
    jaccard(&word_set(a, window), &word_set(b, window))
}

fn word_set(text: &str, window: usize) -> HashSet<String> {
    let prefix: String = text.chars().take(window).collect();
    prefix.split_whitespace().map(str::to_lowercase).collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f64 / union as f64
}

// Short URLs without a query string win; a trailing slash and the absence of
// "index" are small bonuses. Ties go to the lexicographically smallest URL.
fn choose_canonical(urls: &[String]) -> String {
    fn score(url: &str) -> i64 {
        let mut score = -(url.len() as i64);
        if !url.contains('?') {
            score += 50;
        }
        if url.ends_with('/') {
            score += 10;
        }
        if !url.to_lowercase().contains("index") {
            score += 5;
        }
        score
    }

    urls.iter()
        .min_by(|a, b| score(b).cmp(&score(a)).then_with(|| a.cmp(b)))
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(url: &str, text: &str) -> NormalizedContent {
        NormalizedContent::from_html(url, &format!("<p>{}</p>", text))
    }

    #[test]
    fn test_identical_pages_form_one_exact_group() {
        let contents = vec![
            content("https://e.com/a", "same words here"),
            content("https://e.com/b", "same words here"),
            content("https://e.com/c", "different words"),
        ];
        let groups = exact_groups(&contents);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].pages(), ["https://e.com/a", "https://e.com/b"]);
        match &groups[0] {
            DuplicateGroup::ExactDuplicate { content_length, .. } => {
                assert_eq!(*content_length, 15)
            }
            other => panic!("unexpected group {:?}", other),
        }
    }

    #[test]
    fn test_exact_groups_partition_pages() {
        let contents = vec![
            content("https://e.com/1", "alpha"),
            content("https://e.com/2", "beta"),
            content("https://e.com/3", "alpha"),
            content("https://e.com/4", "beta"),
            content("https://e.com/5", "alpha"),
        ];
        let groups = exact_groups(&contents);
        assert_eq!(groups.len(), 2);

        let mut seen = HashSet::new();
        for group in &groups {
            for page in group.pages() {
                assert!(seen.insert(page.clone()), "{} in two exact groups", page);
            }
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_empty_pages_group_exactly_but_never_similar() {
        let contents = vec![content("https://e.com/a", ""), content("https://e.com/b", "")];
        assert_eq!(exact_groups(&contents).len(), 1);
        assert!(similar_pairs(&contents, SimilarityOptions::default()).is_empty());
    }

    #[test]
    fn test_disjoint_words_score_zero() {
        assert_eq!(similarity("red green blue", "cat dog bird", 500), 0.0);
    }

    #[test]
    fn test_similarity_is_symmetric() {
        let a = "the quick brown fox jumps";
        let b = "the lazy brown dog sleeps all day";
        assert_eq!(similarity(a, b, 500), similarity(b, a, 500));
    }

    #[test]
    fn test_similarity_ignores_case() {
        assert_eq!(similarity("Ocean Research", "ocean research", 500), 1.0);
    }

    #[test]
    fn test_only_window_is_compared() {
        let a = "shared prefix words tail alpha";
        let b = "shared prefix words tail omega";
        // "shared prefix words" is 19 characters
        assert_eq!(similarity(a, b, 19), 1.0);
        assert!(similarity(a, b, 500) < 1.0);
    }

    #[test]
    fn test_long_shared_prefix_is_similar() {
        let intro = "Welcome to NARA. The National Aquatic Resources Research and Development Agency \
                     carries out research on marine and inland aquatic resources, fisheries, \
                     oceanography, hydrography and coastal environments. Our divisions study \
                     ocean currents, water quality, fish stocks, and sustainable aquaculture so \
                     that policy makers and communities can manage these resources wisely for \
                     future generations. Explore our publications, datasets, and research vessels. \
                     Visit the library, attend public lectures, or contact a scientist today. ";
        assert!(intro.len() >= 500);

        let contents = vec![
            content("https://e.com/one", &format!("{} First page ends about buoys.", intro)),
            content("https://e.com/two", &format!("{} Second page talks about tides.", intro)),
        ];
        let groups = similar_pairs(&contents, SimilarityOptions::default());

        assert_eq!(groups.len(), 1);
        match &groups[0] {
            DuplicateGroup::SimilarContent { pages, similarity } => {
                assert_eq!(pages, &["https://e.com/one", "https://e.com/two"]);
                assert!(*similarity >= 0.85);
            }
            other => panic!("unexpected group {:?}", other),
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        // {a b c} vs {a b d}: 2 / 4 = 0.5
        let contents = vec![
            content("https://e.com/1", "a b c"),
            content("https://e.com/2", "a b d"),
        ];
        let at = SimilarityOptions { threshold: 0.5, window: 500 };
        let below = SimilarityOptions { threshold: 0.49, window: 500 };
        assert!(similar_pairs(&contents, at).is_empty());
        assert_eq!(similar_pairs(&contents, below).len(), 1);
    }

    #[test]
    fn test_canonical_prefers_short_clean_urls() {
        let urls = vec![
            "https://e.com/about/index.html".to_string(),
            "https://e.com/about/".to_string(),
            "https://e.com/about/?ref=nav".to_string(),
        ];
        assert_eq!(choose_canonical(&urls), "https://e.com/about/");
    }

    #[test]
    fn test_exact_duplicates_serialize_with_type_tag() {
        let groups = exact_groups(&[
            content("https://e.com/a", "x"),
            content("https://e.com/b", "x"),
        ]);
        let json = serde_json::to_value(&groups[0]).unwrap();
        assert_eq!(json["type"], "exact_duplicate");
        assert_eq!(json["canonical_url"], "https://e.com/a");
    }
}
