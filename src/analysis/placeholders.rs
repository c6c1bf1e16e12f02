// src/analysis/placeholders.rs
// =============================================================================
// Finds leftover placeholder text ("lorem ipsum", "coming soon", "[TBD]", ...)
// in normalized page text.
//
// The rules are data, not code: a list of (regex pattern, label) pairs that
// can be replaced from the config file. Matching is case-insensitive. Each hit
// is reported with up to 50 characters of surrounding text.
// =============================================================================

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::normalize::NormalizedContent;
use crate::error::ConfigError;

/// Characters of context kept on each side of a match.
const CONTEXT_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceholderRule {
    pub pattern: String,
    pub label: String,
}

impl PlaceholderRule {
    pub fn new(pattern: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            label: label.into(),
        }
    }
}

pub fn default_rules() -> Vec<PlaceholderRule> {
    [
        (r"lorem\s+ipsum", "lorem ipsum"),
        (r"placeholder", "placeholder"),
        (r"coming\s+soon", "coming soon"),
        (r"under\s+construction", "under construction"),
        (r"\btbd\b", "tbd"),
        (r"to\s+be\s+determined", "to be determined"),
        (r"\[[^\]]*\]", "bracketed text"),
        (r"xxx+", "xxx marker"),
        (r"test\s+content", "test content"),
    ]
    .into_iter()
    .map(|(pattern, label)| PlaceholderRule::new(pattern, label))
    .collect()
}

/// A rule ready to run.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    regex: Regex,
    label: String,
}

pub fn compile_rules(rules: &[PlaceholderRule]) -> Result<Vec<CompiledRule>, ConfigError> {
    rules
        .iter()
        .map(|rule| {
            RegexBuilder::new(&rule.pattern)
                .case_insensitive(true)
                .build()
                .map(|regex| CompiledRule {
                    regex,
                    label: rule.label.clone(),
                })
                .map_err(|source| ConfigError::InvalidRule {
                    pattern: rule.pattern.clone(),
                    source,
                })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderMatch {
    pub page: String,
    pub label: String,
    /// The text the rule matched, as it appears on the page.
    pub placeholder: String,
    pub context: String,
}

/// Scans every page with every rule. Results are grouped by page (input
/// order), and within a page ordered by position in the text.
pub fn find_placeholders(
    contents: &[NormalizedContent],
    rules: &[CompiledRule],
) -> Vec<PlaceholderMatch> {
    let mut found = Vec::new();

    for content in contents {
        let mut page_matches: Vec<(usize, PlaceholderMatch)> = Vec::new();

        for rule in rules {
            for m in rule.regex.find_iter(&content.text) {
                page_matches.push((
                    m.start(),
                    PlaceholderMatch {
                        page: content.url.clone(),
                        label: rule.label.clone(),
                        placeholder: m.as_str().to_string(),
                        context: context_around(&content.text, m.start(), m.end()),
                    },
                ));
            }
        }

        page_matches.sort_by_key(|(start, _)| *start);
        found.extend(page_matches.into_iter().map(|(_, m)| m));
    }

    found
}

// Up to CONTEXT_CHARS characters either side of [start, end), trimmed.
// Offsets are byte offsets from the regex; the window is counted in chars so
// multi-byte text never gets split.
fn context_around(text: &str, start: usize, end: usize) -> String {
    let before: String = {
        let chars: Vec<char> = text[..start].chars().rev().take(CONTEXT_CHARS).collect();
        chars.into_iter().rev().collect()
    };
    let after: String = text[end..].chars().take(CONTEXT_CHARS).collect();

    format!("{}{}{}", before, &text[start..end], after)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> Vec<PlaceholderMatch> {
        let content =
            NormalizedContent::from_html("https://example.com/", &format!("<p>{}</p>", text));
        let rules = compile_rules(&default_rules()).unwrap();
        find_placeholders(&[content], &rules)
    }

    #[test]
    fn test_default_rules_compile() {
        assert_eq!(compile_rules(&default_rules()).unwrap().len(), 9);
    }

    #[test]
    fn test_lorem_ipsum_case_insensitive() {
        let found = scan("Intro. Lorem   Ipsum dolor sit amet.");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label, "lorem ipsum");
        assert_eq!(found[0].placeholder, "Lorem Ipsum");
    }

    #[test]
    fn test_tbd_needs_word_boundary() {
        assert!(scan("The outbdoor event").is_empty());
        assert_eq!(scan("Date: TBD")[0].label, "tbd");
    }

    #[test]
    fn test_matches_ordered_by_position() {
        let found = scan("Coming soon: [insert photo] and more placeholder copy");
        let labels: Vec<&str> = found.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["coming soon", "bracketed text", "placeholder"]);
    }

    #[test]
    fn test_context_is_bounded() {
        let padding = "word ".repeat(40);
        let found = scan(&format!("{}under construction{}", padding, padding));
        let context = &found[0].context;
        assert!(context.contains("under construction"));
        assert!(context.chars().count() <= 50 + "under construction".len() + 50);
    }

    #[test]
    fn test_context_handles_multibyte_text() {
        let found = scan("Página en construcción — coming soon — ñandú");
        assert_eq!(found.len(), 1);
        assert!(found[0].context.starts_with("Página"));
    }

    #[test]
    fn test_custom_rules() {
        let rules =
            compile_rules(&[PlaceholderRule::new(r"content\s+required", "missing copy")]).unwrap();
        let content =
            NormalizedContent::from_html("https://e.com/", "<p>[CONTENT REQUIRED: Mission]</p>");
        let found = find_placeholders(&[content], &rules);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].label, "missing copy");
    }

    #[test]
    fn test_clean_text_has_no_matches() {
        assert!(scan("NARA studies the ocean around Sri Lanka.").is_empty());
    }
}
