// src/analysis/normalize.rs
// =============================================================================
// Turns a page's HTML into canonical text plus a fingerprint.
//
// - script, style, nav, header and footer subtrees are dropped
// - comments are ignored
// - every text node is separated by a space, then whitespace runs are
//   collapsed and the ends trimmed
// - fingerprint = SHA-256 of the resulting text, lowercase hex
//
// Identical normalized text always gives an identical fingerprint, which is
// what exact-duplicate grouping relies on.
// =============================================================================

use scraper::{ElementRef, Html};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::crawl::Page;

/// Elements whose contents are not page content.
const NON_CONTENT: &[&str] = &["script", "style", "nav", "header", "footer"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedContent {
    /// URL of the page this was derived from.
    pub url: String,
    pub text: String,
    pub fingerprint: String,
    /// Length of `text` in characters.
    pub length: usize,
}

impl NormalizedContent {
    pub fn from_page(page: &Page) -> Self {
        Self::from_html(page.url.as_str(), &page.html)
    }

    pub fn from_html(url: &str, html: &str) -> Self {
        let text = normalize_text(html);
        Self {
            url: url.to_string(),
            fingerprint: fingerprint(&text),
            length: text.chars().count(),
            text,
        }
    }
}

/// Visible text of the page with non-content elements removed.
pub fn normalize_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut raw = String::new();
    collect_text(document.root_element(), &mut raw);
    collapse_whitespace(&raw)
}

pub fn fingerprint(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !NON_CONTENT.contains(&child_element.value().name()) {
                collect_text(child_element, out);
            }
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
