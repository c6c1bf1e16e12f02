// src/analysis/structure.rs
// =============================================================================
// Per-page structure and accessibility audit.
//
// For each page we record:
// - <title> text and the meta description (missing ones are issues)
// - every heading, grouped by level h1..h6
// - H1 policy: none -> "No H1 heading", several -> issue with the count
// - heading sequence: a heading more than one level deeper than the heading
//   before it (h2 followed by h4) is an issue
// - whether any semantic element (main, article, section, nav, header,
//   footer, aside) is present
// - images without a non-empty alt attribute
//
// Read-only: the page is never rewritten here.
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::sync::OnceLock;

use crate::crawl::Page;

const SEMANTIC_TAGS: &str = "main, article, section, nav, header, footer, aside";

fn select(cell: &'static OnceLock<Selector>, css: &str) -> &'static Selector {
    cell.get_or_init(|| Selector::parse(css).expect("valid selector"))
}

fn title_selector() -> &'static Selector {
    static CELL: OnceLock<Selector> = OnceLock::new();
    select(&CELL, "title")
}

fn meta_selector() -> &'static Selector {
    static CELL: OnceLock<Selector> = OnceLock::new();
    select(&CELL, "meta[name]")
}

fn heading_selector() -> &'static Selector {
    static CELL: OnceLock<Selector> = OnceLock::new();
    select(&CELL, "h1, h2, h3, h4, h5, h6")
}

fn semantic_selector() -> &'static Selector {
    static CELL: OnceLock<Selector> = OnceLock::new();
    select(&CELL, SEMANTIC_TAGS)
}

fn image_selector() -> &'static Selector {
    static CELL: OnceLock<Selector> = OnceLock::new();
    select(&CELL, "img")
}

/// Heading texts grouped by level, each list in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

impl Headings {
    /// Headings at `level` (1-6). Empty for any other level.
    pub fn level(&self, level: u8) -> &[String] {
        match level {
            1 => &self.h1,
            2 => &self.h2,
            3 => &self.h3,
            4 => &self.h4,
            5 => &self.h5,
            6 => &self.h6,
            _ => &[],
        }
    }

    fn push(&mut self, level: u8, text: String) {
        let bucket = match level {
            1 => &mut self.h1,
            2 => &mut self.h2,
            3 => &mut self.h3,
            4 => &mut self.h4,
            5 => &mut self.h5,
            _ => &mut self.h6,
        };
        bucket.push(text);
    }
}

/// A heading that jumps more than one level below its predecessor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingJump {
    pub from: u8,
    pub to: u8,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageMetadata {
    pub url: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub headings: Headings,
    pub h1_count: usize,
    pub heading_jumps: Vec<HeadingJump>,
    pub has_semantic_html: bool,
    pub images_total: usize,
    pub images_without_alt: usize,
    pub accessibility_issues: Vec<String>,
}

impl PageMetadata {
    pub fn has_issues(&self) -> bool {
        !self.accessibility_issues.is_empty()
    }
}

pub fn analyze_page(page: &Page) -> PageMetadata {
    analyze_html(page.url.as_str(), &page.html)
}

pub fn analyze_html(url: &str, html: &str) -> PageMetadata {
    let document = Html::parse_document(html);
    analyze_document(url, &document)
}

pub fn analyze_document(url: &str, document: &Html) -> PageMetadata {
    let mut issues = Vec::new();

    let title = document
        .select(title_selector())
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty());
    if title.is_none() {
        issues.push("Missing <title> tag".to_string());
    }

    let meta_description = document
        .select(meta_selector())
        .find(|el| {
            el.value()
                .attr("name")
                .is_some_and(|name| name.trim().eq_ignore_ascii_case("description"))
        })
        .and_then(|el| el.value().attr("content"))
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty());
    if meta_description.is_none() {
        issues.push("Missing meta description".to_string());
    }

    let mut headings = Headings::default();
    let mut heading_jumps = Vec::new();
    let mut previous: Option<u8> = None;

    for element in document.select(heading_selector()) {
        let Some(level) = heading_level(element) else {
            continue;
        };
        let text = element_text(element);

        if let Some(prev) = previous {
            if level > prev + 1 {
                heading_jumps.push(HeadingJump {
                    from: prev,
                    to: level,
                    text: text.clone(),
                });
            }
        }

        headings.push(level, text);
        previous = Some(level);
    }

    let h1_count = headings.h1.len();
    match h1_count {
        0 => issues.push("No H1 heading".to_string()),
        1 => {}
        n => issues.push(format!("Multiple H1 headings ({})", n)),
    }

    for jump in &heading_jumps {
        issues.push(format!(
            "Skipped heading level: H{} -> H{} (\"{}\")",
            jump.from, jump.to, jump.text
        ));
    }

    let has_semantic_html = document.select(semantic_selector()).next().is_some();

    let images: Vec<ElementRef> = document.select(image_selector()).collect();
    let images_without_alt = images
        .iter()
        .filter(|img| {
            img.value()
                .attr("alt")
                .map_or(true, |alt| alt.trim().is_empty())
        })
        .count();
    if images_without_alt > 0 {
        issues.push(format!("{} images without alt text", images_without_alt));
    }

    PageMetadata {
        url: url.to_string(),
        title,
        meta_description,
        headings,
        h1_count,
        heading_jumps,
        has_semantic_html,
        images_total: images.len(),
        images_without_alt,
        accessibility_issues: issues,
    }
}

fn heading_level(element: ElementRef<'_>) -> Option<u8> {
    match element.value().name() {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
