// src/checker/html.rs
// =============================================================================
// Extracts links from HTML pages.
//
// - <a href> and <link href> are both collected (stylesheets, canonical and
//   alternate links are worth checking too)
// - Relative hrefs are resolved against the page URL (RFC 3986, via Url::join)
// - Only http/https results are kept; mailto:, tel:, javascript:, data: and
//   pure "#fragment" hrefs are skipped
// - Fragments are stripped so "/docs#intro" and "/docs" are the same page
//
// Malformed hrefs are skipped; they never fail the page.
// =============================================================================

use scraper::{Html, Selector};
use std::sync::OnceLock;
use url::Url;

fn link_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("a[href], link[href]").expect("valid selector"))
}

/// Returns every absolute http(s) URL referenced by the page, in document
/// order. Duplicates are kept; each one is a separate edge in the link graph.
pub fn extract_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    extract_document_links(&document, page_url)
}

/// Same as `extract_links` for an already parsed document.
pub fn extract_document_links(document: &Html, page_url: &Url) -> Vec<Url> {
    document
        .select(link_selector())
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_url(page_url, href))
        .collect()
}

/// Canonical key for a URL: scheme, host, port, path and query. The fragment
/// is dropped.
pub fn normalize_url(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized
}

// Resolves a possibly-relative href. None for skipped schemes and for hrefs
// the URL parser rejects.
fn resolve_url(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let resolved = base.join(href).ok()?;

    if is_checkable_link(&resolved) {
        Some(normalize_url(&resolved))
    } else {
        None
    }
}

fn is_checkable_link(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(url: &str) -> Url {
        Url::parse(url).unwrap()
    }

    fn strings(links: Vec<Url>) -> Vec<String> {
        links.into_iter().map(|u| u.to_string()).collect()
    }

    #[test]
    fn test_extract_absolute_link() {
        let html = r#"<a href="https://www.rust-lang.org">Rust</a>"#;
        let links = extract_links(html, &base("https://example.com"));
        assert_eq!(strings(links), vec!["https://www.rust-lang.org/"]);
    }

    #[test]
    fn test_resolve_relative_link() {
        let html = r#"<a href="/docs">Docs</a>"#;
        let links = extract_links(html, &base("https://example.com/page"));
        assert_eq!(strings(links), vec!["https://example.com/docs"]);
    }

    #[test]
    fn test_resolve_dot_segments_and_scheme_relative() {
        let html = r#"
            <a href="../about">About</a>
            <a href="//cdn.example.net/lib.js">CDN</a>
        "#;
        let links = extract_links(html, &base("https://example.com/a/b/page"));
        assert_eq!(
            strings(links),
            vec!["https://example.com/a/about", "https://cdn.example.net/lib.js"]
        );
    }

    #[test]
    fn test_link_elements_are_collected() {
        let html = r#"
            <head><link rel="stylesheet" href="/style.css"></head>
            <body><a href="/home">Home</a></body>
        "#;
        let links = extract_links(html, &base("https://example.com/"));
        assert_eq!(
            strings(links),
            vec!["https://example.com/style.css", "https://example.com/home"]
        );
    }

    #[test]
    fn test_skip_non_http_schemes_and_fragments() {
        let html = r##"
            <a href="mailto:test@example.com">Email</a>
            <a href="tel:+123">Call</a>
            <a href="javascript:void(0)">JS</a>
            <a href="#top">Top</a>
            <a href="">Empty</a>
        "##;
        let links = extract_links(html, &base("https://example.com"));
        assert!(links.is_empty());
    }

    #[test]
    fn test_fragment_is_stripped() {
        let html = r#"<a href="/docs#install">Install</a>"#;
        let links = extract_links(html, &base("https://example.com"));
        assert_eq!(strings(links), vec!["https://example.com/docs"]);
    }

    #[test]
    fn test_malformed_href_is_skipped() {
        let html = r#"
            <a href="http://[broken">Bad</a>
            <a href="/ok">Ok</a>
        "#;
        let links = extract_links(html, &base("https://example.com"));
        assert_eq!(strings(links), vec!["https://example.com/ok"]);
    }
}
