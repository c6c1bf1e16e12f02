// src/analysis/navigation.rs
// =============================================================================
// Information-architecture overview.
//
// - Every <nav> and <header> on every page is turned into a menu: the ordered
//   list of its links (text + href). Menus without links are ignored.
// - Menus with the same item sequence count as one navigation structure; a
//   site with more than one structure has inconsistent navigation.
// - URL patterns: how many pages live under each first path segment
//   ("/research/..." -> "research"). The site root counts as "/".
// =============================================================================

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

use crate::crawl::Page;

fn container_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("nav, header").expect("valid selector"))
}

fn anchor_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("a").expect("valid selector"))
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MenuItem {
    pub text: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationMenu {
    pub page: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigationSummary {
    pub total_pages: usize,
    pub navigation_menus: Vec<NavigationMenu>,
    pub distinct_structures: usize,
    pub url_patterns: BTreeMap<String, usize>,
}

pub fn analyze_navigation<'a>(pages: impl IntoIterator<Item = &'a Page>) -> NavigationSummary {
    let mut summary = NavigationSummary::default();

    for page in pages {
        summary.total_pages += 1;

        let document = Html::parse_document(&page.html);
        for container in document.select(container_selector()) {
            let items = menu_items(container);
            if !items.is_empty() {
                summary.navigation_menus.push(NavigationMenu {
                    page: page.url.to_string(),
                    items,
                });
            }
        }

        *summary
            .url_patterns
            .entry(first_segment(page.url.path()))
            .or_default() += 1;
    }

    let structures: HashSet<&Vec<MenuItem>> =
        summary.navigation_menus.iter().map(|m| &m.items).collect();
    summary.distinct_structures = structures.len();

    summary
}

fn menu_items(container: ElementRef<'_>) -> Vec<MenuItem> {
    container
        .select(anchor_selector())
        .map(|a| MenuItem {
            text: a
                .text()
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" "),
            href: a.value().attr("href").map(str::to_string),
        })
        .collect()
}

fn first_segment(path: &str) -> String {
    path.split('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("/")
        .to_string()
}
