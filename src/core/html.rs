// src/core/html.rs
//! Small helpers over `scraper` for navigating by link text and sibling order.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use url::Url;

fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("bad static selector {css:?}: {e}"))
}

pub static ANCHOR: LazyLock<Selector> = LazyLock::new(|| sel("a"));
pub static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| sel("li"));
pub static INPUT: LazyLock<Selector> = LazyLock::new(|| sel("input"));
pub static SELECT: LazyLock<Selector> = LazyLock::new(|| sel("select"));
pub static OPTION: LazyLock<Selector> = LazyLock::new(|| sel("option"));

/// Text nodes of `el`, each trimmed, empties dropped, joined by one space.
pub fn text_content(el: ElementRef<'_>) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// All `<a>` elements whose text content is exactly `target`, in document order.
pub fn anchors_with_text<'a>(
    doc: &'a Html,
    target: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    doc.select(&ANCHOR).filter(move |a| text_content(*a) == target)
}

/// Element siblings after `el`, skipping text and comments.
pub fn following_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap)
}

/// First element sibling after `el` with tag `name`.
pub fn next_sibling_named<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    following_elements(el).find(|e| e.value().name() == name)
}

/// Closest enclosing element with tag `name`.
pub fn ancestor_named<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == name)
}

/// First element of `scope` whose `name` attribute is `name`.
pub fn find_named<'a>(
    scope: impl IntoIterator<Item = ElementRef<'a>>,
    name: &str,
) -> Option<ElementRef<'a>> {
    scope.into_iter().find(|e| e.value().attr("name") == Some(name))
}

/// Resolve an `href`/`action` against the page it was found on.
pub fn resolve(base: &Url, href: &str) -> Result<Url, url::ParseError> {
    base.join(href.trim())
}
