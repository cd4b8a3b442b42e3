// ABOUTME: DOM query and navigation helpers used by the site translators.
// ABOUTME: Wraps scraper selection with cached selectors and sibling/parent traversal.

//! DOM utilities.
//!
//! Translators treat the document as an untrusted, semi-structured source:
//! every helper here returns `Option` or an empty collection when the expected
//! markup is missing, never panics.

pub mod compiled;
pub mod text;

use ego_tree::NodeRef;
use scraper::{ElementRef, Node};

use crate::dom::compiled::get_or_compile;
use crate::dom::text::{element_text, non_empty};

/// First descendant of `scope` matching `css`.
pub fn select_first<'a>(scope: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = get_or_compile(css)?;
    let found = scope.select(&selector).next();
    found
}

/// All descendants of `scope` matching `css`, in document order.
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    let Some(selector) = get_or_compile(css) else {
        return vec![];
    };
    let matches = scope.select(&selector).collect();
    matches
}

/// Normalized text of the first match, if non-empty.
pub fn first_text(scope: ElementRef<'_>, css: &str) -> Option<String> {
    select_first(scope, css).and_then(|el| non_empty(element_text(el)))
}

/// Trimmed attribute of the first match, if non-empty.
pub fn first_attr(scope: ElementRef<'_>, css: &str, attr: &str) -> Option<String> {
    select_first(scope, css)
        .and_then(|el| el.value().attr(attr))
        .and_then(|v| non_empty(v.trim().to_string()))
}

/// Element children of `el`, skipping text and comment nodes.
pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children().filter_map(ElementRef::wrap)
}

/// Parent element, if the parent is an element (not the document root).
pub fn parent_element<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.parent().and_then(ElementRef::wrap)
}

/// The next sibling that is an element.
pub fn next_element_sibling<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings().find_map(ElementRef::wrap)
}

/// The next sibling node that is an element or non-blank text.
pub fn next_meaningful_sibling<'a>(el: ElementRef<'a>) -> Option<NodeRef<'a, Node>> {
    el.next_siblings().find(|node| match node.value() {
        Node::Element(_) => true,
        Node::Text(text) => !text.trim().is_empty(),
        _ => false,
    })
}

/// Returns true when an element is laid out: neither it nor an ancestor is
/// hidden through the `hidden` attribute or an inline `display: none`.
pub fn is_rendered(el: ElementRef<'_>) -> bool {
    let mut current = Some(el);
    while let Some(node) = current {
        let value = node.value();
        if value.attr("hidden").is_some() {
            return false;
        }
        if let Some(style) = value.attr("style") {
            let compact: String = style
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase();
            if compact.split(';').any(|decl| decl == "display:none") {
                return false;
            }
        }
        current = parent_element(node);
    }
    true
}
