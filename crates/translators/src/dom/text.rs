// ABOUTME: Text normalization helpers for scraped DOM content.
// ABOUTME: Collapses whitespace and reads element text the way textContent does.

use scraper::ElementRef;

/// Normalizes whitespace in a string by collapsing runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Concatenated text of all descendant text nodes, unmodified.
pub fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Descendant text with whitespace collapsed and ends trimmed.
pub fn element_text(el: ElementRef<'_>) -> String {
    normalize_whitespace(&raw_text(el))
}

/// Returns `None` for strings that are empty after trimming.
pub fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
