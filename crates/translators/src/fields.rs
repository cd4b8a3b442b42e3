// ABOUTME: Label/value field extraction from semi-structured detail markup.
// ABOUTME: Implements the two-cell table strategy, the inline bold-label strategy and compound title decomposition.

//! Field extraction for detail pages.
//!
//! Key behaviors:
//! - Labels are whitespace-normalized and lower-cased; values are normalized.
//! - Entries with an empty label or an empty value are dropped.
//! - Malformed rows or labels contribute nothing; extraction never fails.
//! - Later occurrences of a label overwrite earlier ones.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Node};

use crate::dom::text::{element_text, normalize_whitespace};
use crate::dom::{child_elements, next_meaningful_sibling, select_all};

/// Normalized label → trimmed value, scoped to one detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    fields: HashMap<String, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value unless the label or value is blank.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        if label.trim().is_empty() || value.trim().is_empty() {
            return;
        }
        self.fields.insert(label, value);
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields.get(label).map(String::as_str)
    }

    /// Owned copy of a value, for moving into an item field.
    pub fn string(&self, label: &str) -> Option<String> {
        self.get(label).map(str::to_string)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.fields.contains_key(label)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Reads a table whose rows hold exactly two cells: label, then value.
///
/// `untruncated` is consulted with each normalized label and may return a
/// fuller value found elsewhere in the document; it wins over the cell text.
pub fn parse_label_table<F>(region: ElementRef<'_>, untruncated: F) -> FieldMap
where
    F: Fn(&str) -> Option<String>,
{
    let mut meta = FieldMap::new();
    for row in select_all(region, "tr") {
        let cells = select_all(row, "td");
        if cells.len() != 2 {
            continue;
        }

        let label = element_text(cells[0]).to_lowercase();
        if label.is_empty() {
            continue;
        }
        let value = untruncated(&label).unwrap_or_else(|| element_text(cells[1]));
        meta.insert(label, value);
    }
    meta
}

/// Reads `<b>Label:</b> value` pairs that are direct children of `cell`.
///
/// The value is whatever immediately follows the label: a sibling element
/// (other than `<br>` or another label) or a text node.
pub fn parse_inline_labels(cell: ElementRef<'_>) -> FieldMap {
    let mut meta = FieldMap::new();
    for bold in child_elements(cell).filter(|el| el.value().name() == "b") {
        let Some(label) = inline_label(bold) else {
            continue;
        };

        let value = match next_meaningful_sibling(bold) {
            Some(node) => match node.value() {
                Node::Text(text) => normalize_whitespace(text),
                Node::Element(_) => match ElementRef::wrap(node) {
                    Some(el) if el.value().name() == "br" => continue,
                    Some(el) if el.value().name() == "b" && inline_label(el).is_some() => continue,
                    Some(el) => element_text(el),
                    None => continue,
                },
                _ => continue,
            },
            None => continue,
        };
        meta.insert(label, value);
    }
    meta
}

/// Label text of a bold fragment ending in a colon, lower-cased without the colon.
fn inline_label(bold: ElementRef<'_>) -> Option<String> {
    let text = element_text(bold);
    let label = text.strip_suffix(':')?.trim().to_lowercase();
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}

static TITLE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bTITLE:\s").unwrap());
static COMPOUND_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b([A-Z]+)\s*:\s+").unwrap());
static NEXT_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]+\s*:\s").unwrap());

/// Splits a packed `TITLE: ... CATEGORY: ...` string into its labelled parts.
///
/// Returns `None` unless the text contains a `TITLE:` label. A value runs
/// until the next all-caps label begins; values are trimmed and keys
/// lower-cased.
pub fn parse_compound_title(title: &str) -> Option<FieldMap> {
    if !TITLE_MARKER.is_match(title) {
        return None;
    }

    let mut parts = FieldMap::new();
    let mut pos = 0;
    while let Some(caps) = COMPOUND_LABEL.captures_at(title, pos) {
        let (Some(whole), Some(label)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let start = whole.end();
        let end = value_end(title, start);
        parts.insert(label.as_str().to_lowercase(), title[start..end].trim());
        pos = end;
    }
    Some(parts)
}

/// End of a compound-title value starting at `start`: the first position
/// where another label begins, a line break, or the end of the text.
fn value_end(s: &str, start: usize) -> usize {
    for (offset, ch) in s[start..].char_indices() {
        if ch == '\n' || ch == '\r' {
            return start + offset;
        }
        let next = start + offset + ch.len_utf8();
        if NEXT_LABEL.is_match(&s[next..]) {
            return start + offset;
        }
    }
    s.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::select_first;
    use pretty_assertions::assert_eq;
    use scraper::Html;

    const ITEM_TABLE: &str = r#"
        <div class="detailsTable"><table><tbody>
            <tr><td>Item barcode</td><td> 1339624 </td></tr>
            <tr><td>  Title </td><td>El Alamein   War Memorial Ceremony - 1954</td></tr>
            <tr><td>Location</td><td>Canberra</td></tr>
            <tr><td colspan="2">Spanning row</td></tr>
            <tr><td>Access status</td><td>  </td></tr>
            <tr><td></td><td>orphan value</td></tr>
            <tr><td>Series note</td><td>Truncated...</td></tr>
        </tbody></table></div>
    "#;

    fn tbody(doc: &Html) -> ElementRef<'_> {
        select_first(doc.root_element(), "div.detailsTable tbody").unwrap()
    }

    #[test]
    fn label_table_reads_two_cell_rows() {
        let doc = Html::parse_document(ITEM_TABLE);
        let meta = parse_label_table(tbody(&doc), |_| None);

        assert_eq!(meta.get("item barcode"), Some("1339624"));
        assert_eq!(meta.get("title"), Some("El Alamein War Memorial Ceremony - 1954"));
        assert_eq!(meta.get("location"), Some("Canberra"));
        assert_eq!(meta.get("series note"), Some("Truncated..."));
        assert!(!meta.contains("access status"));
        assert_eq!(meta.len(), 4);
    }

    #[test]
    fn label_table_prefers_untruncated_value() {
        let doc = Html::parse_document(ITEM_TABLE);
        let meta = parse_label_table(tbody(&doc), |label| {
            (label == "series note").then(|| "The full note.".to_string())
        });
        assert_eq!(meta.get("series note"), Some("The full note."));
        assert_eq!(meta.get("location"), Some("Canberra"));
    }

    #[test]
    fn label_table_survives_missing_rows() {
        let without_location = ITEM_TABLE.replace("<tr><td>Location</td><td>Canberra</td></tr>", "");
        let doc = Html::parse_document(&without_location);
        let meta = parse_label_table(tbody(&doc), |_| None);
        assert!(meta.get("location").is_none());
        assert_eq!(meta.get("title"), Some("El Alamein War Memorial Ceremony - 1954"));
        assert_eq!(meta.len(), 3);
    }

    const PHOTO_CELL: &str = r#"
        <table><tr><td id="cell">
            <b>Title:</b> TITLE: Ford V8 lorry CATEGORY: photograph<br>
            <b>Date:</b> 1937<br>
            <b>Location:</b> <a href="../index.html">Sydney</a><br>
            <b>Note</b> not a label<br>
            <b>Empty:</b><br>
            <b>Chained:</b><b>Barcode:</b> 1646857<br>
            <span><b>Nested:</b> ignored</span>
        </td></tr></table>
    "#;

    #[test]
    fn inline_labels_follow_bold_colon_fragments() {
        let doc = Html::parse_document(PHOTO_CELL);
        let cell = select_first(doc.root_element(), "#cell").unwrap();
        let meta = parse_inline_labels(cell);

        assert_eq!(meta.get("title"), Some("TITLE: Ford V8 lorry CATEGORY: photograph"));
        assert_eq!(meta.get("date"), Some("1937"));
        assert_eq!(meta.get("location"), Some("Sydney"));
        assert_eq!(meta.get("barcode"), Some("1646857"));
        assert!(!meta.contains("note"));
        assert!(!meta.contains("empty"));
        assert!(!meta.contains("chained"));
        assert!(!meta.contains("nested"));
        assert_eq!(meta.len(), 4);
    }

    #[test]
    fn compound_title_decomposes() {
        let parts = parse_compound_title(
            "TITLE: Bondi Beach [post office interior] May 1940 CATEGORY: photograph",
        )
        .unwrap();
        assert_eq!(parts.get("title"), Some("Bondi Beach [post office interior] May 1940"));
        assert_eq!(parts.get("category"), Some("photograph"));
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn compound_title_with_many_labels() {
        let parts = parse_compound_title(
            "TITLE: Bondi Beach [post office interior, mail sorter at work] May 1940 \
             CATEGORY: photograph FORMAT: b&w negative QUANTITY: 1 of 4 images \
             TYPE: cellulose acetate STATUS: preservation material",
        )
        .unwrap();
        assert_eq!(
            parts.get("title"),
            Some("Bondi Beach [post office interior, mail sorter at work] May 1940")
        );
        assert_eq!(parts.get("format"), Some("b&w negative"));
        assert_eq!(parts.get("quantity"), Some("1 of 4 images"));
        assert_eq!(parts.get("type"), Some("cellulose acetate"));
        assert_eq!(parts.get("status"), Some("preservation material"));
    }

    #[test]
    fn compound_title_keeps_non_label_capitals() {
        let parts =
            parse_compound_title("TITLE: Ford V8 lorry at GPO Sydney CATEGORY: photograph").unwrap();
        assert_eq!(parts.get("title"), Some("Ford V8 lorry at GPO Sydney"));
    }

    #[test]
    fn compound_title_requires_title_label() {
        assert!(parse_compound_title("Bondi Beach May 1940").is_none());
        assert!(parse_compound_title("SUBTITLE: x").is_none());
        assert!(parse_compound_title("").is_none());
    }
}
