// ABOUTME: Item and series detail scrapers for NAA RecordSearch.
// ABOUTME: Both read the two-cell details table and map labels onto manuscript fields.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

use super::endpoint;
use crate::dom::text::{element_text, non_empty, raw_text};
use crate::dom::{child_elements, select_all, select_first};
use crate::fields::{parse_label_table, FieldMap};
use crate::item::{Attachment, Creator, CreatorType, Item, ItemType};
use crate::page::Page;

static CITATION_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^NAA\s*:\s*").unwrap());

/// Strips the leading "NAA:" from a citation.
pub(super) fn strip_citation_prefix(citation: &str) -> String {
    CITATION_PREFIX.replace(citation, "").into_owned()
}

/// Reads the details table, preferring the untruncated series note.
fn details_table(page: &Page) -> Option<FieldMap> {
    let root = page.html().root_element();
    let tbody = select_first(root, "div.detailsTable tbody")?;
    Some(parse_label_table(tbody, |label| {
        if label == "series note" {
            full_series_note(root)
        } else {
            None
        }
    }))
}

/// The complete series note lives in `#notes` when that block holds exactly
/// a heading and the note body.
fn full_series_note(root: ElementRef<'_>) -> Option<String> {
    let notes = select_first(root, "#notes")?;
    if child_elements(notes).count() != 2 {
        return None;
    }
    let pre = select_first(notes, "pre")?;
    non_empty(raw_text(pre).trim().to_string())
}

fn has_digital_copy(root: ElementRef<'_>) -> bool {
    select_all(root, "div[id*='_pnlDigitalCopy'] > a")
        .into_iter()
        .any(|a| element_text(a) == "View digital copy")
}

pub(super) fn scrape_item(page: &Page) -> Option<Item> {
    let meta = details_table(page)?;
    let root = page.html().root_element();

    let digital_copy = meta
        .get("item barcode")
        .filter(|_| has_digital_copy(root))
        .and_then(|barcode| {
            endpoint(
                page,
                "/SearchNRetrieve/Interface/ViewImage.aspx",
                &[("B", barcode)],
            )
        })
        .map(|url| Attachment::link("Digital copy at National Archives of Australia", url));

    Some(Item {
        title: meta.string("title").unwrap_or_default(),
        date: meta.string("contents date range"),
        place: meta.string("location"),
        medium: meta.string("physical format"),
        archive_location: meta.get("citation").map(strip_citation_prefix),
        notes: meta.string("item notes").into_iter().collect(),
        attachments: digital_copy.into_iter().collect(),
        ..Item::new(ItemType::Manuscript)
    })
}

pub(super) fn scrape_series(page: &Page) -> Option<Item> {
    let meta = details_table(page)?;
    let root = page.html().root_element();

    // Agencies recording into this series
    let creators = select_all(root, "div#provenanceRecording div.linkagesInfo")
        .into_iter()
        .filter_map(|agency| non_empty(element_text(agency)))
        .map(|name| Creator::institutional(name, CreatorType::Author))
        .collect();

    Some(Item {
        title: meta.string("title").unwrap_or_default(),
        date: meta.string("contents dates"),
        medium: meta.string("predominant physical format"),
        abstract_note: meta.string("series note"),
        creators,
        ..Item::new(ItemType::Manuscript)
    })
}
