// ABOUTME: Search-result extraction for NAA listing pages.
// ABOUTME: Walks RecordSearch result tables and PhotoSearch result cells lazily so probing stops at the first row.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

use super::ListingPage;
use crate::dom::text::element_text;
use crate::dom::{child_elements, next_element_sibling, parent_element, select_first};
use crate::listing::ResultSet;
use crate::page::Page;

static RESULT_ROWS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.SearchResults tr").unwrap());
static PHOTO_CELLS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table#PhotoResultTable td.norm").unwrap());

/// Returns true as soon as one usable result row is found.
pub(super) fn has_results(page: &Page, layout: ListingPage) -> bool {
    rows(page, layout).next().is_some()
}

/// All usable result rows, or `None` when there are none.
pub(super) fn search_results(page: &Page, layout: ListingPage) -> Option<ResultSet> {
    let results: ResultSet = rows(page, layout).collect();
    if results.is_empty() {
        None
    } else {
        Some(results)
    }
}

/// Lazily yields `(absolute url, title)` for each row that has both.
fn rows<'a>(page: &'a Page, layout: ListingPage) -> Box<dyn Iterator<Item = (String, String)> + 'a> {
    let root = page.html().root_element();
    match layout {
        ListingPage::SeriesListing | ListingPage::ItemsListing => {
            if select_first(root, "table.SearchResults").is_none() {
                return Box::new(std::iter::empty());
            }
            Box::new(
                root.select(&RESULT_ROWS)
                    .filter(|row| !is_header_row(*row))
                    .filter_map(move |row| table_row(page, row)),
            )
        }
        ListingPage::PhotoSearchResults => Box::new(
            root.select(&PHOTO_CELLS)
                .filter_map(move |cell| photo_cell(page, cell)),
        ),
    }
}

/// Only rows classed `header` are skipped. Unclassed rows count as data, so
/// tables that drop the per-row class still list their records.
fn is_header_row(row: ElementRef<'_>) -> bool {
    row.value().classes().any(|c| c.eq_ignore_ascii_case("header"))
}

/// A RecordSearch row: a link directly inside a cell, titled by the next cell.
fn table_row(page: &Page, row: ElementRef<'_>) -> Option<(String, String)> {
    let link = child_elements(row)
        .filter(|cell| cell.value().name() == "td")
        .flat_map(child_elements)
        .find(|el| el.value().name() == "a")?;
    let title_cell = parent_element(link).and_then(next_element_sibling)?;
    let href = page.resolve(link.value().attr("href")?)?;
    Some((href.into(), element_text(title_cell)))
}

/// A PhotoSearch cell: the first link, titled by its own text.
fn photo_cell(page: &Page, cell: ElementRef<'_>) -> Option<(String, String)> {
    let link = select_first(cell, "a")?;
    let href = page.resolve(link.value().attr("href")?)?;
    Some((href.into(), element_text(link)))
}
