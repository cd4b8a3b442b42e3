// ABOUTME: Translator for the National Archives of Australia RecordSearch and PhotoSearch systems.
// ABOUTME: Classifies listing and detail URLs and dispatches detail pages to the per-layout scrapers.

//! National Archives of Australia.
//!
//! Listing pages (series and item search results, PhotoSearch results) yield a
//! [`ResultSet`]; detail pages (item, series, photo record, image viewer) yield
//! one manuscript record each.

mod image;
mod listing;
mod photo;
mod records;

use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::classify::UrlTable;
use crate::error::TranslateError;
use crate::item::{Item, ItemType};
use crate::listing::ResultSet;
use crate::page::{Page, PageKind};
use crate::translator::Translator;

pub use image::Pagination;

/// Archive name recorded on every item.
pub const ARCHIVE: &str = "National Archives of Australia";

static TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://recordsearch\.naa\.gov\.au/").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Listing,
    Detail,
}

/// Listing and detail patterns are disjoint; listings are checked first.
static PAGES: Lazy<UrlTable<Section>> = Lazy::new(|| {
    UrlTable::new()
        .rule(
            Regex::new(r"(?i)/(SeriesListing|ItemsListing|PhotoSearchSearchResults)\.asp").unwrap(),
            Section::Listing,
        )
        .rule(
            Regex::new(r"(?i)/(SeriesDetail|ItemDetail|PhotoSearchItemDetail|ViewImage)\.asp")
                .unwrap(),
            Section::Detail,
        )
});

/// Search result layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingPage {
    SeriesListing,
    ItemsListing,
    PhotoSearchResults,
}

impl ListingPage {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "serieslisting" => Some(ListingPage::SeriesListing),
            "itemslisting" => Some(ListingPage::ItemsListing),
            "photosearchsearchresults" => Some(ListingPage::PhotoSearchResults),
            _ => None,
        }
    }
}

/// Detail page layouts, each with its own field mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordPage {
    ViewImage,
    PhotoDetail,
    SeriesDetail,
    ItemDetail,
}

impl FromStr for RecordPage {
    type Err = TranslateError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.to_ascii_lowercase().as_str() {
            "viewimage" => Ok(RecordPage::ViewImage),
            "photosearchitemdetail" => Ok(RecordPage::PhotoDetail),
            "seriesdetail" => Ok(RecordPage::SeriesDetail),
            "itemdetail" => Ok(RecordPage::ItemDetail),
            _ => Err(TranslateError::unknown_page_type(tag)),
        }
    }
}

/// Which NAA page a URL points at, before looking at the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NaaPage {
    Listing(ListingPage),
    Record(RecordPage),
}

/// Classifies an NAA URL. Unsupported URLs give `Ok(None)`.
pub fn classify(url: &str) -> Result<Option<NaaPage>, TranslateError> {
    let Some(found) = PAGES.classify(url) else {
        return Ok(None);
    };
    let tag = found.capture.unwrap_or_default();
    match found.tag {
        Section::Listing => Ok(ListingPage::from_tag(tag).map(NaaPage::Listing)),
        Section::Detail => RecordPage::from_str(tag).map(|r| Some(NaaPage::Record(r))),
    }
}

/// Builds an absolute NAA endpoint URL with the given query pairs.
fn endpoint(page: &Page, path: &str, query: &[(&str, &str)]) -> Option<String> {
    let mut url: Url = page.resolve(path)?;
    url.set_query(None);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Some(url.into())
}

/// Translator for recordsearch.naa.gov.au.
#[derive(Debug, Default, Clone, Copy)]
pub struct NationalArchivesAustralia;

impl NationalArchivesAustralia {
    pub fn new() -> Self {
        Self
    }
}

impl Translator for NationalArchivesAustralia {
    fn label(&self) -> &'static str {
        ARCHIVE
    }

    fn target(&self) -> &Regex {
        &TARGET
    }

    fn selectors(&self) -> &'static [&'static str] {
        &[
            "table.SearchResults tr",
            "table#PhotoResultTable td.norm",
            "div.detailsTable tbody",
            "div#provenanceRecording div.linkagesInfo",
            "table#PhotoDetailTable tr",
            "#divImage",
        ]
    }

    fn detect(&self, page: &Page) -> Option<PageKind> {
        match classify(page.url().as_str()) {
            Ok(Some(NaaPage::Listing(layout))) => {
                if listing::has_results(page, layout) {
                    Some(PageKind::Multiple)
                } else {
                    tracing::debug!(url = %page.url(), "listing without results");
                    None
                }
            }
            Ok(Some(NaaPage::Record(_))) => Some(PageKind::Single(ItemType::Manuscript)),
            Ok(None) | Err(_) => None,
        }
    }

    fn collect(&self, page: &Page) -> Option<ResultSet> {
        match classify(page.url().as_str()) {
            Ok(Some(NaaPage::Listing(layout))) => listing::search_results(page, layout),
            _ => None,
        }
    }

    fn scrape(&self, page: &Page) -> Result<Option<Item>, TranslateError> {
        let record = match classify(page.url().as_str())? {
            Some(NaaPage::Record(record)) => record,
            _ => return Ok(None),
        };

        let item = match record {
            RecordPage::ViewImage => Some(image::scrape_image(page)),
            RecordPage::PhotoDetail => photo::scrape_photo(page),
            RecordPage::SeriesDetail => records::scrape_series(page),
            RecordPage::ItemDetail => records::scrape_item(page),
        };

        let Some(item) = item else {
            tracing::debug!(url = %page.url(), ?record, "detail region missing, no record");
            return Ok(None);
        };

        let item = Item {
            archive: Some(ARCHIVE.to_string()),
            library_catalog: Some(ARCHIVE.to_string()),
            ..item
        };
        Ok(Some(item.complete(page.url().as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_one_url_per_tag() {
        let cases = [
            (
                "http://recordsearch.naa.gov.au/SearchNRetrieve/Interface/ListingReports/SeriesListing.aspx",
                NaaPage::Listing(ListingPage::SeriesListing),
            ),
            (
                "http://recordsearch.naa.gov.au/SearchNRetrieve/Interface/ListingReports/ItemsListing.aspx",
                NaaPage::Listing(ListingPage::ItemsListing),
            ),
            (
                "http://recordsearch.naa.gov.au/scripts/PhotoSearchSearchResults.asp?O=PSI",
                NaaPage::Listing(ListingPage::PhotoSearchResults),
            ),
            (
                "http://recordsearch.naa.gov.au/SearchNRetrieve/Interface/ViewImage.aspx?B=12048&S=4",
                NaaPage::Record(RecordPage::ViewImage),
            ),
            (
                "http://recordsearch.naa.gov.au/scripts/PhotoSearchItemDetail.asp?B=1646857",
                NaaPage::Record(RecordPage::PhotoDetail),
            ),
            (
                "http://recordsearch.naa.gov.au/SearchNRetrieve/Interface/DetailsReports/SeriesDetail.aspx?series_no=A1",
                NaaPage::Record(RecordPage::SeriesDetail),
            ),
            (
                "http://recordsearch.naa.gov.au/SearchNRetrieve/Interface/DetailsReports/ItemDetail.aspx?Barcode=1339624&isAv=N",
                NaaPage::Record(RecordPage::ItemDetail),
            ),
        ];

        for (url, expected) in cases {
            assert_eq!(classify(url).unwrap(), Some(expected), "{}", url);
        }
    }

    #[test]
    fn classify_is_case_insensitive() {
        assert_eq!(
            classify("http://recordsearch.naa.gov.au/scripts/itemdetail.ASP?B=1").unwrap(),
            Some(NaaPage::Record(RecordPage::ItemDetail))
        );
    }

    #[test]
    fn unsupported_url_is_not_an_error() {
        assert_eq!(
            classify("http://recordsearch.naa.gov.au/SearchNRetrieve/Interface/SearchScreens/BasicSearch.aspx")
                .unwrap(),
            None
        );
    }

    #[test]
    fn unknown_record_tag_is_an_error() {
        let err = RecordPage::from_str("AgencyDetail").unwrap_err();
        assert!(err.is_unknown_page_type());
        assert_eq!(RecordPage::from_str("VIEWIMAGE").unwrap(), RecordPage::ViewImage);
    }

    #[test]
    fn endpoint_builds_absolute_query() {
        let page = Page::parse(
            "http://recordsearch.naa.gov.au/SearchNRetrieve/Interface/DetailsReports/ItemDetail.aspx?Barcode=1",
            "<html></html>",
        )
        .unwrap();
        let url = endpoint(
            &page,
            "/SearchNRetrieve/Interface/ViewImage.aspx",
            &[("B", "8606210")],
        )
        .unwrap();
        assert_eq!(
            url,
            "http://recordsearch.naa.gov.au/SearchNRetrieve/Interface/ViewImage.aspx?B=8606210"
        );
    }
}
