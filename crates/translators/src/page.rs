// ABOUTME: Page pairs a parsed HTML document with its canonical URL.
// ABOUTME: Also defines PageKind, the host-facing result of detection.

use scraper::Html;
use url::Url;

use crate::error::TranslateError;
use crate::item::ItemType;

/// What a translator detected on a page.
///
/// Unsupported pages are represented by `None` at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// A listing with at least one candidate record.
    Multiple,
    /// A detail page describing exactly one record of the given type.
    Single(ItemType),
}

impl PageKind {
    pub fn is_multiple(&self) -> bool {
        matches!(self, PageKind::Multiple)
    }
}

/// A fetched, parsed document handed to a translator. Read-only.
pub struct Page {
    url: Url,
    html: Html,
}

impl Page {
    /// Wraps an already-parsed document.
    pub fn new(url: Url, html: Html) -> Self {
        Self { url, html }
    }

    /// Parses raw HTML for the given URL.
    pub fn parse(url: &str, html: &str) -> Result<Self, TranslateError> {
        let url = Url::parse(url).map_err(|e| TranslateError::invalid_url(url, e))?;
        Ok(Self::new(url, Html::parse_document(html)))
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Resolves a possibly relative link against the page URL, the way a
    /// browser computes an anchor's `href` property.
    pub fn resolve(&self, href: &str) -> Option<Url> {
        self.url.join(href.trim()).ok()
    }

    /// Scheme, host and port of the page, without a trailing slash.
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_relative_url() {
        let err = Page::parse("/scripts/ItemDetail.asp", "<html></html>")
            .err()
            .expect("relative URL must fail");
        assert!(matches!(err, TranslateError::InvalidUrl { .. }));
    }

    #[test]
    fn resolve_relative_href() {
        let page = Page::parse(
            "http://recordsearch.naa.gov.au/scripts/PhotoSearchSearchResults.asp?O=PSI",
            "<html></html>",
        )
        .unwrap();
        let resolved = page.resolve("PhotoSearchItemDetail.asp?B=1646857").unwrap();
        assert_eq!(
            resolved.as_str(),
            "http://recordsearch.naa.gov.au/scripts/PhotoSearchItemDetail.asp?B=1646857"
        );
        assert_eq!(page.origin(), "http://recordsearch.naa.gov.au");
    }

    #[test]
    fn page_kind_multiple() {
        assert!(PageKind::Multiple.is_multiple());
        assert!(!PageKind::Single(ItemType::Book).is_multiple());
    }
}
