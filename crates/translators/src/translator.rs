// ABOUTME: The Translator trait implemented by every site-specific scraper.
// ABOUTME: Exposes detect, collect and scrape, the three queries the host drives.

use regex::Regex;

use crate::error::TranslateError;
use crate::item::Item;
use crate::listing::ResultSet;
use crate::page::{Page, PageKind};

/// A stateless, single-pass scraper for one web property.
///
/// The host calls [`detect`](Translator::detect) first. For
/// [`PageKind::Multiple`] it calls [`collect`](Translator::collect), lets the
/// operator choose, fetches each chosen URL and calls
/// [`scrape`](Translator::scrape) on every resulting page. For
/// [`PageKind::Single`] it calls `scrape` directly.
pub trait Translator: Send + Sync {
    /// Human-readable name, also used as the default library catalog.
    fn label(&self) -> &'static str;

    /// Pattern a URL must match for this translator to be considered.
    fn target(&self) -> &Regex;

    /// Higher priorities win when several targets match.
    fn priority(&self) -> u32 {
        100
    }

    /// Selectors this translator queries, used to warm the selector cache.
    fn selectors(&self) -> &'static [&'static str] {
        &[]
    }

    /// Classifies the page, or returns `None` when nothing applies.
    fn detect(&self, page: &Page) -> Option<PageKind>;

    /// Candidate records on a listing page; `None` when there are none.
    fn collect(&self, _page: &Page) -> Option<ResultSet> {
        None
    }

    /// Extracts the record on a detail page.
    ///
    /// Returns `Ok(None)` when the page holds no usable record and an error
    /// only for defects that must not produce a partial record.
    fn scrape(&self, page: &Page) -> Result<Option<Item>, TranslateError>;

    /// Returns true if this translator targets the URL.
    fn matches(&self, url: &str) -> bool {
        self.target().is_match(url)
    }
}
