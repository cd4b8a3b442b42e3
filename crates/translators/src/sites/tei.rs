// ABOUTME: Translator for the TEI P5 Guidelines published on tei-c.org.
// ABOUTME: The guidelines index is a book; every other page is a section of it.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

use crate::classify::UrlTable;
use crate::dates::{strip_ordinals, to_iso_date};
use crate::dom::text::element_text;
use crate::dom::{first_attr, first_text, select_all, select_first};
use crate::error::TranslateError;
use crate::item::{Attachment, Creator, CreatorType, Item, ItemType};
use crate::page::{Page, PageKind};
use crate::translator::Translator;

pub const CATALOG: &str = "TEI Guidelines";
pub const PUBLISHER: &str = "TEI Consortium";
pub const GUIDELINES_TITLE: &str = "TEI P5: Guidelines for Electronic Text Encoding and Interchange";

static TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://(www\.)?tei-c\.org/.+/doc/tei-p5-doc/").unwrap());

static PAGES: Lazy<UrlTable<ItemType>> = Lazy::new(|| {
    UrlTable::new().rule(Regex::new(r"index\.html$").unwrap(), ItemType::Book)
});

static VERSION: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\d+\.\d+$").unwrap());

/// Book for the index, section for anything else.
pub fn classify(url: &str) -> ItemType {
    PAGES
        .classify(url)
        .map(|found| found.tag)
        .unwrap_or(ItemType::BookSection)
}

/// Release number printed in the footer, e.g. `4.7.0`.
fn edition(footer: ElementRef<'_>) -> Option<String> {
    select_all(footer, "address a")
        .into_iter()
        .map(element_text)
        .find(|text| VERSION.is_match(text))
}

/// Footer date such as "16th November 2023", as ISO.
fn revision_date(footer: ElementRef<'_>) -> Option<String> {
    let raw = first_text(footer, "address > span.date")?;
    to_iso_date(&strip_ordinals(&raw))
}

/// Last token of the Dublin Core language meta, e.g. `en`.
fn language(root: ElementRef<'_>) -> Option<String> {
    let content = first_attr(root, "meta[name='DC.Language']", "content")?;
    content.split_whitespace().last().map(str::to_string)
}

/// Permanent copy of a `/release/` page in the versioned vault.
pub fn vault_url(url: &str, edition: &str) -> Option<String> {
    if !url.contains("/release/") {
        return None;
    }
    Some(url.replacen("/release/", &format!("/Vault/P5/{}/", edition), 1))
}

fn section_title(root: ElementRef<'_>) -> Option<String> {
    first_text(root, ".main-content > h2").or_else(|| first_text(root, ".main-content h3.oddSpec"))
}

/// Translator for the TEI P5 Guidelines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TeiGuidelines;

impl TeiGuidelines {
    pub fn new() -> Self {
        Self
    }
}

impl Translator for TeiGuidelines {
    fn label(&self) -> &'static str {
        CATALOG
    }

    fn target(&self) -> &Regex {
        &TARGET
    }

    fn selectors(&self) -> &'static [&'static str] {
        &[
            ".stdfooter",
            "address a",
            "address > span.date",
            "meta[name='DC.Language']",
            ".main-content > h2",
            ".main-content h3.oddSpec",
        ]
    }

    fn detect(&self, page: &Page) -> Option<PageKind> {
        if !self.matches(page.url().as_str()) {
            return None;
        }
        Some(PageKind::Single(classify(page.url().as_str())))
    }

    fn scrape(&self, page: &Page) -> Result<Option<Item>, TranslateError> {
        let url = page.url().as_str();
        let item_type = classify(url);
        let root = page.html().root_element();

        let Some(footer) = select_first(root, ".stdfooter") else {
            tracing::debug!(url, "no footer, no record");
            return Ok(None);
        };
        let release = edition(footer);
        if release.is_none() {
            tracing::debug!(url, "footer carries no release number");
        }

        let mut item = Item::new(item_type);
        match item_type {
            ItemType::Book => item.title = GUIDELINES_TITLE.to_string(),
            _ => {
                item.title = section_title(root).unwrap_or_default();
                item.book_title = Some(GUIDELINES_TITLE.to_string());
            }
        }
        item.date = revision_date(footer);
        item.language = language(root);
        item.publisher = Some(PUBLISHER.to_string());
        item.library_catalog = Some(CATALOG.to_string());
        item.creators.push(Creator::institutional(PUBLISHER, CreatorType::Editor));
        item.attachments.push(Attachment::page_snapshot("Snapshot"));

        if let Some(edition) = release.as_deref() {
            if let Some(vault) = vault_url(url, edition) {
                item.attachments.push(Attachment::link(
                    format!("TEI Guidelines version {} (Vault)", edition),
                    vault.clone(),
                ));
                item.extra = Some(vault);
            }
        }
        item.edition = release;

        Ok(Some(item.complete(url)))
    }
}
