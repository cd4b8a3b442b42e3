// ABOUTME: Scraper for PhotoSearch item detail pages.
// ABOUTME: Reads inline bold labels, unpacks the compound title and attaches the full-size image.

use url::Url;

use super::endpoint;
use crate::dom::{child_elements, select_first};
use crate::fields::{parse_compound_title, parse_inline_labels};
use crate::item::{Attachment, Item, ItemType};
use crate::page::Page;

const DEFAULT_MANUSCRIPT_TYPE: &str = "photograph";

/// Rewrites a thumbnail URL to request the full-size rendition (`T=P`).
pub(super) fn full_size_image(mut src: Url) -> Url {
    let kept: Vec<(String, String)> = src
        .query_pairs()
        .filter(|(key, _)| *key != "T")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    src.query_pairs_mut().clear().extend_pairs(kept).append_pair("T", "P");
    src
}

pub(super) fn scrape_photo(page: &Page) -> Option<Item> {
    let row = select_first(page.html().root_element(), "table#PhotoDetailTable tr")?;
    let cell = child_elements(row).filter(|el| el.value().name() == "td").last()?;
    let meta = parse_inline_labels(cell);

    let mut item = Item::new(ItemType::Manuscript);

    match meta.get("title").and_then(parse_compound_title) {
        Some(parts) => {
            item.title = parts.string("title").or_else(|| meta.string("title")).unwrap_or_default();
            item.manuscript_type = parts.string("category");
            item.medium = parts.string("type");
        }
        None => item.title = meta.string("title").unwrap_or_default(),
    }
    if item.manuscript_type.is_none() {
        item.manuscript_type = Some(DEFAULT_MANUSCRIPT_TYPE.to_string());
    }

    item.date = meta.string("date");
    item.place = meta.string("location");
    item.archive_location = meta.string("image no.");
    item.url = meta
        .get("barcode")
        .and_then(|barcode| endpoint(page, "/scripts/PhotoSearchItemDetail.asp", &[("B", barcode)]));

    item.tags = ["primary subject", "secondary subject"]
        .into_iter()
        .filter_map(|label| meta.string(label))
        .collect();

    let image = select_first(row, "img")
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| page.resolve(src))
        .map(full_size_image);
    if let Some(image) = image {
        let title = format!(
            "Digital image of NAA: {}",
            item.archive_location.as_deref().unwrap_or_default()
        );
        item.attachments.push(Attachment::file(title, image, "image/jpeg"));
    }

    Some(item)
}
