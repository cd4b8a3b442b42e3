// ABOUTME: Scraper for the NAA digital copy viewer (ViewImage.aspx).
// ABOUTME: Derives pagination from hidden inputs and attaches one JPEG per folio.

use scraper::ElementRef;

use super::endpoint;
use crate::dom::{first_attr, first_text, is_rendered, select_first};
use crate::item::{Attachment, Item, ItemType};
use crate::page::Page;

/// Aggregate views with more folios than this get no image attachments.
pub const MAX_FOLIO_ATTACHMENTS: u32 = 10;

/// Where the viewer is within a digitised item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    /// True when one folio is shown; false for the thumbnail overview.
    pub single_view: bool,
    /// Current folio, 1-based.
    pub page: Option<u32>,
    /// Number of folios in the item.
    pub total: Option<u32>,
}

impl Pagination {
    pub fn new(single_view: bool, page: Option<u32>, total: Option<u32>) -> Self {
        Self {
            single_view,
            page,
            total,
        }
    }

    /// Reads the viewer state from the page.
    pub fn from_page(page: &Page) -> Self {
        let root = page.html().root_element();
        let single_view = select_first(root, "#divImage").is_some_and(is_rendered);
        Self::new(
            single_view,
            hidden_number(root, "hCurrentPage"),
            hidden_number(root, "hTotalPages"),
        )
    }

    /// Suffix appended to the item title, e.g. ` [4 of 7]`.
    pub fn title_suffix(&self) -> String {
        match (self.single_view, self.page, self.total) {
            (true, Some(_), Some(1)) => String::new(),
            (true, Some(page), Some(total)) => format!(" [{} of {}]", page, total),
            (true, Some(page), None) => format!(" [{}]", page),
            _ => String::new(),
        }
    }

    /// Folio indices to attach: the current folio in single view, every
    /// folio in the overview when there are at most ten.
    pub fn folios(&self) -> Vec<u32> {
        if self.single_view {
            return self.page.into_iter().collect();
        }
        match self.total {
            Some(total) if total <= MAX_FOLIO_ATTACHMENTS => (1..=total).collect(),
            _ => vec![],
        }
    }

    /// Label for folio `index`, without the archive location.
    pub fn folio_label(&self, index: u32) -> String {
        match self.total {
            Some(1) => "Folio".to_string(),
            Some(total) => format!("Folio {} of {}", index, total),
            None => format!("Folio {}", index),
        }
    }
}

/// Leading integer of a hidden input's value; zero counts as absent.
fn hidden_number(root: ElementRef<'_>, name: &str) -> Option<u32> {
    let value = first_attr(root, &format!("input[name='{}']", name), "value")?;
    let digits: String = value.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}

fn label_field(root: ElementRef<'_>, name: &str) -> Option<String> {
    first_text(root, &format!("#lbl{}", name))
}

pub(super) fn scrape_image(page: &Page) -> Item {
    let root = page.html().root_element();
    let pagination = Pagination::from_page(page);

    let title = label_field(root, "Title").unwrap_or_default() + &pagination.title_suffix();

    let archive_location = [label_field(root, "Series"), label_field(root, "ControlSymbol")]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ");
    let barcode = label_field(root, "Barcode");

    let url = barcode.as_deref().and_then(|barcode| {
        let current = pagination.page.filter(|_| pagination.single_view).map(|p| p.to_string());
        let mut query = vec![("B", barcode)];
        if let Some(current) = current.as_deref() {
            query.push(("S", current));
        }
        endpoint(page, "/SearchNRetrieve/Interface/ViewImage.aspx", &query)
    });

    let attachments = match barcode.as_deref() {
        Some(barcode) => pagination
            .folios()
            .into_iter()
            .filter_map(|index| {
                let folio = index.to_string();
                let image = endpoint(
                    page,
                    "/SearchNRetrieve/NAAMedia/ShowImage.aspx",
                    &[("T", "P"), ("B", barcode), ("S", folio.as_str())],
                )?;
                let label = format!("{} [{}]", pagination.folio_label(index), archive_location);
                Some(Attachment::file(label, image, "image/jpeg"))
            })
            .collect(),
        None => vec![],
    };

    Item {
        title,
        date: label_field(root, "ContentsDate"),
        archive_location: Some(archive_location).filter(|l| !l.is_empty()),
        url,
        attachments,
        ..Item::new(ItemType::Manuscript)
    }
}
