// ABOUTME: Item struct holding one citation record emitted by a translator.
// ABOUTME: Includes creators, attachments and the item type enum, serialized in the host's camelCase schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of bibliographic item a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    #[default]
    Manuscript,
    Book,
    BookSection,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemType::Manuscript => "manuscript",
            ItemType::Book => "book",
            ItemType::BookSection => "bookSection",
        };
        write!(f, "{}", s)
    }
}

/// Role a creator plays for an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CreatorType {
    Author,
    Editor,
}

/// A person or organisation credited on an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creator {
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    pub creator_type: CreatorType,
    /// 1 when the name is a single field (institutions), absent for two-field names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_mode: Option<u8>,
}

impl Creator {
    /// Creates a single-field creator, used for agencies and consortia.
    pub fn institutional(name: impl Into<String>, creator_type: CreatorType) -> Self {
        Self {
            last_name: name.into(),
            first_name: None,
            creator_type,
            field_mode: Some(1),
        }
    }
}

/// A link to a digital surrogate or a snapshot of the page itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Snapshot the document being translated rather than fetching `url`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub document: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<bool>,
}

impl Attachment {
    /// A downloadable file (image, PDF) stored alongside the item.
    pub fn file(title: impl Into<String>, url: impl Into<String>, mime_type: &str) -> Self {
        Self {
            title: title.into(),
            url: Some(url.into()),
            document: false,
            mime_type: Some(mime_type.to_string()),
            snapshot: None,
        }
    }

    /// A web link that is saved as a link only, never downloaded.
    pub fn link(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: Some(url.into()),
            document: false,
            mime_type: Some("text/html".to_string()),
            snapshot: Some(false),
        }
    }

    /// A snapshot of the translated document itself.
    pub fn page_snapshot(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
            document: true,
            mime_type: Some("text/html".to_string()),
            snapshot: None,
        }
    }
}

/// One citation record handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub item_type: ItemType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_catalog: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manuscript_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abstract_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub book_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<String>,
    #[serde(default)]
    pub creators: Vec<Creator>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub see_also: Vec<String>,
}

impl Item {
    /// Creates an empty item of the given type.
    pub fn new(item_type: ItemType) -> Self {
        Self {
            item_type,
            ..Default::default()
        }
    }

    /// Returns true if the item has a non-empty title.
    pub fn has_title(&self) -> bool {
        !self.title.is_empty()
    }

    /// Returns true if the item carries a date.
    pub fn has_date(&self) -> bool {
        self.date.as_ref().is_some_and(|d| !d.is_empty())
    }

    /// Fills the defaults every finished record carries: the page URL when
    /// the scraper set none, and a short title for `Main: subtitle` titles.
    pub fn complete(mut self, page_url: &str) -> Self {
        if self.url.is_none() {
            self.url = Some(page_url.to_string());
        }
        if self.short_title.is_none() {
            self.short_title = short_title(&self.title);
        }
        self
    }
}

/// Title before the first colon, when something follows it.
fn short_title(title: &str) -> Option<String> {
    let (head, rest) = title.split_once(':')?;
    let head = head.trim();
    if head.is_empty() || rest.trim().is_empty() {
        None
    } else {
        Some(head.to_string())
    }
}
