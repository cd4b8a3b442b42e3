// ABOUTME: Main library entry point for the Folio citation translators.
// ABOUTME: Re-exports Translator, TranslatorRegistry, Page, Item and the built-in site translators.

//! Folio translators turn archive and documentation web pages into citation
//! records.
//!
//! A [`Translator`] classifies a parsed [`Page`], lists candidate records on
//! listing pages and scrapes one [`Item`] from a detail page. Translators never
//! fetch anything themselves; the host does the I/O.
//!
//! # Example
//!
//! ```
//! use folio_translators::{load_builtin_registry, Page, PageKind};
//!
//! let registry = load_builtin_registry();
//! let url = "https://tei-c.org/release/doc/tei-p5-doc/en/html/index.html";
//! let translator = registry.find(url).unwrap();
//! let page = Page::parse(url, "<html></html>").unwrap();
//! assert!(matches!(translator.detect(&page), Some(PageKind::Single(_))));
//! ```

pub mod classify;
pub mod dates;
pub mod dom;
pub mod error;
pub mod fields;
pub mod item;
pub mod listing;
pub mod loader;
pub mod page;
pub mod registry;
pub mod sites;
pub mod translator;

pub use crate::error::TranslateError;
pub use crate::item::{Attachment, Creator, CreatorType, Item, ItemType};
pub use crate::listing::{ResultEntry, ResultSet};
pub use crate::loader::load_builtin_registry;
pub use crate::page::{Page, PageKind};
pub use crate::registry::TranslatorRegistry;
pub use crate::sites::{NationalArchivesAustralia, TeiGuidelines};
pub use crate::translator::Translator;
