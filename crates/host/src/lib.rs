// ABOUTME: Main library entry point for the Folio host.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, Options, HostError, ErrorCode and the selectors.

//! Folio host - fetches archive pages and runs the citation translators on them.
//!
//! # Example
//!
//! ```no_run
//! use folio_host::{Client, HostError, SelectAll};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), HostError> {
//!     let client = Client::builder().build()?;
//!     let items = client
//!         .translate("http://recordsearch.naa.gov.au/scripts/PhotoSearchItemDetail.asp?B=1646857", &SelectAll)
//!         .await?;
//!     println!("{}", serde_json::to_string_pretty(&items).unwrap());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod options;
pub mod resource;
pub mod selection;

pub use crate::client::Client;
pub use crate::error::{ErrorCode, HostError};
pub use crate::options::{ClientBuilder, Options};
pub use crate::selection::{PromptSelect, SelectAll, SelectItems, SelectNone};
pub use folio_translators::{Item, PageKind};
