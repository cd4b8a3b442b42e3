// ABOUTME: Site-specific translators shipped with the crate.
// ABOUTME: One submodule per web property.

pub mod naa;
pub mod tei;

pub use naa::NationalArchivesAustralia;
pub use tei::TeiGuidelines;
