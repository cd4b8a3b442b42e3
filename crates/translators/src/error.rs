// ABOUTME: Error types for translator operations.
// ABOUTME: Provides TranslateError with InvalidUrl and UnknownPageType variants.

use std::fmt;
use thiserror::Error;

/// Errors a translator can raise while scraping a single page.
///
/// A page that simply does not match any known layout is not an error; the
/// translator returns `None` instead. These variants signal defects that must
/// abort the invocation rather than emit a partial record.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// The page URL could not be parsed.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The URL matched a detail pattern but not a known sub-kind.
    #[error("unknown page type: {0}")]
    UnknownPageType(String),
}

impl TranslateError {
    /// Creates an InvalidUrl error from an underlying parse error.
    pub fn invalid_url(url: impl Into<String>, reason: impl fmt::Display) -> Self {
        TranslateError::InvalidUrl {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates an UnknownPageType error for the given sub-kind tag.
    pub fn unknown_page_type(tag: impl Into<String>) -> Self {
        TranslateError::UnknownPageType(tag.into())
    }

    /// Returns true if this is an UnknownPageType error.
    pub fn is_unknown_page_type(&self) -> bool {
        matches!(self, TranslateError::UnknownPageType(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unknown_page_type() {
        let err = TranslateError::unknown_page_type("FooDetail");
        assert_eq!(err.to_string(), "unknown page type: FooDetail");
        assert!(err.is_unknown_page_type());
    }

    #[test]
    fn display_invalid_url() {
        let err = TranslateError::invalid_url("nope", "relative URL without a base");
        assert_eq!(
            err.to_string(),
            "invalid URL nope: relative URL without a base"
        );
        assert!(!err.is_unknown_page_type());
    }
}
