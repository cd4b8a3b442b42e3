// ABOUTME: Ordered URL pattern table used by translators to classify pages.
// ABOUTME: Rules are evaluated in insertion order and the first matching pattern wins.

use regex::Regex;

/// A closed-set URL classifier: an ordered list of `(pattern, tag)` rules.
///
/// Each pattern may contain one capture group; its text is returned with the
/// tag so callers can refine the match into a site-specific sub-kind.
#[derive(Debug, Clone)]
pub struct UrlTable<T> {
    rules: Vec<(Regex, T)>,
}

/// A successful classification: the rule's tag and its first capture, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMatch<'u, T> {
    pub tag: T,
    pub capture: Option<&'u str>,
}

impl<T: Copy> UrlTable<T> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Appends a rule. Rules added earlier take precedence.
    pub fn rule(mut self, pattern: Regex, tag: T) -> Self {
        self.rules.push((pattern, tag));
        self
    }

    /// Returns the first rule matching `url`, or `None` for unsupported URLs.
    pub fn classify<'u>(&self, url: &'u str) -> Option<UrlMatch<'u, T>> {
        self.rules.iter().find_map(|(pattern, tag)| {
            pattern.captures(url).map(|caps| UrlMatch {
                tag: *tag,
                capture: caps.get(1).map(|m| m.as_str()),
            })
        })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<T: Copy> Default for UrlTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tag {
        Listing,
        Detail,
        Anything,
    }

    fn table() -> UrlTable<Tag> {
        UrlTable::new()
            .rule(Regex::new(r"(?i)/(\w+)Listing\.asp").unwrap(), Tag::Listing)
            .rule(Regex::new(r"(?i)/(\w+)Detail\.asp").unwrap(), Tag::Detail)
            .rule(Regex::new(r"Listing|Detail").unwrap(), Tag::Anything)
    }

    #[test]
    fn first_match_wins() {
        let t = table();
        let m = t.classify("http://host/scripts/SeriesListing.asp?x=ItemDetail.asp").unwrap();
        assert_eq!(m.tag, Tag::Listing);
        assert_eq!(m.capture, Some("Series"));
    }

    #[test]
    fn later_rules_used_when_earlier_miss() {
        let t = table();
        let m = t.classify("http://host/ItemDetail.aspx?B=1").unwrap();
        assert_eq!(m.tag, Tag::Detail);
        assert_eq!(m.capture, Some("Item"));

        let m = t.classify("http://host/Detail").unwrap();
        assert_eq!(m.tag, Tag::Anything);
        assert_eq!(m.capture, None);
    }

    #[test]
    fn no_match_is_none() {
        let t = table();
        assert!(t.classify("http://host/index.html").is_none());
        assert_eq!(t.len(), 3);
        assert!(UrlTable::<Tag>::default().is_empty());
    }
}
