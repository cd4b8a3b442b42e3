// ABOUTME: ResultSet, the ordered URL → title mapping produced from listing pages.
// ABOUTME: Backs the operator's multi-select picker; duplicate URLs keep their first position.

use indexmap::IndexMap;
use serde::Serialize;

use crate::dom::text::normalize_whitespace;

/// One candidate record on a listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultEntry {
    pub url: String,
    pub title: String,
}

/// Candidate records keyed by absolute URL, in document order.
///
/// Keys are stored exactly as given; titles are whitespace-normalized. A URL
/// seen twice keeps its original position but takes the later title.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResultSet {
    entries: IndexMap<String, String>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, title: &str) {
        self.entries.insert(url.into(), normalize_whitespace(title));
    }

    pub fn get(&self, url: &str) -> Option<&str> {
        self.entries.get(url).map(String::as_str)
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(url, title)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(u, t)| (u.as_str(), t.as_str()))
    }

    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn into_entries(self) -> Vec<ResultEntry> {
        self.entries
            .into_iter()
            .map(|(url, title)| ResultEntry { url, title })
            .collect()
    }
}

impl<U: Into<String>> FromIterator<(U, String)> for ResultSet {
    fn from_iter<I: IntoIterator<Item = (U, String)>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        for (url, title) in iter {
            set.insert(url, &title);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn insert_normalizes_title_not_url() {
        let mut set = ResultSet::new();
        set.insert("http://host/a?B=1&x= y", "  Some \n title ");
        assert_eq!(set.get("http://host/a?B=1&x= y"), Some("Some title"));
    }

    #[test]
    fn duplicate_titles_under_distinct_urls_are_kept() {
        let set: ResultSet = vec![
            ("http://host/1", "Same".to_string()),
            ("http://host/2", "Same".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn duplicate_url_keeps_position_takes_later_title() {
        let set: ResultSet = vec![
            ("http://host/1", "First".to_string()),
            ("http://host/2", "Second".to_string()),
            ("http://host/1", "Again".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            set.into_entries(),
            vec![
                ResultEntry { url: "http://host/1".into(), title: "Again".into() },
                ResultEntry { url: "http://host/2".into(), title: "Second".into() },
            ]
        );
    }

    #[test]
    fn serializes_as_object() {
        let mut set = ResultSet::new();
        set.insert("http://host/1", "One");
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"{"http://host/1":"One"}"#);
        assert_eq!(set.urls().collect::<Vec<_>>(), vec!["http://host/1"]);
        assert!(set.contains("http://host/1"));
        assert_eq!(set.iter().next(), Some(("http://host/1", "One")));
    }
}
