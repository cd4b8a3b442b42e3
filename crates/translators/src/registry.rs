// ABOUTME: Registry for looking up the translator responsible for a URL.
// ABOUTME: Picks the highest-priority translator whose target pattern matches.

use std::fmt;
use std::sync::Arc;

use crate::translator::Translator;

/// Registry of translators, queried by URL.
#[derive(Default, Clone)]
pub struct TranslatorRegistry {
    translators: Vec<Arc<dyn Translator>>,
}

impl fmt::Debug for TranslatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.translators.iter().map(|t| t.label()))
            .finish()
    }
}

impl TranslatorRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a translator.
    pub fn register<T: Translator + 'static>(&mut self, translator: T) {
        self.register_arc(Arc::new(translator));
    }

    /// Registers an already shared translator.
    pub fn register_arc(&mut self, translator: Arc<dyn Translator>) {
        self.translators.push(translator);
    }

    /// Returns the translator for a URL: highest priority first, then
    /// registration order.
    pub fn find(&self, url: &str) -> Option<Arc<dyn Translator>> {
        let mut best: Option<&Arc<dyn Translator>> = None;
        for translator in self.translators.iter().filter(|t| t.matches(url)) {
            match best {
                Some(current) if current.priority() >= translator.priority() => {}
                _ => best = Some(translator),
            }
        }
        best.cloned()
    }

    /// Looks up a translator by label.
    pub fn get(&self, label: &str) -> Option<Arc<dyn Translator>> {
        self.translators.iter().find(|t| t.label() == label).cloned()
    }

    /// Labels of all registered translators, in registration order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.translators.iter().map(|t| t.label()).collect()
    }

    /// Returns the number of registered translators.
    pub fn len(&self) -> usize {
        self.translators.len()
    }

    /// Returns true if no translators are registered.
    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslateError;
    use crate::item::{Item, ItemType};
    use crate::page::{Page, PageKind};
    use regex::Regex;

    struct Fixed {
        label: &'static str,
        target: Regex,
        priority: u32,
    }

    impl Fixed {
        fn new(label: &'static str, target: &str, priority: u32) -> Self {
            Self {
                label,
                target: Regex::new(target).unwrap(),
                priority,
            }
        }
    }

    impl Translator for Fixed {
        fn label(&self) -> &'static str {
            self.label
        }

        fn target(&self) -> &Regex {
            &self.target
        }

        fn priority(&self) -> u32 {
            self.priority
        }

        fn detect(&self, _page: &Page) -> Option<PageKind> {
            Some(PageKind::Single(ItemType::Book))
        }

        fn scrape(&self, _page: &Page) -> Result<Option<Item>, TranslateError> {
            Ok(Some(Item::new(ItemType::Book)))
        }
    }

    #[test]
    fn find_by_target() {
        let mut registry = TranslatorRegistry::new();
        assert!(registry.is_empty());
        registry.register(Fixed::new("Alpha", r"^https?://alpha\.example/", 100));
        registry.register(Fixed::new("Beta", r"^https?://beta\.example/", 100));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.find("https://beta.example/x").unwrap().label(), "Beta");
        assert!(registry.find("https://gamma.example/").is_none());
        assert_eq!(registry.labels(), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn priority_then_registration_order() {
        let mut registry = TranslatorRegistry::new();
        registry.register(Fixed::new("Generic", r"example", 50));
        registry.register(Fixed::new("First", r"example", 100));
        registry.register(Fixed::new("Second", r"example", 100));

        assert_eq!(registry.find("https://example/").unwrap().label(), "First");
        assert_eq!(registry.get("Second").unwrap().label(), "Second");
        assert!(registry.get("Missing").is_none());
    }
}
