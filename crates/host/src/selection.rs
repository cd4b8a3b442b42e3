// ABOUTME: Operator selection of candidate records found on listing pages.
// ABOUTME: Provides the SelectItems trait, non-interactive selectors and a terminal multi-select prompt.

use std::io::IsTerminal;

use dialoguer::theme::ColorfulTheme;
use dialoguer::MultiSelect;
use folio_translators::ResultSet;

/// Chooses which listing entries to translate. Returns the chosen URLs;
/// an empty result ends the flow with no records.
pub trait SelectItems: Send + Sync {
    fn select(&self, results: &ResultSet) -> Vec<String>;
}

/// Selects every entry, in listing order.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectAll;

impl SelectItems for SelectAll {
    fn select(&self, results: &ResultSet) -> Vec<String> {
        results.urls().map(str::to_string).collect()
    }
}

/// Selects nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SelectNone;

impl SelectItems for SelectNone {
    fn select(&self, _results: &ResultSet) -> Vec<String> {
        vec![]
    }
}

impl<F> SelectItems for F
where
    F: Fn(&ResultSet) -> Vec<String> + Send + Sync,
{
    fn select(&self, results: &ResultSet) -> Vec<String> {
        self(results)
    }
}

/// Asks the operator on the terminal. Without a terminal nothing is selected.
#[derive(Debug, Default, Clone, Copy)]
pub struct PromptSelect;

impl SelectItems for PromptSelect {
    fn select(&self, results: &ResultSet) -> Vec<String> {
        if !std::io::stderr().is_terminal() {
            tracing::warn!(
                candidates = results.len(),
                "listing page needs a terminal to choose records; pass --all to take every one"
            );
            return vec![];
        }

        let entries: Vec<(&str, &str)> = results.iter().collect();
        let labels: Vec<&str> = entries.iter().map(|(_, title)| *title).collect();
        let chosen = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt("Which records do you want to save?")
            .items(&labels)
            .interact_opt();

        match chosen {
            Ok(Some(indices)) => indices
                .into_iter()
                .filter_map(|i| entries.get(i).map(|(url, _)| url.to_string()))
                .collect(),
            Ok(None) => vec![],
            Err(e) => {
                tracing::warn!(error = %e, "selection prompt failed");
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> ResultSet {
        [
            ("http://recordsearch.naa.gov.au/a".to_string(), "First".to_string()),
            ("http://recordsearch.naa.gov.au/b".to_string(), "Second".to_string()),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn select_all_keeps_order() {
        assert_eq!(
            SelectAll.select(&listing()),
            vec![
                "http://recordsearch.naa.gov.au/a".to_string(),
                "http://recordsearch.naa.gov.au/b".to_string(),
            ]
        );
    }

    #[test]
    fn select_none_is_empty() {
        assert!(SelectNone.select(&listing()).is_empty());
    }

    #[test]
    fn closures_select() {
        let last = |results: &ResultSet| -> Vec<String> {
            results.urls().last().map(str::to_string).into_iter().collect()
        };
        assert_eq!(
            last.select(&listing()),
            vec!["http://recordsearch.naa.gov.au/b".to_string()]
        );
    }
}
