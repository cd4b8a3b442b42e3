// ABOUTME: Builds the registry of built-in translators.
// ABOUTME: Provides load_builtin_registry() and warms the selector cache for them.

use crate::dom::compiled::precompile_selectors;
use crate::registry::TranslatorRegistry;
use crate::sites::{NationalArchivesAustralia, TeiGuidelines};

/// Registers every built-in translator and precompiles their selectors.
pub fn load_builtin_registry() -> TranslatorRegistry {
    let mut registry = TranslatorRegistry::new();
    registry.register(NationalArchivesAustralia::new());
    registry.register(TeiGuidelines::new());

    for label in registry.labels() {
        if let Some(translator) = registry.get(label) {
            precompile_selectors(translator.selectors().iter().copied());
        }
    }
    tracing::debug!(translators = ?registry, "loaded builtin registry");
    registry
}
