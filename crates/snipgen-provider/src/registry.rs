//! Provider registry.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use snipgen_core::SnippetError;

use crate::providers::{
    new_black_forest_labs_provider, new_cerebras_provider, new_cohere_provider,
    new_fireworks_provider, new_hyperbolic_provider, new_nebius_provider, new_novita_provider,
    new_replicate_provider, new_sambanova_provider, new_together_provider, FalAiProvider,
    HfInferenceProvider,
};
use crate::traits::Provider;

/// Pseudo-provider letting the router pick a backend.
pub const AUTO_PROVIDER: &str = "auto";

static BUILTIN: Lazy<ProviderRegistry> = Lazy::new(ProviderRegistry::with_builtins);

/// Registry of available providers.
///
/// Keeps registration order so listings are stable.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn Provider>>,
    order: Vec<String>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// A registry holding every built-in provider.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(HfInferenceProvider));
        registry.register(Arc::new(new_together_provider()));
        registry.register(Arc::new(FalAiProvider));
        registry.register(Arc::new(new_replicate_provider()));
        registry.register(Arc::new(new_sambanova_provider()));
        registry.register(Arc::new(new_nebius_provider()));
        registry.register(Arc::new(new_fireworks_provider()));
        registry.register(Arc::new(new_cerebras_provider()));
        registry.register(Arc::new(new_hyperbolic_provider()));
        registry.register(Arc::new(new_novita_provider()));
        registry.register(Arc::new(new_cohere_provider()));
        registry.register(Arc::new(new_black_forest_labs_provider()));
        registry
    }

    /// The process-wide built-in registry.
    pub fn global() -> &'static ProviderRegistry {
        &BUILTIN
    }

    /// Register a provider. Replaces any existing provider with the same id.
    pub fn register(&mut self, provider: Arc<dyn Provider>) {
        let id = provider.id().to_string();
        if !self.order.contains(&id) {
            self.order.push(id.clone());
        }
        self.providers.insert(id, provider);
    }

    /// Get a provider by id.
    pub fn get(&self, id: &str) -> Option<Arc<dyn Provider>> {
        self.providers.get(id).cloned()
    }

    /// Look up a provider, failing with [`SnippetError::UnknownProvider`].
    pub fn lookup(&self, id: &str) -> Result<Arc<dyn Provider>, SnippetError> {
        self.get(id)
            .ok_or_else(|| SnippetError::UnknownProvider(id.to_string()))
    }

    /// Providers in registration order.
    pub fn all(&self) -> Vec<Arc<dyn Provider>> {
        self.order
            .iter()
            .filter_map(|id| self.providers.get(id).cloned())
            .collect()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(registry: &ProviderRegistry) -> Vec<String> {
        registry.all().iter().map(|p| p.id().to_string()).collect()
    }

    #[test]
    fn test_builtins_are_registered_in_order() {
        let registry = ProviderRegistry::global();
        let ids = ids(registry);
        assert_eq!(ids.len(), 12);
        assert_eq!(ids.first().map(String::as_str), Some("hf-inference"));
        assert_eq!(ids.last().map(String::as_str), Some("black-forest-labs"));
        assert!(registry.get("fal-ai").is_some());
        assert!(registry.get(AUTO_PROVIDER).is_none());
    }

    #[test]
    fn test_lookup_unknown_provider() {
        let err = ProviderRegistry::global().lookup("acme").err().unwrap();
        assert_eq!(err, SnippetError::UnknownProvider("acme".to_string()));
    }

    #[test]
    fn test_register_replaces_without_duplicating_order() {
        let mut registry = ProviderRegistry::new();
        registry.register(Arc::new(HfInferenceProvider));
        registry.register(Arc::new(HfInferenceProvider));
        assert_eq!(ids(&registry), vec!["hf-inference".to_string()]);
    }

    #[test]
    fn test_only_fal_has_native_sdk() {
        let native: Vec<_> = ProviderRegistry::global()
            .all()
            .into_iter()
            .filter(|p| p.capabilities().native_sdk)
            .map(|p| p.id().to_string())
            .collect();
        assert_eq!(native, vec!["fal-ai".to_string()]);
    }
}
