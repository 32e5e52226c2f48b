//! Renderer registry.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use snipgen_core::{ClientId, SnippetError};

use crate::clients::{
    CurlRenderer, FalClientRenderer, FetchRenderer, HuggingFaceHubRenderer,
    HuggingFaceJsRenderer, OpenAiJsRenderer, OpenAiRenderer, RequestsRenderer,
};
use crate::traits::Renderer;

static BUILTIN: Lazy<RendererRegistry> = Lazy::new(RendererRegistry::with_builtins);

/// Registry of renderers, one per client.
#[derive(Clone)]
pub struct RendererRegistry {
    renderers: HashMap<ClientId, Arc<dyn Renderer>>,
}

impl RendererRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// A registry holding every built-in renderer.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(HuggingFaceHubRenderer));
        registry.register(Arc::new(FalClientRenderer));
        registry.register(Arc::new(RequestsRenderer));
        registry.register(Arc::new(OpenAiRenderer));
        registry.register(Arc::new(FetchRenderer));
        registry.register(Arc::new(HuggingFaceJsRenderer));
        registry.register(Arc::new(OpenAiJsRenderer));
        registry.register(Arc::new(CurlRenderer));
        registry
    }

    /// The process-wide built-in registry.
    pub fn global() -> &'static RendererRegistry {
        &BUILTIN
    }

    /// Register a renderer. Replaces any existing renderer for the same client.
    pub fn register(&mut self, renderer: Arc<dyn Renderer>) {
        self.renderers.insert(renderer.client(), renderer);
    }

    pub fn get(&self, client: ClientId) -> Option<Arc<dyn Renderer>> {
        self.renderers.get(&client).cloned()
    }

    /// Look up a renderer, failing with [`SnippetError::UnknownClient`].
    pub fn lookup(&self, client: ClientId) -> Result<Arc<dyn Renderer>, SnippetError> {
        self.get(client)
            .ok_or_else(|| SnippetError::UnknownClient(client.as_str().to_string()))
    }

    /// Registered clients in fixture order.
    pub fn clients(&self) -> Vec<ClientId> {
        ClientId::ALL
            .iter()
            .copied()
            .filter(|client| self.renderers.contains_key(client))
            .collect()
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipgen_core::Language;

    #[test]
    fn test_every_client_has_a_renderer() {
        let registry = RendererRegistry::global();
        assert_eq!(registry.clients(), ClientId::ALL.to_vec());
        for client in ClientId::ALL {
            assert_eq!(registry.lookup(client).unwrap().client(), client);
        }
    }

    #[test]
    fn test_empty_registry_lookup() {
        let err = RendererRegistry::new()
            .lookup(ClientId::Curl)
            .err()
            .unwrap();
        assert_eq!(err, SnippetError::UnknownClient("curl".to_string()));
    }

    #[test]
    fn test_sdk_clients_hide_urls() {
        let registry = RendererRegistry::global();
        assert!(registry.lookup(ClientId::HuggingFaceHub).unwrap().hides_url());
        assert!(!registry.lookup(ClientId::Requests).unwrap().hides_url());
        assert!(registry.lookup(ClientId::HuggingFaceJs).unwrap().hides_url());
        assert!(!registry.lookup(ClientId::Fetch).unwrap().hides_url());
    }

    #[test]
    fn test_renderer_language_follows_client() {
        let registry = RendererRegistry::global();
        assert_eq!(registry.lookup(ClientId::OpenAiJs).unwrap().language(), Language::Js);
        assert_eq!(registry.lookup(ClientId::OpenAi).unwrap().language(), Language::Python);
        assert_eq!(registry.lookup(ClientId::Curl).unwrap().language(), Language::Sh);
    }
}
