//! Vendors that only serve OpenAI-compatible chat completions.

use snipgen_core::TaskFamily;

use crate::providers::routed::{Route, RoutedConfig, RoutedProvider};

const CHAT_ONLY: &[TaskFamily] = &[TaskFamily::Conversational];

const V1_CHAT: &[Route] = &[Route::chat("/v1/chat/completions")];

fn chat_provider(
    id: &'static str,
    host: &'static str,
    key_env: &'static str,
    routes: &'static [Route],
) -> RoutedProvider {
    RoutedProvider::new(RoutedConfig {
        id,
        capabilities: RoutedConfig::vendor(CHAT_ONLY, host, key_env),
        routes,
    })
}

/// Create the `fireworks-ai` provider.
pub fn new_fireworks_provider() -> RoutedProvider {
    const ROUTES: &[Route] = &[Route::chat("/inference/v1/chat/completions")];
    chat_provider(
        "fireworks-ai",
        "https://api.fireworks.ai",
        "FIREWORKS_AI_API_KEY",
        ROUTES,
    )
}

/// Create the `cerebras` provider.
pub fn new_cerebras_provider() -> RoutedProvider {
    chat_provider(
        "cerebras",
        "https://api.cerebras.ai",
        "CEREBRAS_API_KEY",
        V1_CHAT,
    )
}

/// Create the `hyperbolic` provider.
pub fn new_hyperbolic_provider() -> RoutedProvider {
    chat_provider(
        "hyperbolic",
        "https://api.hyperbolic.xyz",
        "HYPERBOLIC_API_KEY",
        V1_CHAT,
    )
}

/// Create the `cohere` provider.
pub fn new_cohere_provider() -> RoutedProvider {
    const ROUTES: &[Route] = &[Route::chat("/compatibility/v1/chat/completions")];
    chat_provider("cohere", "https://api.cohere.com", "COHERE_API_KEY", ROUTES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Provider;
    use snipgen_core::TaskRegistry;

    #[test]
    fn test_chat_only_providers() {
        let chat = TaskRegistry::lookup("conversational-vlm").unwrap();
        let text = TaskRegistry::lookup("text-generation").unwrap();
        for p in [
            new_fireworks_provider(),
            new_cerebras_provider(),
            new_hyperbolic_provider(),
            new_cohere_provider(),
        ] {
            assert!(p.supports(chat), "{} should serve chat", p.id());
            assert!(!p.supports(text), "{} should refuse text-generation", p.id());
            assert!(p.capabilities().streaming);
        }
    }

    #[test]
    fn test_fireworks_prefix() {
        let task = TaskRegistry::lookup("conversational").unwrap();
        assert_eq!(
            new_fireworks_provider().route(task, "m/x").as_deref(),
            Some("/inference/v1/chat/completions")
        );
    }
}
