//! Nebius AI Studio.

use snipgen_core::TaskFamily;

use crate::providers::routed::{BodyStyle, Route, RoutedConfig, RoutedProvider};

const NEBIUS_HOST: &str = "https://api.studio.nebius.ai";

const ROUTES: &[Route] = &[
    Route::chat("/v1/chat/completions"),
    Route::task(
        "text-generation",
        "/v1/completions",
        BodyStyle::Field("prompt"),
    ),
    Route::task(
        "feature-extraction",
        "/v1/embeddings",
        BodyStyle::Field("input"),
    ),
    Route::task(
        "text-to-image",
        "/v1/images/generations",
        BodyStyle::Field("prompt"),
    ),
];

/// Create the `nebius` provider.
pub fn new_nebius_provider() -> RoutedProvider {
    RoutedProvider::new(RoutedConfig {
        id: "nebius",
        capabilities: RoutedConfig::vendor(
            &[
                TaskFamily::Conversational,
                TaskFamily::TextGeneration,
                TaskFamily::Embedding,
                TaskFamily::GenerativeMedia,
            ],
            NEBIUS_HOST,
            "NEBIUS_API_KEY",
        ),
        routes: ROUTES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Provider;
    use snipgen_core::TaskRegistry;

    #[test]
    fn test_nebius_embeddings() {
        let p = new_nebius_provider();
        let task = TaskRegistry::lookup("feature-extraction").unwrap();
        assert_eq!(p.route(task, "m/x").as_deref(), Some("/v1/embeddings"));
        assert!(!p.supports(TaskRegistry::lookup("sentence-similarity").unwrap()));
    }
}
