//! SambaNova Cloud.

use snipgen_core::TaskFamily;

use crate::providers::routed::{BodyStyle, Route, RoutedConfig, RoutedProvider};

const ROUTES: &[Route] = &[
    Route::chat("/v1/chat/completions"),
    Route::task(
        "feature-extraction",
        "/v1/embeddings",
        BodyStyle::Field("input"),
    ),
];

/// Create the `sambanova` provider.
pub fn new_sambanova_provider() -> RoutedProvider {
    RoutedProvider::new(RoutedConfig {
        id: "sambanova",
        capabilities: RoutedConfig::vendor(
            &[TaskFamily::Conversational, TaskFamily::Embedding],
            "https://api.sambanova.ai",
            "SAMBANOVA_API_KEY",
        ),
        routes: ROUTES,
    })
}
