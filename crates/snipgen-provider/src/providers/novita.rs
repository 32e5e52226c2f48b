//! Novita AI.

use snipgen_core::TaskFamily;

use crate::providers::routed::{BodyStyle, Route, RoutedConfig, RoutedProvider};

const ROUTES: &[Route] = &[
    Route::chat("/v3/openai/chat/completions"),
    Route::task("text-to-video", "/v3/hf/{model}", BodyStyle::Bare("prompt")),
];

/// Create the `novita` provider.
pub fn new_novita_provider() -> RoutedProvider {
    RoutedProvider::new(RoutedConfig {
        id: "novita",
        capabilities: RoutedConfig::vendor(
            &[TaskFamily::Conversational, TaskFamily::GenerativeMedia],
            "https://api.novita.ai",
            "NOVITA_API_KEY",
        ),
        routes: ROUTES,
    })
}
