//! Together AI: chat, completions and image generation.

use snipgen_core::TaskFamily;

use crate::providers::routed::{BodyStyle, Route, RoutedConfig, RoutedProvider};

const TOGETHER_HOST: &str = "https://api.together.xyz";

const ROUTES: &[Route] = &[
    Route::chat("/v1/chat/completions"),
    Route::task(
        "text-generation",
        "/v1/completions",
        BodyStyle::Field("prompt"),
    ),
    Route::task(
        "text-to-image",
        "/v1/images/generations",
        BodyStyle::Field("prompt"),
    ),
];

/// Create the `together` provider.
pub fn new_together_provider() -> RoutedProvider {
    RoutedProvider::new(RoutedConfig {
        id: "together",
        capabilities: RoutedConfig::vendor(
            &[
                TaskFamily::Conversational,
                TaskFamily::TextGeneration,
                TaskFamily::GenerativeMedia,
            ],
            TOGETHER_HOST,
            "TOGETHER_API_KEY",
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
    fn test_together_routes() {
        let p = new_together_provider();
        assert_eq!(p.id(), "together");
        let task = TaskRegistry::lookup("text-generation").unwrap();
        assert_eq!(p.route(task, "m/x").as_deref(), Some("/v1/completions"));
        assert!(!p.supports(TaskRegistry::lookup("summarization").unwrap()));
        assert!(!p.supports(TaskRegistry::lookup("text-to-video").unwrap()));
    }
}
