//! Replicate predictions API.

use snipgen_core::TaskFamily;

use crate::providers::routed::{BodyStyle, Route, RoutedConfig, RoutedProvider};
use crate::traits::Capabilities;

const PREDICTIONS: &str = "/v1/models/{model}/predictions";

const ROUTES: &[Route] = &[
    Route::task(
        "text-to-image",
        PREDICTIONS,
        BodyStyle::Wrapped {
            wrapper: "input",
            field: "prompt",
        },
    ),
    Route::task(
        "text-to-video",
        PREDICTIONS,
        BodyStyle::Wrapped {
            wrapper: "input",
            field: "prompt",
        },
    ),
    Route::task(
        "text-to-speech",
        PREDICTIONS,
        BodyStyle::Wrapped {
            wrapper: "input",
            field: "text",
        },
    ),
];

const CAPABILITIES: Capabilities = Capabilities {
    streaming: false,
    custom_base_url: false,
    extra_headers: &[("Prefer", "wait")],
    ..RoutedConfig::vendor(
        &[TaskFamily::GenerativeMedia],
        "https://api.replicate.com",
        "REPLICATE_API_TOKEN",
    )
};

/// Create the `replicate` provider.
///
/// Requests ask the API to block until the prediction completes.
pub fn new_replicate_provider() -> RoutedProvider {
    RoutedProvider::new(RoutedConfig {
        id: "replicate",
        capabilities: CAPABILITIES,
        routes: ROUTES,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Provider;
    use snipgen_core::TaskRegistry;

    #[test]
    fn test_replicate_waits_for_prediction() {
        let p = new_replicate_provider();
        assert_eq!(p.capabilities().extra_headers, &[("Prefer", "wait")]);
        let task = TaskRegistry::lookup("text-to-image").unwrap();
        assert_eq!(
            p.route(task, "black-forest-labs/flux-schnell").as_deref(),
            Some("/v1/models/black-forest-labs/flux-schnell/predictions")
        );
        assert!(!p.supports(TaskRegistry::lookup("image-to-image").unwrap()));
    }
}
