//! Black Forest Labs image generation.

use snipgen_core::TaskFamily;

use crate::providers::routed::{BodyStyle, Route, RoutedConfig, RoutedProvider};
use crate::traits::{AuthScheme, Capabilities};

const ROUTES: &[Route] = &[Route::task(
    "text-to-image",
    "/v1/{model}",
    BodyStyle::Bare("prompt"),
)];

const CAPABILITIES: Capabilities = Capabilities {
    key_auth: AuthScheme::Header("X-Key"),
    streaming: false,
    custom_base_url: false,
    ..RoutedConfig::vendor(
        &[TaskFamily::GenerativeMedia],
        "https://api.us1.bfl.ai",
        "BFL_API_KEY",
    )
};

/// Create the `black-forest-labs` provider.
pub fn new_black_forest_labs_provider() -> RoutedProvider {
    RoutedProvider::new(RoutedConfig {
        id: "black-forest-labs",
        capabilities: CAPABILITIES,
        routes: ROUTES,
    })
}
