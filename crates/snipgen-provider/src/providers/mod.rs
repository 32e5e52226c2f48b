//! Built-in providers.

pub mod black_forest_labs;
pub mod chat;
pub mod fal_ai;
pub mod hf_inference;
pub mod nebius;
pub mod novita;
pub mod replicate;
pub mod routed;
pub mod sambanova;
pub mod together;

pub use black_forest_labs::new_black_forest_labs_provider;
pub use chat::{
    new_cerebras_provider, new_cohere_provider, new_fireworks_provider, new_hyperbolic_provider,
};
pub use fal_ai::FalAiProvider;
pub use hf_inference::HfInferenceProvider;
pub use nebius::new_nebius_provider;
pub use novita::new_novita_provider;
pub use replicate::new_replicate_provider;
pub use routed::{BodyStyle, Route, RouteMatch, RoutedConfig, RoutedProvider};
pub use sambanova::new_sambanova_provider;
pub use together::new_together_provider;
