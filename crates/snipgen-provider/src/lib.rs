//! snipgen-provider: inference providers, their registry, and request resolution.

pub mod providers;
pub mod registry;
pub mod resolver;
pub mod traits;

pub use registry::{ProviderRegistry, AUTO_PROVIDER};
pub use resolver::{ProviderSelection, Resolver};
pub use traits::{AuthScheme, BodyContext, Capabilities, FileInputs, Provider};
