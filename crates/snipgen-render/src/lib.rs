//! Client-library renderers.
//!
//! Renderers turn a [`snipgen_core::ResolvedRequest`] into source text. Python
//! clients share [`python`], JavaScript clients share [`js`]; `curl` stands alone.

pub mod clients;
pub mod js;
pub mod python;
pub mod registry;
pub mod traits;

pub use registry::RendererRegistry;
pub use traits::Renderer;
