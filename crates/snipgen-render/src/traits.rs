//! Renderer trait definition.

use snipgen_core::{ClientId, Language, ResolvedRequest, SnippetError};
use tracing::debug;

/// Trait for client-library renderers.
///
/// A renderer turns a resolved request into source text for one client library.
/// It never decides routing; it only refuses requests its library cannot express.
pub trait Renderer: Send + Sync {
    /// Client this renderer emits code for.
    fn client(&self) -> ClientId;

    /// Language of the emitted snippet.
    fn language(&self) -> Language {
        self.client().language()
    }

    /// Whether the client hides URL construction behind a higher-level call.
    fn hides_url(&self) -> bool {
        !self.client().is_raw_http()
    }

    /// Render source text. Output has no trailing newline.
    fn render(&self, request: &ResolvedRequest) -> Result<String, SnippetError>;
}

/// Refusal for a request this renderer cannot express.
pub(crate) fn refuse(request: &ResolvedRequest, reason: &str) -> SnippetError {
    debug!(
        task = request.task.id,
        provider = %request.provider,
        client = request.client.as_str(),
        reason,
        "renderer refused request"
    );
    SnippetError::unsupported(
        request.task.id,
        request.provider.as_str(),
        request.client.as_str(),
        reason,
    )
}

// Compile-time check: Renderer must be object-safe
const _: () = {
    fn _assert_object_safe(_: &dyn Renderer) {}
};
