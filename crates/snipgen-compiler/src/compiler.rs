//! Snippet compiler: resolver plus renderer for one or many clients.

use snipgen_core::{ClientId, EngineConfig, Language, Snippet, SnippetError, TaskRegistry, Variant};
use snipgen_provider::{ProviderRegistry, ProviderSelection, Resolver};
use snipgen_render::RendererRegistry;
use tracing::debug;

/// Generates snippets from (task, provider, client, variant) tuples.
///
/// Generation is pure: no network or filesystem access, and identical input
/// always yields byte-identical output.
pub struct Compiler<'a> {
    providers: &'a ProviderRegistry,
    renderers: &'a RendererRegistry,
    config: EngineConfig,
}

impl Compiler<'static> {
    /// A compiler over the built-in registries.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_registries(ProviderRegistry::global(), RendererRegistry::global(), config)
    }
}

impl Default for Compiler<'static> {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl<'a> Compiler<'a> {
    pub fn with_registries(
        providers: &'a ProviderRegistry,
        renderers: &'a RendererRegistry,
        config: EngineConfig,
    ) -> Self {
        Self {
            providers,
            renderers,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Render one client.
    pub fn compile(
        &self,
        task_id: &str,
        selection: &ProviderSelection,
        model: &str,
        client: ClientId,
        variant: &Variant,
    ) -> Result<Snippet, SnippetError> {
        let task = TaskRegistry::lookup(task_id)?;
        let renderer = self.renderers.lookup(client)?;
        let request = Resolver::new(self.providers, &self.config)
            .resolve(task, selection, model, client, variant)?;
        let content = renderer.render(&request)?;
        Ok(Snippet {
            language: renderer.language(),
            client,
            provider: selection.as_str().to_string(),
            content,
        })
    }

    /// Render every supported client for `language`, in fixed client order.
    ///
    /// Unsupported combinations are skipped; any other error aborts.
    pub fn compile_all(
        &self,
        task_id: &str,
        selection: &ProviderSelection,
        model: &str,
        language: Language,
        variant: &Variant,
    ) -> Result<Vec<Snippet>, SnippetError> {
        let mut snippets = Vec::new();
        for client in language.clients() {
            if self.renderers.get(client).is_none() {
                continue;
            }
            match self.compile(task_id, selection, model, client, variant) {
                Ok(snippet) => snippets.push(snippet),
                Err(err) if err.is_unsupported() => {
                    debug!(task = task_id, provider = %selection, %err, "skipping client");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(snippets)
    }
}
