//! Hugging Face serverless inference, reached only through the router.

use snipgen_core::{EngineConfig, Literal, ModelAlias, Task, TaskFamily};

use crate::traits::{AuthScheme, BodyContext, Capabilities, FileInputs, Provider};

const CAPABILITIES: Capabilities = Capabilities {
    families: &[
        TaskFamily::Conversational,
        TaskFamily::TextGeneration,
        TaskFamily::Classification,
        TaskFamily::Embedding,
        TaskFamily::BinaryInput,
        TaskFamily::GenerativeMedia,
    ],
    extra_tasks: &[],
    excluded_tasks: &["text-to-video"],
    router_only: true,
    direct_host: None,
    key_env: None,
    key_auth: AuthScheme::Bearer,
    streaming: true,
    custom_base_url: true,
    native_sdk: false,
    file_inputs: FileInputs::AsTask,
    binary_media: true,
    extra_headers: &[],
};

/// The `hf-inference` provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct HfInferenceProvider;

impl Provider for HfInferenceProvider {
    fn id(&self) -> &str {
        "hf-inference"
    }

    fn capabilities(&self) -> &Capabilities {
        &CAPABILITIES
    }

    fn route(&self, task: &Task, model: &str) -> Option<String> {
        Some(match task.family {
            TaskFamily::Conversational => format!("/models/{model}/v1/chat/completions"),
            TaskFamily::Embedding => format!("/models/{model}/pipeline/{}", task.id),
            _ => format!("/models/{model}"),
        })
    }

    fn body(&self, ctx: &BodyContext<'_>) -> Vec<(String, Literal)> {
        if ctx.task.is_conversational() {
            ctx.chat_body()
        } else {
            ctx.pipeline_body()
        }
    }

    fn alias(&self, canonical: &str, _config: &EngineConfig) -> ModelAlias {
        ModelAlias::Canonical(canonical.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipgen_core::{ChatParams, TaskRegistry};

    #[test]
    fn test_routes_by_family() {
        let p = HfInferenceProvider;
        let route = |id: &str| p.route(TaskRegistry::lookup(id).unwrap(), "org/m").unwrap();
        assert_eq!(route("conversational"), "/models/org/m/v1/chat/completions");
        assert_eq!(
            route("feature-extraction"),
            "/models/org/m/pipeline/feature-extraction"
        );
        assert_eq!(route("automatic-speech-recognition"), "/models/org/m");
    }

    #[test]
    fn test_alias_is_identity() {
        let alias = HfInferenceProvider.alias("org/m", &EngineConfig::default());
        assert_eq!(alias, ModelAlias::Canonical("org/m".to_string()));
    }

    #[test]
    fn test_video_is_excluded() {
        assert!(!HfInferenceProvider.supports(TaskRegistry::lookup("text-to-video").unwrap()));
        assert!(HfInferenceProvider.supports(TaskRegistry::lookup("text-to-speech").unwrap()));
    }

    #[test]
    fn test_pipeline_body_carries_parameters() {
        let task = TaskRegistry::lookup("zero-shot-classification").unwrap();
        let ctx = BodyContext {
            task,
            model: "facebook/bart-large-mnli",
            messages: None,
            inputs: task.inputs_literal(None),
            parameters: task.parameters_literal(),
            file_expr: None,
            chat: ChatParams::new(500),
        };
        let keys: Vec<_> = HfInferenceProvider
            .body(&ctx)
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["inputs", "parameters"]);
    }
}
