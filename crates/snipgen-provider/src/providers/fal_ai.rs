//! fal.ai provider.
//!
//! Serves generative media and speech recognition. Local files are inlined as
//! `data:` URIs, and a native SDK (`fal_client`) is available.

use snipgen_core::{Literal, Task, TaskFamily};

use crate::traits::{AuthScheme, BodyContext, Capabilities, FileInputs, Provider};

const CAPABILITIES: Capabilities = Capabilities {
    families: &[TaskFamily::GenerativeMedia],
    extra_tasks: &["automatic-speech-recognition"],
    excluded_tasks: &[],
    router_only: false,
    direct_host: Some("https://fal.run"),
    key_env: Some("FAL_KEY"),
    key_auth: AuthScheme::Prefixed("Key "),
    streaming: false,
    custom_base_url: false,
    native_sdk: true,
    file_inputs: FileInputs::DataUri,
    binary_media: false,
    extra_headers: &[],
};

/// The `fal-ai` provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct FalAiProvider;

impl FalAiProvider {
    fn arguments(&self, ctx: &BodyContext<'_>, native: bool) -> Vec<(String, Literal)> {
        let file = || {
            ctx.file_expr.clone().unwrap_or_else(|| {
                Literal::str(ctx.task.sample_file().map(|f| f.path).unwrap_or_default())
            })
        };
        let mut args = match ctx.task.id {
            "automatic-speech-recognition" => vec![("audio_url".to_string(), file())],
            "image-to-image" => vec![
                ("image_url".to_string(), file()),
                ("prompt".to_string(), ctx.text()),
            ],
            "text-to-speech" => vec![("text".to_string(), ctx.text())],
            _ => vec![("prompt".to_string(), ctx.text())],
        };
        if !native && ctx.task.id == "text-to-image" {
            args.push(("sync_mode".to_string(), Literal::Bool(true)));
        }
        args
    }
}

impl Provider for FalAiProvider {
    fn id(&self) -> &str {
        "fal-ai"
    }

    fn capabilities(&self) -> &Capabilities {
        &CAPABILITIES
    }

    fn route(&self, _task: &Task, model: &str) -> Option<String> {
        Some(format!("/{model}"))
    }

    fn body(&self, ctx: &BodyContext<'_>) -> Vec<(String, Literal)> {
        self.arguments(ctx, false)
    }

    fn native_arguments(&self, ctx: &BodyContext<'_>) -> Option<Vec<(String, Literal)>> {
        Some(self.arguments(ctx, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipgen_core::{ChatParams, TaskRegistry};

    fn ctx(task: &'static Task) -> BodyContext<'static> {
        BodyContext {
            task,
            model: "fal-ai/flux/dev",
            messages: None,
            inputs: task.inputs_literal(None),
            parameters: task.parameters_literal(),
            file_expr: task
                .has_file_input()
                .then(|| Literal::expr(if task.id == "image-to-image" { "image_url" } else { "audio_url" })),
            chat: ChatParams::new(500),
        }
    }

    #[test]
    fn test_supports_media_and_speech_recognition() {
        let p = FalAiProvider;
        assert!(p.supports(TaskRegistry::lookup("text-to-image").unwrap()));
        assert!(p.supports(TaskRegistry::lookup("automatic-speech-recognition").unwrap()));
        assert!(!p.supports(TaskRegistry::lookup("conversational").unwrap()));
        assert!(!p.supports(TaskRegistry::lookup("audio-classification").unwrap()));
    }

    #[test]
    fn test_image_to_image_references_data_uri() {
        let args = FalAiProvider
            .native_arguments(&ctx(TaskRegistry::lookup("image-to-image").unwrap()))
            .unwrap();
        assert_eq!(args[0], ("image_url".to_string(), Literal::expr("image_url")));
        assert_eq!(
            args[1],
            ("prompt".to_string(), Literal::str("Turn the cat into a tiger."))
        );
    }

    #[test]
    fn test_sync_mode_only_over_http() {
        let task = TaskRegistry::lookup("text-to-image").unwrap();
        let http = FalAiProvider.body(&ctx(task));
        assert_eq!(http.last().unwrap().0, "sync_mode");
        let native = FalAiProvider.native_arguments(&ctx(task)).unwrap();
        assert_eq!(native.len(), 1);
    }

    #[test]
    fn test_key_auth_prefix() {
        assert_eq!(
            FalAiProvider.capabilities().key_auth,
            AuthScheme::Prefixed("Key ")
        );
    }
}
