//! Provider trait definition.

use snipgen_core::{
    ChatParams, Credential, EngineConfig, HeaderValue, Literal, ModelAlias, Task, TaskFamily,
};

/// How a provider key is attached to a direct request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`
    Bearer,
    /// `Authorization: <prefix><token>`
    Prefixed(&'static str),
    /// `<name>: <token>`
    Header(&'static str),
}

impl AuthScheme {
    /// Header name and value carrying `credential`.
    pub fn header(&self, credential: Credential) -> (String, HeaderValue) {
        let (name, prefix) = match self {
            Self::Bearer => ("Authorization", "Bearer "),
            Self::Prefixed(prefix) => ("Authorization", *prefix),
            Self::Header(name) => (*name, ""),
        };
        (
            name.to_string(),
            HeaderValue::Secret {
                prefix: prefix.to_string(),
                credential,
            },
        )
    }
}

/// How a provider accepts local files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileInputs {
    /// The task's own transport (raw bytes or base64 in JSON).
    AsTask,
    /// Inlined as a base64 `data:` URI referenced from the JSON body.
    DataUri,
}

/// Static capability flags of a provider.
#[derive(Debug, Clone, Copy)]
pub struct Capabilities {
    pub families: &'static [TaskFamily],
    /// Tasks accepted outside the declared families.
    pub extra_tasks: &'static [&'static str],
    /// Tasks refused inside the declared families.
    pub excluded_tasks: &'static [&'static str],
    /// Reachable only through the router.
    pub router_only: bool,
    /// Vendor host used with a provider key.
    pub direct_host: Option<&'static str>,
    /// Environment variable conventionally holding the provider key.
    pub key_env: Option<&'static str>,
    pub key_auth: AuthScheme,
    pub streaming: bool,
    pub custom_base_url: bool,
    /// Ships a native SDK (`fal_client`).
    pub native_sdk: bool,
    pub file_inputs: FileInputs,
    /// Media tasks answer with raw bytes rather than JSON.
    pub binary_media: bool,
    pub extra_headers: &'static [(&'static str, &'static str)],
}

impl Capabilities {
    /// Whether the flags declare `task`.
    pub fn declares(&self, task: &Task) -> bool {
        if self.excluded_tasks.contains(&task.id) {
            return false;
        }
        self.families.contains(&task.family) || self.extra_tasks.contains(&task.id)
    }
}

/// Values a provider needs to build a request body.
#[derive(Debug, Clone)]
pub struct BodyContext<'a> {
    pub task: &'a Task,
    /// Model string on the wire.
    pub model: &'a str,
    pub messages: Option<Literal>,
    pub inputs: Option<Literal>,
    pub parameters: Option<Literal>,
    /// Expression referencing an inlined file, for data-URI providers.
    pub file_expr: Option<Literal>,
    pub chat: ChatParams,
}

impl BodyContext<'_> {
    /// `model`, `messages` and the sampling options: the OpenAI chat body.
    pub fn chat_body(&self) -> Vec<(String, Literal)> {
        let mut body = vec![("model".to_string(), Literal::str(self.model))];
        if let Some(messages) = &self.messages {
            body.push(("messages".to_string(), messages.clone()));
        }
        body.extend(self.chat.entries());
        body
    }

    /// `inputs` with optional `parameters`: the task-pipeline body.
    pub fn pipeline_body(&self) -> Vec<(String, Literal)> {
        let mut body = Vec::new();
        if let Some(inputs) = &self.inputs {
            body.push(("inputs".to_string(), inputs.clone()));
        }
        if let Some(parameters) = &self.parameters {
            body.push(("parameters".to_string(), parameters.clone()));
        }
        body
    }

    /// Prompt-like text of the task.
    pub fn text(&self) -> Literal {
        Literal::str(self.task.prompt_text().unwrap_or_default())
    }
}

/// Trait for inference provider descriptors.
///
/// Providers are immutable: they describe how a task reaches a backend
/// (path, auth, model aliasing, body shape) without performing any I/O.
pub trait Provider: Send + Sync {
    /// Provider identifier (e.g., "together", "fal-ai").
    fn id(&self) -> &str;

    fn capabilities(&self) -> &Capabilities;

    /// Path for `task` relative to the provider root, `None` when there is no endpoint.
    ///
    /// The same path is used on the vendor host and behind the router prefix.
    fn route(&self, task: &Task, model: &str) -> Option<String>;

    /// Wire body entries for raw HTTP clients.
    fn body(&self, ctx: &BodyContext<'_>) -> Vec<(String, Literal)>;

    /// Arguments for the provider's native SDK.
    fn native_arguments(&self, _ctx: &BodyContext<'_>) -> Option<Vec<(String, Literal)>> {
        None
    }

    /// Whether `task` is served by this provider.
    fn supports(&self, task: &Task) -> bool {
        self.capabilities().declares(task) && self.route(task, "").is_some()
    }

    /// Provider-specific model id for `canonical`.
    fn alias(&self, canonical: &str, config: &EngineConfig) -> ModelAlias {
        match config.known_alias(self.id(), canonical) {
            Some(alias) => ModelAlias::Known(alias.to_string()),
            None => ModelAlias::Placeholder {
                provider: self.id().to_string(),
                canonical: canonical.to_string(),
            },
        }
    }
}

// Compile-time check: Provider must be object-safe
const _: () = {
    fn _assert_object_safe(_: &dyn Provider) {}
};
