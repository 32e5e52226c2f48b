//! Request variants: orthogonal toggles layered on a (task, provider, client) selection.

use serde::{Deserialize, Serialize};

/// Where the generated snippet reads its token from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TokenSource {
    /// The configured placeholder token (`api_token` by default).
    #[default]
    Placeholder,
    /// An inline literal.
    Literal { value: String },
    /// `os.environ["VAR"]`. `None` picks the default variable for the credential kind.
    RequiredEnv { var: Option<String> },
    /// `os.getenv("VAR", default)`.
    OptionalEnv {
        var: Option<String>,
        default: Option<String>,
    },
}

/// Which credential authenticates the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialKind {
    /// A Hugging Face token, routed through the router.
    #[default]
    HuggingFace,
    /// The provider's own key, sent straight to the vendor host.
    ProviderKey,
}

/// A plain-text chat message supplied in place of the task's sample conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// A set of toggles applied on top of a (task, provider, client) selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Variant {
    pub token: TokenSource,
    pub credential: CredentialKind,
    /// Self-hosted endpoint replacing provider routing.
    pub base_url: Option<String>,
    /// Organization billed through the billing header.
    pub bill_to: Option<String>,
    pub streaming: bool,
    /// Local file replacing the task's sample file.
    pub input_file: Option<String>,
    /// Bind the model when constructing the SDK client instead of per call.
    pub bind_model: bool,
    /// Chat messages replacing the sample conversation.
    pub messages: Option<Vec<ChatMessage>>,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    /// Overrides the configured `max_tokens`.
    pub max_tokens: Option<i64>,
}

impl Variant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: TokenSource) -> Self {
        self.token = token;
        self
    }

    pub fn with_literal_token(self, value: impl Into<String>) -> Self {
        self.with_token(TokenSource::Literal {
            value: value.into(),
        })
    }

    pub fn with_credential(mut self, credential: CredentialKind) -> Self {
        self.credential = credential;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_bill_to(mut self, org: impl Into<String>) -> Self {
        self.bill_to = Some(org.into());
        self
    }

    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    pub fn with_input_file(mut self, path: impl Into<String>) -> Self {
        self.input_file = Some(path.into());
        self
    }

    pub fn with_bound_model(mut self, bind: bool) -> Self {
        self.bind_model = bind;
        self
    }

    pub fn with_messages(mut self, messages: Vec<ChatMessage>) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: i64) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Whether any chat-completion option is set.
    pub fn has_chat_options(&self) -> bool {
        self.messages.is_some()
            || self.temperature.is_some()
            || self.top_p.is_some()
            || self.max_tokens.is_some()
    }
}
