//! The resolved request descriptor handed from the resolver to the renderers.

use crate::literal::Literal;
use crate::model::ModelAlias;
use crate::snippet::ClientId;
use crate::task::{Task, Transport};

/// How the snippet obtains its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// Inline token literal.
    Literal(String),
    /// Environment lookup. `required` selects `os.environ[...]` over `os.getenv(...)`.
    Env {
        var: String,
        required: bool,
        default: Option<String>,
    },
}

/// A header value, possibly carrying a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Text(String),
    /// `prefix` immediately followed by the credential, e.g. `Bearer `.
    Secret {
        prefix: String,
        credential: Credential,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub name: String,
    pub value: HeaderValue,
}

/// Ordered header list with case-insensitive name matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<Header>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&HeaderValue> {
        self.0
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| &h.value)
    }

    /// Set a header, replacing an existing one with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: HeaderValue) {
        let name = name.into();
        match self.0.iter_mut().find(|h| h.name.eq_ignore_ascii_case(&name)) {
            Some(existing) => existing.value = value,
            None => self.0.push(Header { name, value }),
        }
    }

    /// Append a header only if no header with that name exists.
    pub fn merge_missing(&mut self, name: impl Into<String>, value: HeaderValue) {
        let name = name.into();
        if !self.contains(&name) {
            self.0.push(Header { name, value });
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Header> {
        self.0.iter()
    }
}

/// A local file read by the snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: String,
    pub mime: String,
}

impl InputFile {
    /// A user-supplied path, with the MIME type guessed from its extension.
    pub fn guess(path: impl Into<String>) -> Self {
        let path = path.into();
        let mime = mime_guess::from_path(&path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();
        Self { path, mime }
    }
}

/// A file inlined as a `data:` URI variable in the snippet prelude.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub path: String,
    pub mime: String,
}

impl DataUri {
    pub fn new(file: &InputFile) -> Self {
        Self {
            path: file.path.clone(),
            mime: file.mime.clone(),
        }
    }

    /// Variable stem derived from the MIME type (`image`, `audio`, `file`).
    pub fn stem(&self) -> &str {
        match self.mime.split('/').next() {
            Some("image") => "image",
            Some("audio") => "audio",
            _ => "file",
        }
    }

    /// Name of the variable holding the URI.
    pub fn var(&self) -> String {
        format!("{}_url", self.stem())
    }
}

/// Sampling options of a chat completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatParams {
    pub temperature: Option<f64>,
    pub max_tokens: i64,
    pub top_p: Option<f64>,
}

impl ChatParams {
    pub fn new(max_tokens: i64) -> Self {
        Self {
            temperature: None,
            max_tokens,
            top_p: None,
        }
    }

    /// `temperature`, `max_tokens`, `top_p`, skipping unset options.
    pub fn entries(&self) -> Vec<(String, Literal)> {
        let mut entries = Vec::with_capacity(3);
        if let Some(temperature) = self.temperature {
            entries.push(("temperature".to_string(), Literal::Float(temperature)));
        }
        entries.push(("max_tokens".to_string(), Literal::Int(self.max_tokens)));
        if let Some(top_p) = self.top_p {
            entries.push(("top_p".to_string(), Literal::Float(top_p)));
        }
        entries
    }
}

/// How the snippet decodes the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Bytes,
    /// Server-sent events carrying chat deltas.
    Stream,
}

/// Model references in the forms renderers need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    /// `namespace/name`.
    pub canonical: String,
    /// As the user wrote it, including any `:provider` suffix that survived resolution.
    pub as_given: String,
    /// What the provider expects on the wire.
    pub alias: ModelAlias,
}

/// Fully resolved request. A pure function of its inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRequest {
    pub task: &'static Task,
    pub client: ClientId,
    /// Provider id, `auto` for the provider-agnostic router endpoint.
    pub provider: String,
    /// Whether the provider was named explicitly rather than selected automatically.
    pub explicit_provider: bool,
    /// Whether the request goes straight to the vendor host.
    pub direct: bool,
    /// Self-hosted base URL, trimmed of trailing slashes.
    pub custom_base_url: Option<String>,
    pub url: String,
    /// Base URL for OpenAI-style SDKs (the URL without `/chat/completions`).
    pub base_url: String,
    /// Auth, provider extras and billing, in that order.
    pub headers: Headers,
    pub content_type: String,
    pub transport: Transport,
    /// Top-level wire body entries, in order.
    pub body: Vec<(String, Literal)>,
    pub model: ResolvedModel,
    pub streaming: bool,
    pub credential: Credential,
    pub bill_to: Option<String>,
    pub bill_to_header: String,
    /// Chat messages, for renderers that pass them as a keyword.
    pub messages: Option<Literal>,
    pub chat: ChatParams,
    /// Effective input file: the override or the task's sample.
    pub input_file: Option<InputFile>,
    pub data_uris: Vec<DataUri>,
    pub response: ResponseKind,
    pub bind_model: bool,
}

impl ResolvedRequest {
    /// Provider headers with the content type merged in without clobbering.
    pub fn merged_headers(&self) -> Headers {
        let mut headers = self.headers.clone();
        headers.merge_missing("Content-Type", HeaderValue::Text(self.content_type.clone()));
        headers
    }

    /// Body entry by key.
    pub fn body_value(&self, key: &str) -> Option<&Literal> {
        self.body.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }
}
