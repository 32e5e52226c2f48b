//! Client targets and generated snippets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::SnippetError;

/// Language of a generated snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Js,
    Sh,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Python, Language::Js, Language::Sh];

    /// File extension used in fixture names.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Python => "py",
            Self::Js => "js",
            Self::Sh => "sh",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::Js => "js",
            Self::Sh => "sh",
        }
    }

    /// Clients for this language, in fixture order.
    pub fn clients(&self) -> Vec<ClientId> {
        ClientId::ALL
            .iter()
            .copied()
            .filter(|client| client.language() == *self)
            .collect()
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Self::Python),
            "js" | "javascript" => Ok(Self::Js),
            "sh" | "shell" => Ok(Self::Sh),
            other => Err(format!("Unknown language '{other}'")),
        }
    }
}

/// A client-library target.
///
/// Names are unique per language only: `openai` exists for Python and JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientId {
    HuggingFaceHub,
    FalClient,
    Requests,
    OpenAi,
    Fetch,
    HuggingFaceJs,
    OpenAiJs,
    Curl,
}

impl ClientId {
    /// Every client, in fixture order.
    pub const ALL: [ClientId; 8] = [
        ClientId::HuggingFaceHub,
        ClientId::FalClient,
        ClientId::Requests,
        ClientId::OpenAi,
        ClientId::Fetch,
        ClientId::HuggingFaceJs,
        ClientId::OpenAiJs,
        ClientId::Curl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HuggingFaceHub => "huggingface_hub",
            Self::FalClient => "fal_client",
            Self::Requests => "requests",
            Self::OpenAi | Self::OpenAiJs => "openai",
            Self::Fetch => "fetch",
            Self::HuggingFaceJs => "huggingface.js",
            Self::Curl => "curl",
        }
    }

    pub fn language(&self) -> Language {
        match self {
            Self::HuggingFaceHub | Self::FalClient | Self::Requests | Self::OpenAi => {
                Language::Python
            }
            Self::Fetch | Self::HuggingFaceJs | Self::OpenAiJs => Language::Js,
            Self::Curl => Language::Sh,
        }
    }

    /// Whether the client issues raw HTTP and needs the full URL.
    pub fn is_raw_http(&self) -> bool {
        matches!(self, Self::Requests | Self::Fetch | Self::Curl)
    }

    /// Whether the client only speaks the chat completions API.
    pub fn is_chat_only(&self) -> bool {
        matches!(self, Self::OpenAi | Self::OpenAiJs)
    }

    /// Find a client by name, preferring `language` when the name is shared.
    pub fn find(name: &str, language: Option<Language>) -> Result<Self, SnippetError> {
        let mut matches = Self::ALL
            .iter()
            .copied()
            .filter(|client| client.as_str().eq_ignore_ascii_case(name));
        let found = match language {
            Some(language) => matches.find(|client| client.language() == language),
            None => matches.next(),
        };
        found.ok_or_else(|| SnippetError::UnknownClient(name.to_string()))
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ClientId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl FromStr for ClientId {
    type Err = SnippetError;

    /// Shared names resolve to the first language in fixture order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::find(s, None)
    }
}

/// A generated snippet. Produced fresh per request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snippet {
    pub language: Language,
    pub client: ClientId,
    pub provider: String,
    pub content: String,
}

impl Snippet {
    /// `<ordinal>.<client>.<provider>.<ext>`
    pub fn fixture_file_name(&self, ordinal: usize) -> String {
        format!(
            "{}.{}.{}.{}",
            ordinal,
            self.client.as_str(),
            self.provider,
            self.language.extension()
        )
    }
}
