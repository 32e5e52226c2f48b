//! Model identifiers and provider aliases.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SnippetError;

static MODEL_ID_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]*/[A-Za-z0-9][A-Za-z0-9._-]*$").ok());

/// A canonical `namespace/name` model id, with an optional `:provider` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelId {
    canonical: String,
    provider_suffix: Option<String>,
}

impl ModelId {
    /// Parse `namespace/name` or `namespace/name:provider`.
    pub fn parse(raw: &str) -> Result<Self, SnippetError> {
        let raw = raw.trim();
        let (canonical, suffix) = match raw.rsplit_once(':') {
            Some((model, provider)) if !provider.is_empty() && !provider.contains('/') => {
                (model, Some(provider.to_string()))
            }
            _ => (raw, None),
        };
        let valid = MODEL_ID_RE
            .as_ref()
            .is_some_and(|re| re.is_match(canonical));
        if !valid {
            return Err(SnippetError::InvalidModel(raw.to_string()));
        }
        Ok(Self {
            canonical: canonical.to_string(),
            provider_suffix: suffix,
        })
    }

    /// `namespace/name`, without any suffix.
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn provider_suffix(&self) -> Option<&str> {
        self.provider_suffix.as_deref()
    }

    /// The id as the user wrote it, suffix included.
    pub fn as_given(&self) -> String {
        match &self.provider_suffix {
            Some(provider) => format!("{}:{}", self.canonical, provider),
            None => self.canonical.clone(),
        }
    }

    /// Drop the provider suffix.
    pub fn without_suffix(&self) -> Self {
        Self {
            canonical: self.canonical.clone(),
            provider_suffix: None,
        }
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_given())
    }
}

/// The model string a provider expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelAlias {
    /// The provider uses the canonical id.
    Canonical(String),
    /// A known provider-specific id.
    Known(String),
    /// No mapping is known; rendered as a readable placeholder.
    Placeholder { provider: String, canonical: String },
}

impl ModelAlias {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

impl fmt::Display for ModelAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canonical(id) | Self::Known(id) => f.write_str(id),
            Self::Placeholder {
                provider,
                canonical,
            } => write!(f, "<{provider} alias for {canonical}>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_id() {
        let model = ModelId::parse("meta-llama/Llama-3.1-8B-Instruct").unwrap();
        assert_eq!(model.canonical(), "meta-llama/Llama-3.1-8B-Instruct");
        assert!(model.provider_suffix().is_none());
    }

    #[test]
    fn test_parse_provider_suffix() {
        let model = ModelId::parse("Qwen/Qwen2.5-72B-Instruct:together").unwrap();
        assert_eq!(model.canonical(), "Qwen/Qwen2.5-72B-Instruct");
        assert_eq!(model.provider_suffix(), Some("together"));
        assert_eq!(model.as_given(), "Qwen/Qwen2.5-72B-Instruct:together");
        assert_eq!(model.without_suffix().as_given(), "Qwen/Qwen2.5-72B-Instruct");
    }

    #[test]
    fn test_rejects_missing_namespace() {
        assert_eq!(
            ModelId::parse("gpt2"),
            Err(SnippetError::InvalidModel("gpt2".to_string()))
        );
        assert!(ModelId::parse("a/b/c").is_err());
    }

    #[test]
    fn test_placeholder_alias_display() {
        let alias = ModelAlias::Placeholder {
            provider: "together".to_string(),
            canonical: "meta-llama/Llama-3.1-8B-Instruct".to_string(),
        };
        assert!(alias.is_placeholder());
        assert_eq!(
            alias.to_string(),
            "<together alias for meta-llama/Llama-3.1-8B-Instruct>"
        );
    }
}
