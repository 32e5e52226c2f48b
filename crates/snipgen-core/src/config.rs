use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Engine defaults, optionally read from ~/.snipgen/config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the routing layer.
    pub router_url: String,
    /// Token literal used when the variant does not name one.
    pub default_token: String,
    /// Environment variable holding a Hugging Face token.
    pub hf_token_env: String,
    pub bill_to_header: String,
    /// `max_tokens` sent with chat requests.
    pub max_tokens: i64,
    /// provider -> canonical model id -> provider model id
    pub model_aliases: BTreeMap<String, BTreeMap<String, String>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            router_url: "https://router.huggingface.co".to_string(),
            default_token: "api_token".to_string(),
            hf_token_env: "HF_TOKEN".to_string(),
            bill_to_header: "X-HF-Bill-To".to_string(),
            max_tokens: 500,
            model_aliases: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    /// Known provider alias for a canonical model id.
    pub fn known_alias(&self, provider: &str, canonical: &str) -> Option<&str> {
        self.model_aliases
            .get(provider)
            .and_then(|models| models.get(canonical))
            .map(String::as_str)
    }

    /// Register a known alias.
    pub fn with_alias(
        mut self,
        provider: impl Into<String>,
        canonical: impl Into<String>,
        alias: impl Into<String>,
    ) -> Self {
        self.model_aliases
            .entry(provider.into())
            .or_default()
            .insert(canonical.into(), alias.into());
        self
    }

    /// Router URL without a trailing slash.
    pub fn router(&self) -> &str {
        self.router_url.trim_end_matches('/')
    }
}

/// Location of the engine config file
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".snipgen");
        path.push("config.json");
        Self { path }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the config, or the defaults when no file exists.
    ///
    /// A file that exists but cannot be parsed is an error rather than a silent fallback.
    pub fn load(&self) -> Result<EngineConfig, ConfigError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no engine config, using defaults");
            return Ok(EngineConfig::default());
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, config: &EngineConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let parsed: EngineConfig = serde_json::from_str(r#"{"max_tokens": 1024}"#).unwrap();
        assert_eq!(parsed.max_tokens, 1024);
        assert_eq!(parsed.router_url, "https://router.huggingface.co");
        assert_eq!(parsed.default_token, "api_token");
        assert!(parsed.model_aliases.is_empty());
    }

    #[test]
    fn test_known_alias_lookup() {
        let config = EngineConfig::default().with_alias(
            "together",
            "meta-llama/Llama-3.1-8B-Instruct",
            "meta-llama/Meta-Llama-3.1-8B-Instruct-Turbo",
        );
        assert_eq!(
            config.known_alias("together", "meta-llama/Llama-3.1-8B-Instruct"),
            Some("meta-llama/Meta-Llama-3.1-8B-Instruct-Turbo")
        );
        assert!(config.known_alias("nebius", "meta-llama/Llama-3.1-8B-Instruct").is_none());
    }

    #[test]
    fn test_router_trims_trailing_slash() {
        let config = EngineConfig {
            router_url: "http://localhost:8080/".to_string(),
            ..EngineConfig::default()
        };
        assert_eq!(config.router(), "http://localhost:8080");
    }

    #[test]
    fn test_store_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("missing.json"));
        assert_eq!(store.load().unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::at(dir.path().join("nested").join("config.json"));
        let config = EngineConfig {
            default_token: "hf_xxx".to_string(),
            ..EngineConfig::default()
        };
        store.save(&config).unwrap();
        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_store_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        let err = ConfigStore::at(&path).load().unwrap_err();
        assert!(matches!(err, ConfigError::Serialization(_)));
    }
}
