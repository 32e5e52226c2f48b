//! Error types for the snipgen-core crate.

/// Errors surfaced by snippet generation.
///
/// Every failure is deterministic for a given input: the engine performs no I/O
/// while generating, so nothing here is transient or worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnippetError {
    /// Task identifier is not registered
    #[error("Unknown task '{0}'")]
    UnknownTask(String),

    /// Provider identifier is not registered
    #[error("Unknown provider '{0}'")]
    UnknownProvider(String),

    /// Client identifier is not registered
    #[error("Unknown client '{0}'")]
    UnknownClient(String),

    /// Valid identifiers, but the client or provider cannot express the request
    #[error("Unsupported combination (task={task}, provider={provider}, client={client}): {reason}")]
    UnsupportedCombination {
        task: String,
        provider: String,
        client: String,
        reason: String,
    },

    /// Model identifier is not of the `namespace/name` form
    #[error("Invalid model id '{0}': expected 'namespace/name'")]
    InvalidModel(String),
}

impl SnippetError {
    /// Build an [`SnippetError::UnsupportedCombination`].
    pub fn unsupported(
        task: impl Into<String>,
        provider: impl Into<String>,
        client: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnsupportedCombination {
            task: task.into(),
            provider: provider.into(),
            client: client.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error is a structured refusal rather than a bad identifier.
    ///
    /// Build tools iterating over the full cross-product skip these.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::UnsupportedCombination { .. })
    }
}

/// Errors that can occur while loading an engine configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
