//! Error types for the snipgen-compiler crate.

use std::path::PathBuf;

use snipgen_core::SnippetError;

/// Errors raised while regenerating or checking the fixture corpus.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    /// Reading or writing a fixture failed
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The engine refused or failed to generate a case
    #[error("Generation failed for {case}: {source}")]
    Engine {
        case: String,
        #[source]
        source: SnippetError,
    },

    /// Unknown fixture case name
    #[error("Unknown fixture case: {0}")]
    UnknownCase(String),
}

impl FixtureError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
