//! snipgen-core: tasks, variants, literals, and the resolved request model.

pub mod config;
mod error;
pub mod literal;
pub mod model;
pub mod request;
pub mod snippet;
pub mod task;
pub mod task_registry;
pub mod variant;

pub use config::{ConfigStore, EngineConfig};
pub use error::{ConfigError, SnippetError};
pub use literal::{Dialect, Literal};
pub use model::{ModelAlias, ModelId};
pub use request::{
    ChatParams, Credential, DataUri, Header, HeaderValue, Headers, InputFile, ResolvedModel,
    ResolvedRequest, ResponseKind,
};
pub use snippet::{ClientId, Language, Snippet};
pub use task::{OutputKind, Task, TaskFamily, TaskInput, Transport};
pub use task_registry::TaskRegistry;
pub use variant::{ChatMessage, CredentialKind, TokenSource, Variant};
