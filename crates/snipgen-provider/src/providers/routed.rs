//! Generic table-driven provider.
//!
//! Most third-party providers differ only in their host, key variable and a handful
//! of endpoint paths. A [`RoutedProvider`] is configured with an ordered route table;
//! the first route matching a task decides the path and body shape.

use snipgen_core::{Literal, Task, TaskFamily};

use crate::traits::{AuthScheme, BodyContext, Capabilities, FileInputs, Provider};

/// Which tasks a route serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
    Family(TaskFamily),
    Task(&'static str),
}

impl RouteMatch {
    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::Family(family) => task.family == *family,
            Self::Task(id) => task.id == *id,
        }
    }
}

/// Body shape of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStyle {
    /// OpenAI chat completion body.
    Chat,
    /// `{"model": ..., "<field>": text}`
    Field(&'static str),
    /// `{"<field>": text}` with the model carried in the path.
    Bare(&'static str),
    /// `{"<wrapper>": {"<field>": text}}` with the model carried in the path.
    Wrapped {
        wrapper: &'static str,
        field: &'static str,
    },
}

/// One endpoint. `{model}` in `path` is replaced by the wire model id.
#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub matcher: RouteMatch,
    pub path: &'static str,
    pub body: BodyStyle,
}

impl Route {
    pub const fn chat(path: &'static str) -> Self {
        Self {
            matcher: RouteMatch::Family(TaskFamily::Conversational),
            path,
            body: BodyStyle::Chat,
        }
    }

    pub const fn task(id: &'static str, path: &'static str, body: BodyStyle) -> Self {
        Self {
            matcher: RouteMatch::Task(id),
            path,
            body,
        }
    }
}

/// Configuration for a table-driven provider.
#[derive(Debug, Clone)]
pub struct RoutedConfig {
    pub id: &'static str,
    pub capabilities: Capabilities,
    pub routes: &'static [Route],
}

impl RoutedConfig {
    /// Capabilities of a direct-capable OpenAI-style vendor.
    pub const fn vendor(
        families: &'static [TaskFamily],
        host: &'static str,
        key_env: &'static str,
    ) -> Capabilities {
        Capabilities {
            families,
            extra_tasks: &[],
            excluded_tasks: &[],
            router_only: false,
            direct_host: Some(host),
            key_env: Some(key_env),
            key_auth: AuthScheme::Bearer,
            streaming: true,
            custom_base_url: true,
            native_sdk: false,
            file_inputs: FileInputs::AsTask,
            binary_media: false,
            extra_headers: &[],
        }
    }
}

/// A provider described entirely by its [`RoutedConfig`].
#[derive(Debug, Clone)]
pub struct RoutedProvider {
    config: RoutedConfig,
}

impl RoutedProvider {
    pub fn new(config: RoutedConfig) -> Self {
        Self { config }
    }

    fn find_route(&self, task: &Task) -> Option<&Route> {
        self.config
            .routes
            .iter()
            .find(|route| route.matcher.matches(task))
    }
}

impl Provider for RoutedProvider {
    fn id(&self) -> &str {
        self.config.id
    }

    fn capabilities(&self) -> &Capabilities {
        &self.config.capabilities
    }

    fn route(&self, task: &Task, model: &str) -> Option<String> {
        let route = self.find_route(task)?;
        if !matches!(route.body, BodyStyle::Chat) && task.prompt_text().is_none() {
            return None;
        }
        Some(route.path.replace("{model}", model))
    }

    fn body(&self, ctx: &BodyContext<'_>) -> Vec<(String, Literal)> {
        let Some(route) = self.find_route(ctx.task) else {
            return Vec::new();
        };
        match route.body {
            BodyStyle::Chat => ctx.chat_body(),
            BodyStyle::Field(field) => vec![
                ("model".to_string(), Literal::str(ctx.model)),
                (field.to_string(), ctx.text()),
            ],
            BodyStyle::Bare(field) => vec![(field.to_string(), ctx.text())],
            BodyStyle::Wrapped { wrapper, field } => vec![(
                wrapper.to_string(),
                Literal::dict([(field, ctx.text())]),
            )],
        }
    }
}
