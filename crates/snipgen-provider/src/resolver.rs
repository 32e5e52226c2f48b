//! Request resolution: (task, provider, client, variant) to a [`ResolvedRequest`].

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use snipgen_core::{
    ChatParams, ClientId, Credential, CredentialKind, DataUri, EngineConfig, HeaderValue, Headers, InputFile,
    Literal, ModelAlias, ModelId, ResolvedModel, ResolvedRequest, ResponseKind, SnippetError, Task,
    TokenSource, Transport, Variant,
};
use tracing::{debug, warn};

use crate::registry::{ProviderRegistry, AUTO_PROVIDER};
use crate::traits::{AuthScheme, BodyContext, FileInputs, Provider};

const CHAT_COMPLETIONS: &str = "/chat/completions";

/// Provider chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSelection {
    /// Let the router decide, optionally guided by a `model:provider` suffix.
    Auto,
    Named(String),
}

impl ProviderSelection {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Auto => AUTO_PROVIDER,
            Self::Named(id) => id,
        }
    }
}

impl FromStr for ProviderSelection {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.eq_ignore_ascii_case(AUTO_PROVIDER) {
            Self::Auto
        } else {
            Self::Named(s.to_string())
        })
    }
}

impl From<&str> for ProviderSelection {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(selection) => selection,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for ProviderSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a request is headed once the selection is settled.
struct Target {
    provider: Option<Arc<dyn Provider>>,
    label: String,
    explicit: bool,
    model: ModelId,
}

impl Target {
    /// Auto-selected chat goes through the router's provider-agnostic endpoint.
    fn is_generic_chat(&self, task: &Task) -> bool {
        !self.explicit && task.is_conversational()
    }
}

/// Resolves requests against a provider registry and engine defaults.
pub struct Resolver<'a> {
    registry: &'a ProviderRegistry,
    config: &'a EngineConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a ProviderRegistry, config: &'a EngineConfig) -> Self {
        Self { registry, config }
    }

    /// Resolve one request. Pure: identical inputs give identical descriptors.
    pub fn resolve(
        &self,
        task: &'static Task,
        selection: &ProviderSelection,
        model: &str,
        client: ClientId,
        variant: &Variant,
    ) -> Result<ResolvedRequest, SnippetError> {
        let target = self.select(task, selection, model)?;
        let refuse = |reason: String| {
            SnippetError::unsupported(task.id, target.label.as_str(), client.as_str(), reason)
        };

        self.check(task, &target, client, variant).map_err(refuse)?;

        let generic_chat = target.is_generic_chat(task);
        let caps = target.provider.as_ref().map(|p| *p.capabilities());
        let direct = variant.credential == CredentialKind::ProviderKey
            || client == ClientId::FalClient;

        let canonical = target.model.canonical().to_string();
        let as_given = target.model.as_given();
        let alias = match (&target.provider, generic_chat) {
            (Some(provider), false) => provider.alias(&canonical, self.config),
            _ => ModelAlias::Canonical(as_given.clone()),
        };
        let wire_model = alias.to_string();

        let custom_base_url = variant
            .base_url
            .as_deref()
            .map(|base| base.trim_end_matches('/').to_string());
        let url = match (&custom_base_url, &target.provider) {
            (Some(base), _) => format!("{base}{}", task.endpoint_suffix()),
            (None, _) if generic_chat => {
                format!("{}/v1{CHAT_COMPLETIONS}", self.config.router())
            }
            (None, Some(provider)) => {
                let route = provider
                    .route(task, &wire_model)
                    .ok_or_else(|| refuse("no endpoint for this task".to_string()))?;
                if direct {
                    let host = provider.capabilities().direct_host.ok_or_else(|| {
                        refuse("provider has no direct vendor host".to_string())
                    })?;
                    format!("{host}{route}")
                } else {
                    format!("{}/{}{}", self.config.router(), provider.id(), route)
                }
            }
            (None, None) => return Err(refuse("no provider to route to".to_string())),
        };
        let base_url = url
            .strip_suffix(CHAT_COMPLETIONS)
            .unwrap_or(&url)
            .to_string();

        let credential = self.credential(variant, caps.and_then(|c| c.key_env), direct);
        let scheme = match (&caps, direct) {
            (Some(caps), true) => caps.key_auth,
            _ => AuthScheme::Bearer,
        };
        let mut headers = Headers::new();
        let (auth_name, auth_value) = scheme.header(credential.clone());
        headers.insert(auth_name, auth_value);
        if let (Some(caps), false) = (&caps, generic_chat) {
            for (name, value) in caps.extra_headers {
                headers.merge_missing(*name, HeaderValue::Text(value.to_string()));
            }
        }
        if let Some(org) = &variant.bill_to {
            headers.merge_missing(
                self.config.bill_to_header.clone(),
                HeaderValue::Text(org.clone()),
            );
        }

        let inlines_files = caps.is_some_and(|c| c.file_inputs == FileInputs::DataUri);
        let input_file = task.sample_file().map(|sample| match &variant.input_file {
            Some(path) => InputFile::guess(path.clone()),
            None => InputFile {
                path: sample.path.to_string(),
                mime: sample.mime.to_string(),
            },
        });

        let mut data_uris = Vec::new();
        let mut image_override = None;
        if let (true, Some(path)) = (task.has_image_part(), &variant.input_file) {
            let uri = DataUri::new(&InputFile::guess(path.clone()));
            image_override = Some(Literal::expr(uri.var()));
            data_uris.push(uri);
        }
        let mut file_expr = None;
        if let (true, Some(file)) = (inlines_files, &input_file) {
            let uri = DataUri::new(file);
            file_expr = Some(Literal::expr(uri.var()));
            data_uris.push(uri);
        }

        let transport = if inlines_files || generic_chat {
            Transport::Json
        } else {
            task.transport
        };
        let content_type = match (&input_file, transport) {
            (Some(file), Transport::RawBytes) => file.mime.clone(),
            _ => "application/json".to_string(),
        };

        let messages = match &variant.messages {
            Some(custom) => Some(Literal::List(
                custom
                    .iter()
                    .map(|message| {
                        Literal::dict([
                            ("role", Literal::str(message.role.clone())),
                            ("content", Literal::str(message.content.clone())),
                        ])
                    })
                    .collect(),
            )),
            None => task.messages_literal(image_override.as_ref()),
        };
        let chat = ChatParams {
            temperature: variant.temperature,
            max_tokens: variant.max_tokens.unwrap_or(self.config.max_tokens),
            top_p: variant.top_p,
        };
        let ctx = BodyContext {
            task,
            model: &wire_model,
            messages: messages.clone(),
            inputs: task.inputs_literal(variant.input_file.as_deref()),
            parameters: task.parameters_literal(),
            file_expr,
            chat,
        };
        let mut body = match (&target.provider, client) {
            (Some(provider), ClientId::FalClient) => provider
                .native_arguments(&ctx)
                .ok_or_else(|| refuse("provider has no native SDK".to_string()))?,
            (Some(provider), _) if !generic_chat => provider.body(&ctx),
            _ => ctx.chat_body(),
        };
        if variant.streaming {
            body.push(("stream".to_string(), Literal::Bool(true)));
        }

        let response = if variant.streaming {
            ResponseKind::Stream
        } else if task.output.is_media() && caps.is_some_and(|c| c.binary_media) {
            ResponseKind::Bytes
        } else {
            ResponseKind::Json
        };

        debug!(
            task = task.id,
            provider = %target.label,
            client = client.as_str(),
            %url,
            direct,
            "resolved request"
        );

        Ok(ResolvedRequest {
            task,
            client,
            provider: target.label,
            explicit_provider: target.explicit,
            direct,
            custom_base_url,
            url,
            base_url,
            headers,
            content_type,
            transport,
            body,
            model: ResolvedModel {
                canonical,
                as_given,
                alias,
            },
            streaming: variant.streaming,
            credential,
            bill_to: variant.bill_to.clone(),
            bill_to_header: self.config.bill_to_header.clone(),
            messages,
            chat,
            input_file,
            data_uris,
            response,
            bind_model: variant.bind_model,
        })
    }

    /// Settle the provider and model from the selection and any `:provider` suffix.
    fn select(
        &self,
        task: &Task,
        selection: &ProviderSelection,
        model: &str,
    ) -> Result<Target, SnippetError> {
        let model = ModelId::parse(model)?;
        match selection {
            ProviderSelection::Named(id) => {
                let provider = self.registry.lookup(id)?;
                let model = match model.provider_suffix() {
                    Some(suffix) if suffix != id => {
                        warn!(
                            model = %model,
                            provider = %id,
                            "explicit provider overrides model suffix '{suffix}'"
                        );
                        model.without_suffix()
                    }
                    Some(_) => model.without_suffix(),
                    None => model,
                };
                Ok(Target {
                    label: id.clone(),
                    provider: Some(provider),
                    explicit: true,
                    model,
                })
            }
            ProviderSelection::Auto => {
                let provider = match model.provider_suffix() {
                    Some(suffix) => Some(self.registry.lookup(suffix)?),
                    None if task.is_conversational() => None,
                    None => Some(self.registry.lookup("hf-inference")?),
                };
                debug!(
                    model = %model,
                    provider = provider.as_ref().map(|p| p.id()).unwrap_or(AUTO_PROVIDER),
                    "auto provider selection"
                );
                Ok(Target {
                    label: AUTO_PROVIDER.to_string(),
                    provider,
                    explicit: false,
                    model,
                })
            }
        }
    }

    /// Structural checks. Returns the refusal reason.
    fn check(
        &self,
        task: &Task,
        target: &Target,
        client: ClientId,
        variant: &Variant,
    ) -> Result<(), String> {
        let caps = target.provider.as_ref().map(|p| p.capabilities());

        if client.is_chat_only() && !task.is_conversational() {
            return Err("the OpenAI client only serves chat completions".to_string());
        }
        if client == ClientId::FalClient && !caps.is_some_and(|c| c.native_sdk) {
            return Err("provider has no native SDK".to_string());
        }
        if let Some(provider) = &target.provider {
            if !provider.supports(task) {
                return Err(format!("{} does not serve {}", provider.id(), task.id));
            }
        }
        if variant.streaming {
            if !task.is_conversational() {
                return Err("streaming is only offered for conversational tasks".to_string());
            }
            if caps.is_some_and(|c| !c.streaming) {
                return Err("provider does not stream".to_string());
            }
        }
        if variant.credential == CredentialKind::ProviderKey {
            if !target.explicit {
                return Err("automatic provider selection needs a Hugging Face token".to_string());
            }
            if caps.is_some_and(|c| c.router_only) {
                return Err("provider is only reachable through the router".to_string());
            }
        }
        let direct =
            variant.credential == CredentialKind::ProviderKey || client == ClientId::FalClient;
        if variant.bill_to.is_some() && direct {
            return Err("billing applies to routed requests only".to_string());
        }
        if variant.base_url.is_some() {
            if client == ClientId::FalClient {
                return Err("the native SDK always talks to the vendor".to_string());
            }
            if caps.is_some_and(|c| !c.custom_base_url) {
                return Err("provider does not support a custom base URL".to_string());
            }
        }
        Self::check_chat_options(task, variant)?;
        if variant.input_file.is_some() && !task.has_file_input() && !task.has_image_part() {
            return Err("task takes no file input".to_string());
        }
        if client.is_raw_http()
            && task.transport == Transport::RawBytes
            && caps.is_some_and(|c| c.file_inputs == FileInputs::DataUri)
        {
            return Err("provider does not accept raw file bytes".to_string());
        }
        Ok(())
    }

    fn check_chat_options(task: &Task, variant: &Variant) -> Result<(), String> {
        if !variant.has_chat_options() {
            return Ok(());
        }
        if !task.is_conversational() {
            return Err("chat options apply to conversational tasks only".to_string());
        }
        if let Some(messages) = &variant.messages {
            if messages.is_empty() {
                return Err("custom messages must not be empty".to_string());
            }
            if variant.input_file.is_some() {
                return Err("custom messages carry no image to replace".to_string());
            }
        }
        if variant
            .temperature
            .is_some_and(|t| !t.is_finite() || t < 0.0)
        {
            return Err("temperature must be a non-negative number".to_string());
        }
        if variant
            .top_p
            .is_some_and(|p| !p.is_finite() || p <= 0.0 || p > 1.0)
        {
            return Err("top_p must be in (0, 1]".to_string());
        }
        if variant.max_tokens.is_some_and(|n| n <= 0) {
            return Err("max_tokens must be positive".to_string());
        }
        Ok(())
    }

    fn credential(&self, variant: &Variant, key_env: Option<&str>, direct: bool) -> Credential {
        let default_var = || match (direct, key_env) {
            (true, Some(var)) => var.to_string(),
            _ => self.config.hf_token_env.clone(),
        };
        match &variant.token {
            TokenSource::Placeholder => Credential::Literal(self.config.default_token.clone()),
            TokenSource::Literal { value } => Credential::Literal(value.clone()),
            TokenSource::RequiredEnv { var } => Credential::Env {
                var: var.clone().unwrap_or_else(default_var),
                required: true,
                default: None,
            },
            TokenSource::OptionalEnv { var, default } => Credential::Env {
                var: var.clone().unwrap_or_else(default_var),
                required: false,
                default: default.clone(),
            },
        }
    }
}
