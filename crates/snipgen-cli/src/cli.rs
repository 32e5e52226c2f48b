//! CLI argument and command definitions.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use snipgen_core::{
    ChatMessage, ClientId, CredentialKind, Language, SnippetError, TokenSource, Variant,
};
use snipgen_provider::ProviderSelection;

#[derive(Parser)]
#[command(name = "snipgen", version, about = "Inference API snippet generator")]
pub struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Engine config file (defaults to ~/.snipgen/config.json).
    #[arg(long, global = true, env = "SNIPGEN_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate snippets for one task, provider and model.
    Generate(GenerateArgs),

    /// List tasks, providers and clients.
    List {
        /// Print the listing as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Regenerate or verify the fixture corpus.
    Fixtures {
        /// Corpus root directory.
        #[arg(long)]
        dir: PathBuf,

        /// Verify instead of rewriting.
        #[arg(long)]
        check: bool,

        /// Restrict to these case names.
        #[arg(long = "case")]
        cases: Vec<String>,
    },
}

#[derive(Args)]
#[command(group(ArgGroup::new("env_source").args(["env_token", "optional_env_token"])))]
pub struct GenerateArgs {
    /// Task id (see `snipgen list`).
    #[arg(long)]
    pub task: String,

    /// Provider id, or `auto`.
    #[arg(long, default_value = "auto")]
    pub provider: ProviderSelection,

    /// Model id, optionally suffixed with `:provider`.
    #[arg(long)]
    pub model: String,

    /// Single client to render. Renders every client of `--language` when omitted.
    #[arg(long)]
    pub client: Option<String>,

    /// Snippet language (default: python). Disambiguates shared client names.
    #[arg(long)]
    pub language: Option<Language>,

    /// Stream chat completions.
    #[arg(long)]
    pub stream: bool,

    /// Inline this literal token.
    #[arg(long, conflicts_with_all = ["env_token", "optional_env_token"])]
    pub token: Option<String>,

    /// Read the token from a required environment variable.
    #[arg(long, conflicts_with = "optional_env_token")]
    pub env_token: bool,

    /// Read the token from an optional environment variable.
    #[arg(long)]
    pub optional_env_token: bool,

    /// Environment variable holding the token.
    #[arg(long, requires = "env_source")]
    pub token_var: Option<String>,

    /// Fallback for `--optional-env-token`.
    #[arg(long, requires = "optional_env_token")]
    pub token_default: Option<String>,

    /// Use a provider key and call the vendor directly.
    #[arg(long)]
    pub provider_key: bool,

    /// Custom base URL.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Organization billed for the request.
    #[arg(long)]
    pub bill_to: Option<String>,

    /// Local file replacing the sample input.
    #[arg(long)]
    pub input_file: Option<String>,

    /// Bind the model at client construction.
    #[arg(long)]
    pub bind_model: bool,

    /// Chat message as `role:content`, replacing the sample conversation. Repeatable.
    #[arg(long = "message", value_parser = parse_message)]
    pub messages: Vec<ChatMessage>,

    /// Sampling temperature for chat completions.
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Nucleus sampling for chat completions.
    #[arg(long)]
    pub top_p: Option<f64>,

    /// Completion token limit, overriding the configured default.
    #[arg(long)]
    pub max_tokens: Option<i64>,

    /// Print snippets as JSON.
    #[arg(long)]
    pub json: bool,
}

fn parse_message(value: &str) -> Result<ChatMessage, String> {
    match value.split_once(':') {
        Some((role, content)) if !role.trim().is_empty() => {
            Ok(ChatMessage::new(role.trim(), content.trim_start()))
        }
        _ => Err(format!("expected 'role:content', got '{value}'")),
    }
}

impl GenerateArgs {
    /// Language of the requested snippets.
    pub fn language(&self) -> Language {
        match (self.language, &self.client) {
            (Some(language), _) => language,
            (None, Some(name)) => ClientId::find(name, None)
                .map(|client| client.language())
                .unwrap_or(Language::Python),
            (None, None) => Language::Python,
        }
    }

    /// The single client requested, resolved within `--language` when given.
    pub fn client(&self) -> Result<Option<ClientId>, SnippetError> {
        self.client
            .as_deref()
            .map(|name| ClientId::find(name, self.language))
            .transpose()
    }

    pub fn variant(&self) -> Variant {
        let token = if let Some(value) = &self.token {
            TokenSource::Literal {
                value: value.clone(),
            }
        } else if self.env_token {
            TokenSource::RequiredEnv {
                var: self.token_var.clone(),
            }
        } else if self.optional_env_token {
            TokenSource::OptionalEnv {
                var: self.token_var.clone(),
                default: self.token_default.clone(),
            }
        } else {
            TokenSource::Placeholder
        };
        let credential = if self.provider_key {
            CredentialKind::ProviderKey
        } else {
            CredentialKind::HuggingFace
        };
        Variant {
            token,
            credential,
            base_url: self.base_url.clone(),
            bill_to: self.bill_to.clone(),
            streaming: self.stream,
            input_file: self.input_file.clone(),
            bind_model: self.bind_model,
            messages: (!self.messages.is_empty()).then(|| self.messages.clone()),
            temperature: self.temperature,
            top_p: self.top_p,
            max_tokens: self.max_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(args: &[&str]) -> GenerateArgs {
        let argv = ["snipgen", "generate"].iter().chain(args.iter()).copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Generate(args) => args,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_defaults() {
        let args = generate(&["--task", "conversational", "--model", "org/m"]);
        assert_eq!(args.provider, ProviderSelection::Auto);
        assert_eq!(args.language(), Language::Python);
        assert_eq!(args.client().unwrap(), None);
        assert_eq!(args.variant(), Variant::new());
    }

    #[test]
    fn test_variant_flags() {
        let args = generate(&[
            "--task",
            "conversational",
            "--model",
            "org/m",
            "--provider",
            "together",
            "--client",
            "curl",
            "--stream",
            "--optional-env-token",
            "--token-default",
            "hf_xxx",
            "--bill-to",
            "huggingface",
        ]);
        assert_eq!(args.client().unwrap(), Some(ClientId::Curl));
        assert_eq!(args.language(), Language::Sh);
        let variant = args.variant();
        assert!(variant.streaming);
        assert_eq!(variant.bill_to.as_deref(), Some("huggingface"));
        assert_eq!(
            variant.token,
            TokenSource::OptionalEnv {
                var: None,
                default: Some("hf_xxx".to_string())
            }
        );
    }

    #[test]
    fn test_token_flags_conflict() {
        let argv = [
            "snipgen", "generate", "--task", "t", "--model", "o/m", "--token", "x", "--env-token",
        ];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_unknown_client_rejected() {
        let args = generate(&["--task", "t", "--model", "o/m", "--client", "httpie"]);
        assert_eq!(
            args.client().unwrap_err(),
            SnippetError::UnknownClient("httpie".to_string())
        );
    }

    #[test]
    fn test_shared_client_name_follows_language() {
        let args = generate(&["--task", "t", "--model", "o/m", "--client", "openai"]);
        assert_eq!(args.client().unwrap(), Some(ClientId::OpenAi));
        let args = generate(&[
            "--task", "t", "--model", "o/m", "--client", "openai", "--language", "js",
        ]);
        assert_eq!(args.client().unwrap(), Some(ClientId::OpenAiJs));
        assert_eq!(args.language(), Language::Js);
    }

    #[test]
    fn test_token_var_needs_env_source() {
        let argv = [
            "snipgen", "generate", "--task", "t", "--model", "o/m", "--token-var", "MY_TOKEN",
        ];
        assert!(Cli::try_parse_from(argv).is_err());

        let args = generate(&[
            "--task", "t", "--model", "o/m", "--token-var", "MY_TOKEN", "--env-token",
        ]);
        assert_eq!(
            args.variant().token,
            TokenSource::RequiredEnv {
                var: Some("MY_TOKEN".to_string())
            }
        );
    }

    #[test]
    fn test_chat_option_flags() {
        let args = generate(&[
            "--task",
            "conversational",
            "--model",
            "org/m",
            "--message",
            "system:Be brief.",
            "--message",
            "user: Hello",
            "--temperature",
            "0.5",
            "--max-tokens",
            "64",
        ]);
        let variant = args.variant();
        assert_eq!(
            variant.messages,
            Some(vec![
                ChatMessage::new("system", "Be brief."),
                ChatMessage::new("user", "Hello"),
            ])
        );
        assert_eq!(variant.temperature, Some(0.5));
        assert_eq!(variant.max_tokens, Some(64));
        assert!(variant.top_p.is_none());

        let argv = [
            "snipgen", "generate", "--task", "t", "--model", "o/m", "--message", "no-role",
        ];
        assert!(Cli::try_parse_from(argv).is_err());
    }
}
