use snipgen_compiler::Compiler;
use snipgen_core::{EngineConfig, Snippet};

use crate::cli::GenerateArgs;

pub fn run(args: &GenerateArgs, config: EngineConfig) -> anyhow::Result<()> {
    let compiler = Compiler::new(config);
    let variant = args.variant();

    let language = args.language();

    let snippets = match args.client()? {
        Some(client) => vec![compiler.compile(
            &args.task,
            &args.provider,
            &args.model,
            client,
            &variant,
        )?],
        None => compiler.compile_all(
            &args.task,
            &args.provider,
            &args.model,
            language,
            &variant,
        )?,
    };
    if snippets.is_empty() {
        anyhow::bail!(
            "No {} client supports {} on {}",
            language.as_str(),
            args.task,
            args.provider
        );
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snippets)?);
    } else {
        print!("{}", format_snippets(&snippets));
    }
    Ok(())
}

/// A lone snippet prints as-is; several are separated by their fixture names.
fn format_snippets(snippets: &[Snippet]) -> String {
    match snippets {
        [only] => format!("{}\n", only.content),
        _ => snippets
            .iter()
            .enumerate()
            .map(|(ordinal, snippet)| {
                format!(
                    "# --- {} ---\n{}\n",
                    snippet.fixture_file_name(ordinal),
                    snippet.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snipgen_core::{ClientId, Language};

    fn snippet(client: ClientId, content: &str) -> Snippet {
        Snippet {
            language: Language::Python,
            client,
            provider: "hf-inference".to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_single_snippet_is_bare() {
        let out = format_snippets(&[snippet(ClientId::Requests, "import requests")]);
        assert_eq!(out, "import requests\n");
    }

    #[test]
    fn test_multiple_snippets_are_labelled() {
        let out = format_snippets(&[
            snippet(ClientId::HuggingFaceHub, "a"),
            snippet(ClientId::Requests, "b"),
        ]);
        assert_eq!(
            out,
            "# --- 0.huggingface_hub.hf-inference.py ---\na\n\n# --- 1.requests.hf-inference.py ---\nb\n"
        );
    }
}
