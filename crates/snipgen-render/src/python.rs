//! Shared building blocks for Python snippets.

use std::collections::BTreeSet;

use snipgen_core::literal::{dict_entries, quote};
use snipgen_core::{Credential, DataUri, Dialect, HeaderValue, Headers, Literal, OutputKind};

/// Import section: standard library modules sorted first, then third-party lines.
#[derive(Debug, Default)]
pub struct Imports {
    stdlib: BTreeSet<&'static str>,
    third_party: Vec<String>,
}

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    /// `import <module>` for a standard library module.
    pub fn stdlib(&mut self, module: &'static str) {
        self.stdlib.insert(module);
    }

    /// A third-party import line, kept in insertion order.
    pub fn third_party(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !self.third_party.contains(&line) {
            self.third_party.push(line);
        }
    }

    pub fn render(&self) -> String {
        self.stdlib
            .iter()
            .map(|module| format!("import {module}"))
            .chain(self.third_party.iter().cloned())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Python expression for an environment lookup, string arguments rendered by `q`.
fn env_lookup(var: &str, required: bool, default: Option<&str>, q: fn(&str) -> String) -> String {
    match (required, default) {
        (true, _) => format!("os.environ[{}]", q(var)),
        (false, None) => format!("os.getenv({})", q(var)),
        (false, Some(default)) => format!("os.getenv({}, {})", q(var), q(default)),
    }
}

/// Single-quoted form used inside a double-quoted f-string. Callers check [`fstring_safe`].
fn single_quoted(value: &str) -> String {
    format!("'{value}'")
}

/// Whether `value` can sit verbatim inside an f-string replacement field.
fn fstring_safe(value: &str) -> bool {
    !value
        .chars()
        .any(|c| matches!(c, '\'' | '"' | '\\' | '{' | '}') || c.is_control())
}

/// The credential as a standalone value (`api_key=...`, `key=...`).
pub fn credential(credential: &Credential, imports: &mut Imports) -> Literal {
    match credential {
        Credential::Literal(token) => Literal::str(token.clone()),
        Credential::Env {
            var,
            required,
            default,
        } => {
            imports.stdlib("os");
            Literal::expr(env_lookup(var, *required, default.as_deref(), quote))
        }
    }
}

/// A header value; environment credentials become f-strings, or a concatenation
/// when the variable name or default cannot sit inside one.
pub fn header_value(value: &HeaderValue, imports: &mut Imports) -> Literal {
    match value {
        HeaderValue::Text(text) => Literal::str(text.clone()),
        HeaderValue::Secret {
            prefix,
            credential: Credential::Literal(token),
        } => Literal::str(format!("{prefix}{token}")),
        HeaderValue::Secret {
            prefix,
            credential: env,
        } if prefix.is_empty() => credential(env, imports),
        HeaderValue::Secret {
            prefix,
            credential:
                Credential::Env {
                    var,
                    required,
                    default,
                },
        } => {
            imports.stdlib("os");
            let default = default.as_deref();
            if fstring_safe(prefix) && fstring_safe(var) && default.map_or(true, fstring_safe) {
                let lookup = env_lookup(var, *required, default, single_quoted);
                Literal::expr(format!("f{}", quote(&format!("{prefix}{{{lookup}}}"))))
            } else {
                let lookup = env_lookup(var, *required, default, quote);
                Literal::expr(format!("{} + {lookup}", quote(prefix)))
            }
        }
    }
}

/// Header entries as Python literals.
pub fn header_entries(headers: &Headers, imports: &mut Imports) -> Vec<(String, Literal)> {
    headers
        .iter()
        .map(|h| (h.name.clone(), header_value(&h.value, imports)))
        .collect()
}

/// A dict literal, inline for a single entry and one entry per line otherwise.
pub fn compact_dict(entries: &[(String, Literal)], indent: usize) -> String {
    match entries {
        [] => "{}".to_string(),
        [(key, value)] if !matches!(value, Literal::List(_) | Literal::Dict(_)) => {
            format!("{{{}: {}}}", quote(key), value.render(Dialect::Python))
        }
        _ => format!(
            "{{\n{}\n{}}}",
            dict_entries(entries, Dialect::Python, indent + 4, true),
            " ".repeat(indent)
        ),
    }
}

/// Lines reading each file into a base64 `data:` URI variable.
pub fn data_uri_prelude(uris: &[DataUri], imports: &mut Imports) -> Option<String> {
    if uris.is_empty() {
        return None;
    }
    imports.stdlib("base64");
    Some(
        uris.iter()
            .map(|uri| {
                let stem = uri.stem();
                format!(
                    "with open({path}, \"rb\") as {stem}_file:\n    {stem}_data = base64.b64encode({stem}_file.read()).decode(\"utf-8\")\n{var} = f\"data:{mime};base64,{{{stem}_data}}\"",
                    path = quote(&uri.path),
                    var = uri.var(),
                    mime = uri.mime,
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n"),
    )
}

/// Variable name for the value returned by a task call.
pub fn output_var(output: OutputKind) -> &'static str {
    match output {
        OutputKind::Image => "image",
        OutputKind::Audio => "audio",
        OutputKind::Video => "video",
        _ => "output",
    }
}

/// Lines showing how to use a binary media response held in `var`.
pub fn media_usage(output: OutputKind, var: &str) -> Option<String> {
    match output {
        OutputKind::Image => Some(format!(
            "# You can access the image with PIL.Image for example\nimport io\nfrom PIL import Image\nimage = Image.open(io.BytesIO({var}))"
        )),
        OutputKind::Audio => Some(format!(
            "# You can play the audio with IPython.display for example\nfrom IPython.display import Audio\nAudio({var})"
        )),
        OutputKind::Video => Some(format!(
            "with open(\"output.mp4\", \"wb\") as f:\n    f.write({var})"
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(required: bool, default: Option<&str>) -> Credential {
        Credential::Env {
            var: "HF_TOKEN".to_string(),
            required,
            default: default.map(str::to_string),
        }
    }

    #[test]
    fn test_imports_sort_stdlib_first() {
        let mut imports = Imports::new();
        imports.third_party("import requests");
        imports.stdlib("os");
        imports.stdlib("json");
        imports.stdlib("os");
        assert_eq!(imports.render(), "import json\nimport os\nimport requests");
    }

    #[test]
    fn test_credential_expressions() {
        let mut imports = Imports::new();
        assert_eq!(
            credential(&Credential::Literal("hf_xxx".to_string()), &mut imports),
            Literal::str("hf_xxx")
        );
        assert_eq!(imports.render(), "");
        assert_eq!(
            credential(&env(true, None), &mut imports),
            Literal::expr("os.environ[\"HF_TOKEN\"]")
        );
        assert_eq!(
            credential(&env(false, Some("hf_xxx")), &mut imports),
            Literal::expr("os.getenv(\"HF_TOKEN\", \"hf_xxx\")")
        );
        assert_eq!(imports.render(), "import os");
    }

    #[test]
    fn test_bearer_header_from_env_is_fstring() {
        let mut imports = Imports::new();
        let value = HeaderValue::Secret {
            prefix: "Bearer ".to_string(),
            credential: env(true, None),
        };
        assert_eq!(
            header_value(&value, &mut imports).render(Dialect::Python),
            "f\"Bearer {os.environ['HF_TOKEN']}\""
        );
    }

    #[test]
    fn test_env_default_with_quotes_is_escaped() {
        let mut imports = Imports::new();
        assert_eq!(
            credential(&env(false, Some("it's")), &mut imports),
            Literal::expr("os.getenv(\"HF_TOKEN\", \"it's\")")
        );
        assert_eq!(
            credential(&env(false, Some("\"")), &mut imports),
            Literal::expr(r#"os.getenv("HF_TOKEN", "\"")"#)
        );

        let bearer = |default: &str| HeaderValue::Secret {
            prefix: "Bearer ".to_string(),
            credential: env(false, Some(default)),
        };
        assert_eq!(
            header_value(&bearer("it's"), &mut imports).render(Dialect::Python),
            "\"Bearer \" + os.getenv(\"HF_TOKEN\", \"it's\")"
        );
        assert_eq!(
            header_value(&bearer("\""), &mut imports).render(Dialect::Python),
            r#""Bearer " + os.getenv("HF_TOKEN", "\"")"#
        );
        assert_eq!(
            header_value(&bearer("hf_xxx"), &mut imports).render(Dialect::Python),
            "f\"Bearer {os.getenv('HF_TOKEN', 'hf_xxx')}\""
        );
    }

    #[test]
    fn test_compact_dict() {
        let one = vec![("Authorization".to_string(), Literal::str("Bearer api_token"))];
        assert_eq!(
            compact_dict(&one, 0),
            "{\"Authorization\": \"Bearer api_token\"}"
        );
        let two = vec![
            ("Authorization".to_string(), Literal::str("Bearer api_token")),
            ("X-HF-Bill-To".to_string(), Literal::str("huggingface")),
        ];
        assert_eq!(
            compact_dict(&two, 0),
            "{\n    \"Authorization\": \"Bearer api_token\",\n    \"X-HF-Bill-To\": \"huggingface\",\n}"
        );
    }

    #[test]
    fn test_data_uri_prelude() {
        let mut imports = Imports::new();
        let uri = DataUri {
            path: "cat.png".to_string(),
            mime: "image/png".to_string(),
        };
        let prelude = data_uri_prelude(&[uri], &mut imports).unwrap();
        assert_eq!(
            prelude,
            "with open(\"cat.png\", \"rb\") as image_file:\n    image_data = base64.b64encode(image_file.read()).decode(\"utf-8\")\nimage_url = f\"data:image/png;base64,{image_data}\""
        );
        assert_eq!(imports.render(), "import base64");
    }
}
