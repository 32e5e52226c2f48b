//! Shared building blocks for JavaScript snippets.

use snipgen_core::literal::{dict_entries, is_js_identifier, quote};
use snipgen_core::{Credential, DataUri, Dialect, HeaderValue, Headers, Literal, OutputKind};

pub const FS_IMPORT: &str = r#"import fs from "fs";"#;

/// ES module import lines, deduplicated, in insertion order.
#[derive(Debug, Default)]
pub struct Imports(Vec<String>);

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !self.0.contains(&line) {
            self.0.push(line);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn render(&self) -> String {
        self.0.join("\n")
    }
}

/// Escape text placed verbatim inside a template literal.
fn template_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '`' | '$') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `process.env.NAME`, bracketed when the name is not an identifier.
fn env_lookup(var: &str, default: Option<&str>) -> String {
    let lookup = if is_js_identifier(var) {
        format!("process.env.{var}")
    } else {
        format!("process.env[{}]", quote(var))
    };
    match default {
        Some(default) => format!("{lookup} ?? {}", quote(default)),
        None => lookup,
    }
}

/// The credential as a standalone value.
pub fn credential(credential: &Credential) -> Literal {
    match credential {
        Credential::Literal(token) => Literal::str(token.clone()),
        Credential::Env { var, default, .. } => {
            Literal::expr(env_lookup(var, default.as_deref()))
        }
    }
}

/// A header value; prefixed environment credentials become template literals.
pub fn header_value(value: &HeaderValue) -> Literal {
    match value {
        HeaderValue::Text(text) => Literal::str(text.clone()),
        HeaderValue::Secret {
            prefix,
            credential: Credential::Literal(token),
        } => Literal::str(format!("{prefix}{token}")),
        HeaderValue::Secret {
            prefix,
            credential: env,
        } if prefix.is_empty() => credential(env),
        HeaderValue::Secret {
            prefix,
            credential: Credential::Env { var, default, .. },
        } => Literal::expr(format!(
            "`{}${{{}}}`",
            template_escape(prefix),
            env_lookup(var, default.as_deref())
        )),
    }
}

pub fn header_entries(headers: &Headers) -> Vec<(String, Literal)> {
    headers
        .iter()
        .map(|h| (h.name.clone(), header_value(&h.value)))
        .collect()
}

/// An object literal whose closing brace sits at `indent`.
pub fn object(entries: &[(String, Literal)], indent: usize) -> String {
    if entries.is_empty() {
        return "{}".to_string();
    }
    format!(
        "{{\n{}\n{}}}",
        dict_entries(entries, Dialect::Js, indent + 4, true),
        " ".repeat(indent)
    )
}

/// Property access chain, `data.inputs.image` or `data["key"]`.
pub fn property_path(root: &str, keys: &[&str]) -> String {
    keys.iter().fold(root.to_string(), |acc, key| {
        if is_js_identifier(key) {
            format!("{acc}.{key}")
        } else {
            format!("{acc}[{}]", quote(key))
        }
    })
}

/// Constants holding each file as a base64 `data:` URI.
pub fn data_uri_prelude(uris: &[DataUri], imports: &mut Imports) -> Option<String> {
    if uris.is_empty() {
        return None;
    }
    imports.add(FS_IMPORT);
    Some(
        uris.iter()
            .map(|uri| {
                format!(
                    "const {var} = `data:{mime};base64,${{fs.readFileSync({path}).toString(\"base64\")}}`;",
                    var = uri.var(),
                    mime = template_escape(&uri.mime),
                    path = quote(&uri.path),
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Word for a media output, used in variable names and comments.
pub fn media_noun(output: OutputKind) -> Option<&'static str> {
    match output {
        OutputKind::Image => Some("image"),
        OutputKind::Audio => Some("audio"),
        OutputKind::Video => Some("video"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(var: &str, default: Option<&str>) -> Credential {
        Credential::Env {
            var: var.to_string(),
            required: false,
            default: default.map(str::to_string),
        }
    }

    #[test]
    fn test_imports_dedupe() {
        let mut imports = Imports::new();
        assert!(imports.is_empty());
        imports.add(FS_IMPORT);
        imports.add(r#"import { OpenAI } from "openai";"#);
        imports.add(FS_IMPORT);
        assert_eq!(
            imports.render(),
            "import fs from \"fs\";\nimport { OpenAI } from \"openai\";"
        );
    }

    #[test]
    fn test_env_credentials() {
        assert_eq!(
            credential(&env("HF_TOKEN", None)),
            Literal::expr("process.env.HF_TOKEN")
        );
        assert_eq!(
            credential(&env("MY-TOKEN", Some("it's"))),
            Literal::expr("process.env[\"MY-TOKEN\"] ?? \"it's\"")
        );
        assert_eq!(
            credential(&env("HF_TOKEN", Some("\""))),
            Literal::expr(r#"process.env.HF_TOKEN ?? "\"""#)
        );
    }

    #[test]
    fn test_bearer_header_from_env_is_template_literal() {
        let value = HeaderValue::Secret {
            prefix: "Bearer ".to_string(),
            credential: env("HF_TOKEN", None),
        };
        assert_eq!(
            header_value(&value).render(Dialect::Js),
            "`Bearer ${process.env.HF_TOKEN}`"
        );
    }

    #[test]
    fn test_property_path() {
        assert_eq!(property_path("data", &["inputs", "image"]), "data.inputs.image");
        assert_eq!(property_path("data", &["image-url"]), "data[\"image-url\"]");
    }

    #[test]
    fn test_data_uri_prelude() {
        let mut imports = Imports::new();
        let uri = DataUri {
            path: "cat.png".to_string(),
            mime: "image/png".to_string(),
        };
        assert_eq!(
            data_uri_prelude(&[uri], &mut imports).unwrap(),
            "const image_url = `data:image/png;base64,${fs.readFileSync(\"cat.png\").toString(\"base64\")}`;"
        );
        assert_eq!(imports.render(), FS_IMPORT);
    }
}
