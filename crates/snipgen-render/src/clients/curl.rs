//! Shell snippets using `curl`.

use once_cell::sync::Lazy;
use regex::Regex;
use snipgen_core::literal::dict_entries;
use snipgen_core::{
    ClientId, Credential, Dialect, HeaderValue, ResolvedRequest, SnippetError, Transport,
};

use crate::traits::{refuse, Renderer};

static SHELL_SAFE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_./:%+~@=-]+$").ok());

static SHELL_NAME: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").ok());

/// Single-quote `value` for a POSIX shell.
fn single_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// URLs made only of shell-safe characters are left bare.
fn shell_word(value: &str) -> String {
    let safe = SHELL_SAFE
        .as_ref()
        .is_some_and(|re| re.is_match(value));
    if safe {
        value.to_string()
    } else {
        single_quote(value)
    }
}

/// Escape `value` for a double-quoted word, including inside `${...}`.
fn double_quote_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '$' | '`' | '}') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// `$VAR`, or `${VAR:-default}` for an optional variable with a fallback.
/// `None` when `var` is not a shell variable name.
fn env_ref(var: &str, required: bool, default: Option<&str>) -> Option<String> {
    let valid = SHELL_NAME.as_ref().is_some_and(|re| re.is_match(var));
    if !valid {
        return None;
    }
    Some(match (required, default) {
        (false, Some(default)) => format!("${{{var}:-{}}}", double_quote_escape(default)),
        _ => format!("${var}"),
    })
}

fn header_arg(name: &str, value: &HeaderValue) -> Option<String> {
    Some(match value {
        HeaderValue::Text(text) => single_quote(&format!("{name}: {text}")),
        HeaderValue::Secret {
            prefix,
            credential: Credential::Literal(token),
        } => single_quote(&format!("{name}: {prefix}{token}")),
        HeaderValue::Secret {
            prefix,
            credential:
                Credential::Env {
                    var,
                    required,
                    default,
                },
        } => format!(
            "\"{}{}\"",
            double_quote_escape(&format!("{name}: {prefix}")),
            env_ref(var, *required, default.as_deref())?
        ),
    })
}

/// Renders `curl` invocations with one flag per line.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurlRenderer;

impl Renderer for CurlRenderer {
    fn client(&self) -> ClientId {
        ClientId::Curl
    }

    fn render(&self, request: &ResolvedRequest) -> Result<String, SnippetError> {
        if request.transport == Transport::Base64Json {
            return Err(refuse(request, "curl cannot base64-encode a file inline"));
        }
        if !request.data_uris.is_empty() {
            return Err(refuse(request, "curl cannot build data URIs"));
        }

        let mut parts = vec![format!("curl {}", shell_word(&request.url))];
        parts.push("    -X POST".to_string());
        for header in request.merged_headers().iter() {
            let arg = header_arg(&header.name, &header.value).ok_or_else(|| {
                refuse(request, "token variable is not a valid shell variable name")
            })?;
            parts.push(format!("    -H {arg}"));
        }
        match (request.transport, &request.input_file) {
            (Transport::RawBytes, Some(file)) => {
                parts.push(format!("    --data-binary {}", single_quote(&format!("@{}", file.path))));
            }
            _ => {
                let body = format!(
                    "{{\n{}\n    }}",
                    dict_entries(&request.body, Dialect::Json, 8, false)
                );
                parts.push(format!("    -d {}", single_quote(&body)));
            }
        }
        Ok(parts.join(" \\\n"))
    }
}
