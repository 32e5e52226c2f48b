//! Source-level literals embedded into generated snippets.
//!
//! A [`Literal`] is a small value tree that renders the way `JSON.stringify(value, null, 4)`
//! lays data out: one entry per line, four-space indentation, no trailing commas inside
//! nested containers. The Python dialect swaps in `True`/`False`/`None`. The JavaScript
//! dialect writes object literals: identifier keys unquoted and a comma after every entry.
//! [`Literal::Expr`] is emitted verbatim so a payload can reference a variable defined
//! earlier in the snippet.

use std::fmt::Write as _;

/// Indentation step used by every renderer.
pub const INDENT: usize = 4;

/// Target syntax for a rendered literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Python literal syntax.
    Python,
    /// Plain JSON (used inside shell snippets).
    Json,
    /// JavaScript object literal syntax.
    Js,
}

impl Dialect {
    /// Whether every container entry carries its own comma.
    fn trailing_commas(&self) -> bool {
        matches!(self, Self::Js)
    }
}

/// A literal value inside a snippet.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    List(Vec<Literal>),
    /// Ordered mapping. Key order is preserved exactly as inserted.
    Dict(Vec<(String, Literal)>),
    /// Raw source expression (a variable name, an f-string, ...).
    Expr(String),
}

impl Literal {
    /// String literal.
    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Raw expression.
    pub fn expr(source: impl Into<String>) -> Self {
        Self::Expr(source.into())
    }

    /// Ordered dictionary from `(key, value)` pairs.
    pub fn dict<K: Into<String>>(entries: impl IntoIterator<Item = (K, Literal)>) -> Self {
        Self::Dict(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// List of string literals.
    pub fn str_list(items: &[&str]) -> Self {
        Self::List(items.iter().map(|s| Self::str(*s)).collect())
    }

    /// Returns the string content for [`Literal::Str`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Look up a value by key in a [`Literal::Dict`].
    pub fn get(&self, key: &str) -> Option<&Literal> {
        match self {
            Self::Dict(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    /// Whether the tree contains a [`Literal::Expr`] anywhere.
    pub fn has_expr(&self) -> bool {
        match self {
            Self::Expr(_) => true,
            Self::List(items) => items.iter().any(Literal::has_expr),
            Self::Dict(entries) => entries.iter().any(|(_, v)| v.has_expr()),
            _ => false,
        }
    }

    /// Render at indentation level zero.
    pub fn render(&self, dialect: Dialect) -> String {
        self.render_at(dialect, 0)
    }

    /// Render with nested lines indented relative to `indent`.
    ///
    /// The opening token is not indented: callers place it after a key or `=`.
    pub fn render_at(&self, dialect: Dialect, indent: usize) -> String {
        let mut out = String::new();
        self.write(&mut out, dialect, indent);
        out
    }

    fn write(&self, out: &mut String, dialect: Dialect, indent: usize) {
        match self {
            Self::Str(s) => out.push_str(&quote(s)),
            Self::Int(i) => {
                let _ = write!(out, "{i}");
            }
            Self::Float(f) => out.push_str(&format_float(*f)),
            Self::Bool(b) => out.push_str(match (dialect, b) {
                (Dialect::Python, true) => "True",
                (Dialect::Python, false) => "False",
                (_, true) => "true",
                (_, false) => "false",
            }),
            Self::Null => out.push_str(match dialect {
                Dialect::Python => "None",
                _ => "null",
            }),
            Self::Expr(e) => out.push_str(e),
            Self::List(items) if items.is_empty() => out.push_str("[]"),
            Self::List(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 && !dialect.trailing_commas() {
                        out.push(',');
                    }
                    out.push('\n');
                    pad(out, indent + INDENT);
                    item.write(out, dialect, indent + INDENT);
                    if dialect.trailing_commas() {
                        out.push(',');
                    }
                }
                out.push('\n');
                pad(out, indent);
                out.push(']');
            }
            Self::Dict(entries) if entries.is_empty() => out.push_str("{}"),
            Self::Dict(entries) => {
                out.push('{');
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 && !dialect.trailing_commas() {
                        out.push(',');
                    }
                    out.push('\n');
                    pad(out, indent + INDENT);
                    out.push_str(&object_key(key, dialect));
                    out.push_str(": ");
                    value.write(out, dialect, indent + INDENT);
                    if dialect.trailing_commas() {
                        out.push(',');
                    }
                }
                out.push('\n');
                pad(out, indent);
                out.push('}');
            }
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Render `"key": value` entries, one per line, each prefixed by `indent` spaces.
///
/// With `trailing_comma` every line ends with a comma, which is how Python payload
/// literals are written (`query({ ..., })`). Without it the entries form valid JSON.
pub fn dict_entries(
    entries: &[(String, Literal)],
    dialect: Dialect,
    indent: usize,
    trailing_comma: bool,
) -> String {
    let mut lines = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let mut line = String::new();
        pad(&mut line, indent);
        line.push_str(&object_key(key, dialect));
        line.push_str(": ");
        line.push_str(&value.render_at(dialect, indent));
        if trailing_comma {
            line.push(',');
        }
        lines.push(line);
    }
    if trailing_comma {
        lines.join("\n")
    } else {
        lines.join(",\n")
    }
}

/// Render Python keyword arguments (`key=value,`), one per line.
pub fn kwargs(entries: &[(String, Literal)], indent: usize) -> String {
    entries
        .iter()
        .map(|(key, value)| {
            let mut line = String::new();
            pad(&mut line, indent);
            let _ = write!(line, "{key}={},", value.render_at(Dialect::Python, indent));
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Quote a string with JSON escaping, which is also a valid Python string literal.
pub fn quote(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

/// Whether `value` is a valid JavaScript identifier (ASCII subset).
pub fn is_js_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// JavaScript keys are bare when they are identifiers; everything else is quoted.
fn object_key(key: &str, dialect: Dialect) -> String {
    if dialect == Dialect::Js && is_js_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn pad(out: &mut String, width: usize) {
    out.extend(std::iter::repeat(' ').take(width));
}
