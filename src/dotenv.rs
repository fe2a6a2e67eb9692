//! Line parser for `.env` files.
//!
//! Every physical line is parsed on its own, so a broken line never affects
//! its neighbours. A line is `KEY=VALUE`, optionally prefixed with `export `,
//! split on the first `=`. The value is kept as written apart from:
//!
//! - surrounding whitespace, which is trimmed
//! - one pair of matching outer quotes (`'...'` or `"..."`), which is removed
//! - `${NAME}` / `${NAME:-default}` references, which are expanded unless the
//!   value is single-quoted
//!
//! A bare `$NAME` is left alone, as are `#` characters inside a value.

use crate::env::EnvStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    /// Blank line or `#` comment.
    Ignored,
    /// No `=`, or nothing before it.
    Malformed,
    Pair { key: &'a str, value: Value<'a> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value<'a> {
    /// Unquoted or double-quoted, subject to `${NAME}` expansion.
    Expand(&'a str),
    /// Single-quoted, taken literally.
    Literal(&'a str),
}

pub fn parse_line(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Line::Ignored;
    }

    let line = line.strip_prefix("export ").map_or(line, str::trim_start);
    let Some((key, value)) = line.split_once('=') else {
        return Line::Malformed;
    };

    let key = key.trim();
    if key.is_empty() {
        return Line::Malformed;
    }

    Line::Pair {
        key,
        value: unquote(value.trim()),
    }
}

fn unquote(value: &str) -> Value<'_> {
    if value.len() >= 2 {
        if let Some(inner) = value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')) {
            return Value::Literal(inner);
        }
        if let Some(inner) = value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
            return Value::Expand(inner);
        }
    }
    // an unclosed quote is just part of the value
    Value::Expand(value)
}

impl Value<'_> {
    /// Resolves the value against what is already in `store`.
    ///
    /// Unknown names in `${NAME}` expand to the empty string.
    pub fn resolve(&self, store: &EnvStore) -> String {
        match *self {
            Value::Literal(raw) => raw.to_string(),
            Value::Expand(raw) => expand(raw, store),
        }
    }
}

fn expand(raw: &str, store: &EnvStore) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        out.push_str(&rest[..start]);

        let reference = &rest[start + 2..start + 2 + len];
        let (name, default) = match reference.split_once(":-") {
            Some((name, default)) => (name, Some(default)),
            None => (reference, None),
        };
        match (store.get(name), default) {
            (Some(found), _) => out.push_str(found),
            (None, Some(default)) => out.push_str(default),
            (None, None) => {}
        }

        rest = &rest[start + 3 + len..];
    }

    out.push_str(rest);
    out
}
