//! Normalization of raw comparison payloads before they are parsed.
//!
//! The comparison backend returns markdown with its escapes left in place
//! (`\n` as two characters), sometimes wrapped in a JSON object. This module
//! turns either shape into plain document text.

use crate::markdown::trim_blank;
use serde_json::Value;

/// Response fields that may hold the markdown body, in lookup order
const RESPONSE_FIELDS: [&str; 6] = ["respmd", "markdown", "content", "data", "text", "response"];

/// Unescape a raw markdown string.
///
/// Literal `\n`, `\t` and `\"` sequences become newline, tab and quote;
/// any other backslash is dropped. The result is trimmed of whitespace and
/// any byte-order mark.
///
/// # Examples
///
/// ```
/// use eula_diff::sanitize::sanitize_markdown;
///
/// assert_eq!(sanitize_markdown(r#"  -old\n+new \"terms\"  "#), "-old\n+new \"terms\"");
/// ```
pub fn sanitize_markdown(input: &str) -> String {
    let unescaped = input
        .replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\\"", "\"");

    let mut sanitized = String::with_capacity(unescaped.len());
    let mut chars = unescaped.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' && !matches!(chars.peek(), Some('n' | 't' | '"')) {
            continue;
        }
        sanitized.push(c);
    }

    trim_blank(&sanitized).to_string()
}

/// Extract and sanitize the markdown body of a comparison API response.
///
/// A bare JSON string is used as-is. For objects, the first truthy field of
/// `respmd`, `markdown`, `content`, `data`, `text`, `response` wins; without
/// one, the first value of the response itself is used.
pub fn extract_markdown(response: &Value) -> String {
    if let Value::String(text) = response {
        return sanitize_markdown(text);
    }

    match RESPONSE_FIELDS
        .iter()
        .find_map(|field| response.get(field).filter(|v| is_truthy(v)).map(|v| (field, v)))
    {
        Some((field, value)) => {
            log::debug!("using response field '{field}'");
            sanitize_value(value)
        }
        None => {
            log::debug!("no known response field, sanitizing whole response");
            sanitize_value(response)
        }
    }
}

/// Sanitize a JSON value that should contain markdown
fn sanitize_value(value: &Value) -> String {
    let first = match value {
        Value::String(text) => return sanitize_markdown(text),
        Value::Object(map) => map.values().next(),
        Value::Array(items) => items.first(),
        _ => return String::new(),
    };

    match first {
        Some(Value::String(text)) => sanitize_markdown(text),
        _ => sanitize_markdown(&value.to_string()),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
