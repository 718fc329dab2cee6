// File: src/schema/parser.rs
// Purpose: Compact field grammar
//
//   [key:] [*|?] type | placeholder | hint | label | default
//
// Every section is optional. A leading `*` marks the field required; a
// leading `?` is accepted and has no effect.

use once_cell::sync::Lazy;
use regex::Regex;

use super::field::FieldType;
use crate::error::SchemaError;

// Explicit key at the head of section 0, terminated by `:` or `=`
static KEY_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z0-9_][A-Za-z0-9_.\-]*)\s*[:=](.*)$").expect("key prefix pattern compiles")
});

/// Result of parsing one compact type string. Absent sections stay `None`
/// so that object entries and field defaults can fill them later.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompactSpec {
    pub key: Option<String>,
    pub required: bool,
    pub field_type: FieldType,
    pub placeholder: Option<String>,
    pub hint: Option<String>,
    pub label: Option<String>,
    pub default_value: Option<String>,
}

/// Parse a compact field string such as `"mail:*email|you@x.com|Work address"`.
///
/// Missing sections are never an error. The fifth section keeps any further
/// `|` characters so default values may contain pipes.
pub fn parse_type_str(text: &str) -> Result<CompactSpec, SchemaError> {
    let mut sections = text.splitn(5, '|');
    let head = sections.next().unwrap_or_default();

    let (key, rest) = match KEY_PREFIX.captures(head) {
        Some(caps) => (
            caps.get(1).map(|m| m.as_str().to_string()),
            caps.get(2).map_or("", |m| m.as_str()),
        ),
        None => (None, head),
    };

    let rest = rest.trim_start();
    let (required, token) = if let Some(token) = rest.strip_prefix('*') {
        (true, token)
    } else if let Some(token) = rest.strip_prefix('?') {
        // Accepted for compatibility, does not make the field optional or required
        (false, token)
    } else {
        (false, rest)
    };

    let field_type = parse_type_token(token.trim(), key.as_deref().unwrap_or(text))?;

    let mut section = || sections.next().filter(|s| !s.is_empty()).map(str::to_string);
    let placeholder = section();
    let hint = section();
    let label = section();
    let default_value = section();

    Ok(CompactSpec {
        key,
        required,
        field_type,
        placeholder,
        hint,
        label,
        default_value,
    })
}

/// Interpret a bare type token. `context` names the field in errors.
pub fn parse_type_token(token: &str, context: &str) -> Result<FieldType, SchemaError> {
    if token.len() >= 2 && token.starts_with('[') && token.ends_with(']') {
        let choices: Vec<String> = token[1..token.len() - 1]
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
        if choices.is_empty() {
            return Err(SchemaError::EmptyOptions {
                key: context.to_string(),
            });
        }
        return Ok(FieldType::Options { choices });
    }

    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        let rows = token.parse::<u32>().map_err(|_| SchemaError::InvalidRows {
            token: token.to_string(),
        })?;
        return Ok(FieldType::Textarea { rows });
    }

    Ok(match token {
        "" | "text" => FieldType::Text,
        "email" => FieldType::Email,
        "number" => FieldType::Number,
        "date" => FieldType::Date,
        "textarea" => FieldType::Textarea { rows: 3 },
        "$" | "£" => FieldType::Currency {
            symbol: token.to_string(),
        },
        other => FieldType::Input {
            tag: other.to_string(),
        },
    })
}

/// Turn a field key into a display label: separators become spaces and each
/// word is capitalised (`first_name` -> `First Name`).
pub fn humanize_key(key: &str) -> String {
    key.split(|c: char| c == '-' || c == '_' || c == '.' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
