// File: src/schema/mod.rs
// Purpose: Schema collections and their resolution into FieldSpecs

use indexmap::IndexMap;
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

pub mod field;
pub mod parser;

pub use field::{ChangeHook, FieldSpec, FieldType, Validator, DATE_PLACEHOLDER};
pub use parser::{humanize_key, parse_type_str, parse_type_token, CompactSpec};

use crate::error::SchemaError;

/// Explicit field descriptor. Every property is optional and wins over the
/// values parsed from `type_str`.
///
/// ```
/// use simpleform::FieldOverrides;
///
/// let postcode = FieldOverrides::new()
///     .type_str("*text|SW1A 1AA")
///     .error_text("Not a UK postcode")
///     .validate(|v| v.len() <= 8);
/// # let _ = postcode;
/// ```
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldOverrides {
    pub key: Option<String>,
    /// Compact string parsed first, before the other properties apply
    pub type_str: Option<String>,
    pub name: Option<String>,
    pub required: Option<bool>,
    /// Type token, read with the same rules as the compact grammar
    #[serde(rename = "type")]
    pub type_token: Option<String>,
    /// Choices; turns the field into an options field
    pub options: Option<Vec<String>>,
    /// Row count; turns the field into a textarea
    pub rows: Option<u32>,
    pub placeholder: Option<String>,
    pub hint: Option<String>,
    pub label: Option<String>,
    #[serde(alias = "default")]
    pub default_value: Option<String>,
    #[serde(alias = "error")]
    pub error_text: Option<String>,
    pub auto_complete: Option<String>,
    #[serde(skip)]
    pub validate: Option<Validator>,
    #[serde(skip)]
    pub on_change: Option<ChangeHook>,
}

impl FieldOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn type_str(mut self, text: impl Into<String>) -> Self {
        self.type_str = Some(text.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn options<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = Some(text.into());
        self
    }

    pub fn auto_complete(mut self, token: impl Into<String>) -> Self {
        self.auto_complete = Some(token.into());
        self
    }

    pub fn validate<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.validate = Some(Arc::new(predicate));
        self
    }

    pub fn on_change<F>(mut self, hook: F) -> Self
    where
        F: Fn(&str, &str) -> String + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(hook));
        self
    }
}

impl fmt::Debug for FieldOverrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldOverrides")
            .field("key", &self.key)
            .field("type_str", &self.type_str)
            .field("name", &self.name)
            .field("required", &self.required)
            .field("type_token", &self.type_token)
            .field("options", &self.options)
            .field("rows", &self.rows)
            .field("label", &self.label)
            .field("auto_complete", &self.auto_complete)
            .field("validate", &self.validate.is_some())
            .field("on_change", &self.on_change.is_some())
            .finish_non_exhaustive()
    }
}

/// One schema entry: a compact string or a descriptor object.
///
/// The shape is decided when the entry is built or deserialized.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaEntry {
    Compact(String),
    Object(FieldOverrides),
}

impl From<&str> for SchemaEntry {
    fn from(text: &str) -> Self {
        SchemaEntry::Compact(text.to_string())
    }
}

impl From<String> for SchemaEntry {
    fn from(text: String) -> Self {
        SchemaEntry::Compact(text)
    }
}

impl From<FieldOverrides> for SchemaEntry {
    fn from(overrides: FieldOverrides) -> Self {
        SchemaEntry::Object(overrides)
    }
}

impl SchemaEntry {
    /// Resolve into a spec. `fallback_key` is the mapping key, if any; a key
    /// written inside the entry wins over it.
    pub fn resolve(&self, id: usize, fallback_key: Option<&str>) -> Result<FieldSpec, SchemaError> {
        let (compact, overrides) = match self {
            SchemaEntry::Compact(text) => (parse_type_str(text), None),
            SchemaEntry::Object(obj) => (
                obj.type_str
                    .as_deref()
                    .map_or_else(|| Ok(CompactSpec::default()), parse_type_str),
                Some(obj),
            ),
        };
        let compact = compact.map_err(|e| with_key(e, fallback_key))?;

        let key = overrides
            .and_then(|o| o.key.clone())
            .or_else(|| compact.key.clone())
            .or_else(|| fallback_key.map(str::to_string))
            .ok_or(SchemaError::MissingKey { index: id })?;

        let mut field_type = compact.field_type;
        if let Some(obj) = overrides {
            if let Some(token) = obj.type_token.as_deref() {
                field_type = parse_type_token(token.trim(), &key)?;
            }
            if let Some(choices) = &obj.options {
                if choices.is_empty() {
                    return Err(SchemaError::EmptyOptions { key });
                }
                field_type = FieldType::Options {
                    choices: choices.clone(),
                };
            }
            if let Some(rows) = obj.rows {
                field_type = FieldType::Textarea { rows };
            }
        }

        let mut spec = FieldSpec::new(id, key, field_type);
        spec.required = compact.required;
        if let Some(placeholder) = compact.placeholder {
            spec.placeholder = placeholder;
        }
        spec.hint = compact.hint;
        if let Some(label) = compact.label {
            spec.label = label;
        }
        if let Some(value) = compact.default_value {
            spec.default_value = value;
        }

        if let Some(obj) = overrides {
            apply_overrides(&mut spec, obj);
        }

        Ok(spec)
    }
}

fn apply_overrides(spec: &mut FieldSpec, obj: &FieldOverrides) {
    if let Some(name) = &obj.name {
        spec.name = name.clone();
    }
    if let Some(required) = obj.required {
        spec.required = required;
    }
    if let Some(placeholder) = &obj.placeholder {
        spec.placeholder = placeholder.clone();
    }
    if obj.hint.is_some() {
        spec.hint = obj.hint.clone();
    }
    if let Some(label) = &obj.label {
        spec.label = label.clone();
    }
    if let Some(value) = &obj.default_value {
        spec.default_value = value.clone();
    }
    if obj.error_text.is_some() {
        spec.error_text = obj.error_text.clone();
    }
    if obj.auto_complete.is_some() {
        spec.auto_complete = obj.auto_complete.clone();
    }
    if obj.validate.is_some() {
        spec.validate = obj.validate.clone();
    }
    if obj.on_change.is_some() {
        spec.on_change = obj.on_change.clone();
    }
}

// Compact parse errors name the raw text; prefer the mapping key when known.
fn with_key(err: SchemaError, key: Option<&str>) -> SchemaError {
    match (err, key) {
        (SchemaError::EmptyOptions { .. }, Some(key)) => SchemaError::EmptyOptions {
            key: key.to_string(),
        },
        (err, _) => err,
    }
}

/// A whole form schema: an ordered mapping of key to entry, or an ordered
/// sequence of entries that carry their own keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Schema {
    Mapping(IndexMap<String, SchemaEntry>),
    Sequence(Vec<SchemaEntry>),
}

impl Default for Schema {
    fn default() -> Self {
        Schema::Mapping(IndexMap::new())
    }
}

impl Schema {
    /// Build a mapping schema from `(key, entry)` pairs, keeping their order
    pub fn from_pairs<I, K, E>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, E)>,
        K: Into<String>,
        E: Into<SchemaEntry>,
    {
        Schema::Mapping(
            pairs
                .into_iter()
                .map(|(k, e)| (k.into(), e.into()))
                .collect(),
        )
    }

    pub fn from_entries<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<SchemaEntry>,
    {
        Schema::Sequence(entries.into_iter().map(Into::into).collect())
    }

    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    /// TOML documents are tables, so only the mapping form is available
    pub fn from_toml_str(text: &str) -> Result<Self, SchemaError> {
        let mapping: IndexMap<String, SchemaEntry> = toml::from_str(text)?;
        Ok(Schema::Mapping(mapping))
    }

    /// Load a `.json` or `.toml` schema file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            _ => Err(SchemaError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Schema::Mapping(map) => map.len(),
            Schema::Sequence(seq) => seq.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve every entry in schema order. Field `id`s are positions.
    pub fn fields(&self) -> Result<Vec<FieldSpec>, SchemaError> {
        let specs = match self {
            Schema::Mapping(map) => map
                .iter()
                .enumerate()
                .map(|(id, (key, entry))| entry.resolve(id, Some(key)))
                .collect::<Result<Vec<_>, _>>()?,
            Schema::Sequence(seq) => seq
                .iter()
                .enumerate()
                .map(|(id, entry)| entry.resolve(id, None))
                .collect::<Result<Vec<_>, _>>()?,
        };

        let mut seen = HashSet::new();
        for spec in &specs {
            if !seen.insert(spec.key.as_str()) {
                return Err(SchemaError::DuplicateKey(spec.key.clone()));
            }
        }

        Ok(specs)
    }
}
