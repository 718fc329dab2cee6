//! Error types for schema loading and form events
//!
//! Field validation failures are never errors: they live in `FieldState`.
//! These types cover malformed schemas and events addressed to fields that
//! do not exist.

use std::path::PathBuf;
use thiserror::Error;

use crate::form::FieldId;

/// A schema could not be read or resolved into field specs.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("schema entry #{index} has no key (use `key:` in the type string or a `key` property)")]
    MissingKey { index: usize },

    #[error("duplicate field key `{0}`")]
    DuplicateKey(String),

    #[error("options field `{key}` lists no choices")]
    EmptyOptions { key: String },

    #[error("textarea row count `{token}` is out of range")]
    InvalidRows { token: String },

    #[error("failed to read schema file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported schema file extension: {0:?}")]
    UnsupportedFormat(PathBuf),

    #[error("invalid JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid TOML schema: {0}")]
    Toml(#[from] toml::de::Error),
}

/// An event referred to a field or option the form does not have.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("no field with id {0}")]
    UnknownField(FieldId),

    #[error("no field with key `{0}`")]
    UnknownKey(String),

    #[error("field `{0}` is not an options field")]
    NotOptions(String),

    #[error("field `{key}` has no option `{option}`")]
    UnknownOption { key: String, option: String },
}
