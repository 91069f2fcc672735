//! Error types for the JSON → TypeScript pipeline.
//!
//! Every failure is terminal for one conversion: no partial output is ever
//! returned alongside an error.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // ————————————————————————————————————————————————————————————————————————
    // INPUT
    // ————————————————————————————————————————————————————————————————————————
    #[error("invalid JSON at path {path}: {message}")]
    InvalidJson { path: String, message: String },

    #[error("JSON pointer {pointer} did not match any node")]
    PointerNotFound { pointer: String },

    #[error("jq filter failed: {message}")]
    Jq { message: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("bad input pattern: {message}")]
    Glob { message: String },

    // ————————————————————————————————————————————————————————————————————————
    // ENGINE
    // ————————————————————————————————————————————————————————————————————————
    #[error("root value must be an object, found {found}")]
    InvalidRootShape { found: &'static str },

    #[error("value nests deeper than the limit of {limit} levels")]
    TooDeep { limit: usize },

    #[error("object has {fields} fields, more than the limit of {limit}")]
    TooWide { fields: usize, limit: usize },

    #[error("two different object shapes both map to the type name `{name}`")]
    NameCollision { name: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Human name for the kind of a JSON value, used in error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
