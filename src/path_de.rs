use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Error, Result};

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let mut de = serde_json::Deserializer::from_str(src);
    let value = serde_path_to_error::deserialize::<_, T>(&mut de).map_err(|err| {
        Error::InvalidJson {
            path: err.path().to_string(),
            message: err.into_inner().to_string(),
        }
    })?;
    // trailing non-whitespace is an error
    de.end().map_err(|err| Error::InvalidJson {
        path: ".".to_string(),
        message: err.to_string(),
    })?;
    Ok(value)
}

/// Parse a JSON document, keeping key order.
pub fn parse_json(src: &str) -> Result<Value> {
    from_str_with_path(src)
}
