//! Structural normalizer: JSON value → canonical `Shape`.
//!
//! One value in, one shape tree out. Primitives map to their kind, strings
//! with a leading `YYYY-MM-DD` become dates, empty arrays stay untyped and
//! non-empty arrays take their element shape from the *first* element only.
//! Later elements are never inspected, so `[1, "a"]` is `number[]`.
//!
//! `normalize` is total. Input that arrives from outside the process should
//! go through `normalize_with`, which rejects documents past the configured
//! nesting and width limits before any recursion happens.
pub mod date;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::shape::{PrimKind, Shape};

// ------------------------------- Policy ---------------------------------- //

pub const DEFAULT_MAX_DEPTH: usize = 64;
pub const DEFAULT_MAX_FIELDS: usize = 4096;

/// Resource bounds for untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum number of nested containers (objects/arrays), root included.
    pub max_depth: usize,
    /// Maximum number of keys in any single object.
    pub max_fields: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, max_fields: DEFAULT_MAX_FIELDS }
    }
}

impl Limits {
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn with_max_fields(mut self, fields: usize) -> Self {
        self.max_fields = fields;
        self
    }
}

// ------------------------------ Normalize -------------------------------- //

pub fn normalize(v: &Value) -> Shape {
    match v {
        Value::Null => Shape::Primitive(PrimKind::Null),
        Value::Bool(_) => Shape::Primitive(PrimKind::Boolean),
        Value::Number(_) => Shape::Primitive(PrimKind::Number),
        Value::String(s) if date::looks_like_date(s) => Shape::Primitive(PrimKind::Date),
        Value::String(_) => Shape::Primitive(PrimKind::String),
        Value::Array(xs) => match xs.first() {
            None => Shape::UntypedArray,
            Some(first) => Shape::Array(Box::new(normalize(first))),
        },
        Value::Object(m) => normalize_object(m),
    }
}

fn normalize_object(map: &Map<String, Value>) -> Shape {
    let fields: IndexMap<String, Shape> = map
        .iter()
        .map(|(k, v)| (k.clone(), normalize(v)))
        .collect();
    Shape::Object(fields)
}

/// Bounded normalization: check limits first, then normalize.
pub fn normalize_with(v: &Value, limits: &Limits) -> Result<Shape> {
    check_limits(v, limits, 0)?;
    Ok(normalize(v))
}

/// Walks exactly what `normalize` will walk (all object fields, first array
/// element) and fails before descending past a limit.
fn check_limits(v: &Value, limits: &Limits, level: usize) -> Result<()> {
    match v {
        Value::Array(xs) => {
            if level >= limits.max_depth {
                return Err(Error::TooDeep { limit: limits.max_depth });
            }
            match xs.first() {
                Some(first) => check_limits(first, limits, level + 1),
                None => Ok(()),
            }
        }
        Value::Object(m) => {
            if level >= limits.max_depth {
                return Err(Error::TooDeep { limit: limits.max_depth });
            }
            if m.len() > limits.max_fields {
                return Err(Error::TooWide { fields: m.len(), limit: limits.max_fields });
            }
            m.values().try_for_each(|child| check_limits(child, limits, level + 1))
        }
        _ => Ok(()),
    }
}

// ------------------------------- Tests ------------------------------------ //
