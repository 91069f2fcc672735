//! JSON → TypeScript interface generator.
//!
//! Two stages: [`normalize`] reduces a parsed JSON value to a [`Shape`]
//! (primitive kind, array of one element shape, or ordered field map), and
//! [`emit`] names every object shape after the key it sits under and prints
//! one `export interface` per name, sorted by name.
//!
//! ```
//! let out = json_ts::json_str_to_typescript(
//!     r#"{"id": 1, "tags": ["a"], "owner": {"name": "x"}}"#,
//!     "my tool",
//!     &json_ts::Options::default(),
//! ).unwrap();
//! assert_eq!(out, "\
//! export interface MyTool {
//!   id: number;
//!   tags: string[];
//!   owner: Owner;
//! }
//!
//! export interface Owner {
//!   name: string;
//! }
//!
//! ");
//! ```
//!
//! Everything is call-local and synchronous: no global state, no I/O.
pub mod cli;
pub mod emit;
pub mod error;
pub mod jq_exec;
pub mod naming;
pub mod normalize;
pub mod path_de;
pub mod shape;

use serde_json::Value;

pub use emit::{CollisionPolicy, Emitter, DEFAULT_ROOT_NAME};
pub use error::{Error, Result};
pub use normalize::Limits;
pub use path_de::parse_json;
pub use shape::{PrimKind, Shape};

/// Knobs for one conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub limits: Limits,
    pub collision: CollisionPolicy,
}

impl Options {
    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    #[must_use]
    pub fn with_collision(mut self, collision: CollisionPolicy) -> Self {
        self.collision = collision;
        self
    }
}

/// Bounded normalization of a document whose root must be an object.
pub fn infer_shape(value: &Value, options: &Options) -> Result<Shape> {
    if !value.is_object() {
        return Err(Error::InvalidRootShape { found: error::json_kind(value) });
    }
    normalize::normalize_with(value, &options.limits)
}

pub fn json_to_typescript(value: &Value, root_name: &str, options: &Options) -> Result<String> {
    let shape = infer_shape(value, options)?;
    Emitter::new(options.collision).emit(&shape, root_name)
}

pub fn json_str_to_typescript(src: &str, root_name: &str, options: &Options) -> Result<String> {
    let value = parse_json(src)?;
    json_to_typescript(&value, root_name, options)
}
