//! Type namer & emitter: `Shape` → TypeScript interface declarations.
//!
//! Every object shape gets a name derived from the key it sits under
//! (`TypeName(key)`, or `TypeName(key) + "Item"` below an array). The first
//! object to claim a name is the one that gets declared. A later object under
//! the same name is not visited again: identical shapes are the same type
//! anyway, and different shapes are either dropped (`CollisionPolicy::Drop`)
//! or reported (`CollisionPolicy::Error`).
//!
//! Declarations come out sorted by name, so output depends only on the input.
use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::naming::{property_key, type_name_or};
use crate::shape::{PrimKind, Shape};

pub const DEFAULT_ROOT_NAME: &str = "Root";
/// Stand-in for keys with no alphanumeric characters.
pub const ANONYMOUS_NAME: &str = "Anonymous";
const ITEM_SUFFIX: &str = "Item";
const INDENT: &str = "  ";

/// What to do when two different object shapes compute the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Keep the first declaration, silently skip the later shape.
    #[default]
    Drop,
    /// Fail with `Error::NameCollision`.
    Error,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Emitter {
    policy: CollisionPolicy,
}

impl Emitter {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self { policy }
    }

    /// Emit all declarations reachable from `root`, which must be an object.
    pub fn emit(&self, root: &Shape, root_name: &str) -> Result<String> {
        let Shape::Object(fields) = root else {
            return Err(Error::InvalidRootShape { found: shape_kind(root) });
        };
        let mut table = DeclTable::new(self.policy);
        table.declare(&type_name_or(root_name, DEFAULT_ROOT_NAME), fields)?;
        Ok(table.into_string())
    }
}

/// `Emitter` with the default (drop) collision policy.
pub fn emit(root: &Shape, root_name: &str) -> Result<String> {
    Emitter::default().emit(root, root_name)
}

// ————————————————————————————————————————————————————————————————————————————
// DECLARATION TABLE
// ————————————————————————————————————————————————————————————————————————————

/// Call-local state: names already claimed and the text declared for each.
struct DeclTable<'a> {
    policy: CollisionPolicy,
    visited: HashMap<String, &'a IndexMap<String, Shape>>,
    decls: BTreeMap<String, String>,
}

impl<'a> DeclTable<'a> {
    fn new(policy: CollisionPolicy) -> Self {
        Self { policy, visited: HashMap::new(), decls: BTreeMap::new() }
    }

    fn declare(&mut self, name: &str, fields: &'a IndexMap<String, Shape>) -> Result<()> {
        if let Some(claimed) = self.visited.get(name) {
            if self.policy == CollisionPolicy::Error && *claimed != fields {
                return Err(Error::NameCollision { name: name.to_string() });
            }
            return Ok(());
        }
        // claim before descending so a nested reuse of `name` stops here
        self.visited.insert(name.to_string(), fields);

        let mut body = format!("export interface {name} {{\n");
        for (key, shape) in fields {
            let ty = self.field_type(key, shape)?;
            body.push_str(&format!("{INDENT}{}: {ty};\n", property_key(key)));
        }
        body.push_str("}\n\n");

        self.decls.insert(name.to_string(), body);
        Ok(())
    }

    fn field_type(&mut self, key: &str, shape: &'a Shape) -> Result<String> {
        match shape {
            Shape::Primitive(kind) => Ok(primitive_type(*kind).to_string()),
            Shape::UntypedArray => Ok("any[]".to_string()),
            Shape::Array(item) => Ok(format!("{}[]", self.item_type(key, item)?)),
            Shape::Object(fields) => {
                let name = type_name_or(key, ANONYMOUS_NAME);
                self.declare(&name, fields)?;
                Ok(name)
            }
        }
    }

    /// Element type of an array under `key`; objects here are `<Key>Item`.
    fn item_type(&mut self, key: &str, item: &'a Shape) -> Result<String> {
        match item {
            Shape::Object(fields) => {
                let name = format!("{}{ITEM_SUFFIX}", type_name_or(key, ANONYMOUS_NAME));
                self.declare(&name, fields)?;
                Ok(name)
            }
            other => self.field_type(key, other),
        }
    }

    fn into_string(self) -> String {
        self.decls.into_values().collect()
    }
}

fn primitive_type(kind: PrimKind) -> &'static str {
    match kind {
        PrimKind::Null => "null",
        PrimKind::String => "string",
        PrimKind::Number => "number",
        PrimKind::Boolean => "boolean",
        PrimKind::Date => "Date",
    }
}

fn shape_kind(shape: &Shape) -> &'static str {
    match shape {
        Shape::Primitive(PrimKind::Null) => "null",
        Shape::Primitive(PrimKind::String | PrimKind::Date) => "string",
        Shape::Primitive(PrimKind::Number) => "number",
        Shape::Primitive(PrimKind::Boolean) => "boolean",
        Shape::UntypedArray | Shape::Array(_) => "array",
        Shape::Object(_) => "object",
    }
}

// ------------------------------- Tests ------------------------------------ //
