// Structural type algebra for JSON-shaped data. No serde_json::Value here.
use indexmap::IndexMap;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimKind {
    Null,
    String,
    Number,      // no integer/float split
    Boolean,
    Date,        // string with a leading YYYY-MM-DD
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "of", rename_all = "snake_case")]
pub enum Shape {
    Primitive(PrimKind),
    UntypedArray,                    // `[]`, element shape unknown
    Array(Box<Shape>),               // element shape taken from the first element
    Object(IndexMap<String, Shape>), // source key order
}

impl Shape {
    /// Container nesting depth; scalars are 0, `{}` and `[]` are 1.
    pub fn depth(&self) -> usize {
        match self {
            Shape::Primitive(_) => 0,
            Shape::UntypedArray => 1,
            Shape::Array(item) => 1 + item.depth(),
            Shape::Object(fields) => 1 + fields.values().map(Shape::depth).max().unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_counts_container_levels() {
        let leaf = Shape::Primitive(PrimKind::Number);
        assert_eq!(leaf.depth(), 0);
        assert_eq!(Shape::UntypedArray.depth(), 1);

        let list = Shape::Array(Box::new(Shape::Array(Box::new(leaf.clone()))));
        assert_eq!(list.depth(), 2);

        let mut inner = IndexMap::new();
        inner.insert("x".to_string(), list);
        let mut outer = IndexMap::new();
        outer.insert("a".to_string(), leaf);
        outer.insert("b".to_string(), Shape::Object(inner));
        assert_eq!(Shape::Object(outer).depth(), 4);
        assert_eq!(Shape::Object(IndexMap::new()).depth(), 1);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let mut fields = IndexMap::new();
        fields.insert("when".to_string(), Shape::Primitive(PrimKind::Date));
        fields.insert("tags".to_string(), Shape::UntypedArray);
        let json = serde_json::to_value(Shape::Object(fields)).unwrap();
        assert_eq!(json, serde_json::json!({
            "kind": "object",
            "of": {
                "when": { "kind": "primitive", "of": "date" },
                "tags": { "kind": "untyped_array" }
            }
        }));
    }
}
