//! The intermediate node tree produced by the marshaller.
//!
//! Objects are `BTreeMap`s, so keys serialize in lexicographic order and the
//! output is byte-for-byte deterministic.

use std::collections::BTreeMap;

use atrius_fhir_lib::JsonShape;
use serde::ser::{Serialize, Serializer};
use serde_json::Value;

/// A JSON object under construction.
pub type Tree = BTreeMap<String, Node>;

/// One node of the marshalled tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Padding inside parallel arrays
    Null,
    /// An encoded primitive token
    Primitive(Value),
    Composite(Tree),
    Array(Vec<Node>),
}

impl Node {
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn into_value(self) -> Value {
        match self {
            Node::Null => Value::Null,
            Node::Primitive(value) => value,
            Node::Composite(tree) => Value::Object(
                tree.into_iter()
                    .map(|(key, node)| (key, node.into_value()))
                    .collect(),
            ),
            Node::Array(items) => Value::Array(items.into_iter().map(Node::into_value).collect()),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Null => serializer.serialize_unit(),
            Node::Primitive(value) => value.serialize(serializer),
            Node::Composite(tree) => tree.serialize(serializer),
            Node::Array(items) => items.serialize(serializer),
        }
    }
}

/// Shape of a parsed JSON value.
pub fn shape_of(value: &Value) -> JsonShape {
    match value {
        Value::Null => JsonShape::Null,
        Value::Bool(_) => JsonShape::Boolean,
        Value::Number(_) => JsonShape::Number,
        Value::String(_) => JsonShape::String,
        Value::Array(_) => JsonShape::Array,
        Value::Object(_) => JsonShape::Object,
    }
}
