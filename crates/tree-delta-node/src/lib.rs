//! [`Node`] — the tree-node value type shared by the diff report pipeline.
//!
//! A parsed hierarchical document (configuration tree, manifest, …) is a
//! tree of [`Node`] values. Mappings preserve key insertion order. Binary
//! scalars carry their base64 text payload; decoding is left to consumers
//! that actually need the raw bytes.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NodeError {
    #[error("compact JSON encoding failed: {0}")]
    Json(String),
}

/// One node of a parsed document tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Absent / null value
    Null,
    /// Boolean scalar
    Bool(bool),
    /// Numeric scalar (integer or float)
    Number(serde_json::Number),
    /// String scalar
    Str(String),
    /// Binary scalar, carried as its base64-encoded text payload
    Binary(String),
    /// Sequence of child nodes
    Sequence(Vec<Node>),
    /// Mapping with insertion-ordered keys
    Mapping(Vec<(String, Node)>),
}

impl Node {
    /// Human-readable type label for this node.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Number(_) => "number",
            Node::Str(_) => "string",
            Node::Binary(_) => "binary",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }

    /// Raw scalar text of this node, if it has one.
    ///
    /// Strings and binary payloads yield their text as-is, booleans and
    /// numbers their literal form. Null and container nodes have no raw
    /// scalar text; callers fall back to [`Node::to_compact_json`].
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            Node::Str(s) => Some(s.clone()),
            Node::Binary(b64) => Some(b64.clone()),
            Node::Bool(b) => Some(b.to_string()),
            Node::Number(n) => Some(n.to_string()),
            Node::Null | Node::Sequence(_) | Node::Mapping(_) => None,
        }
    }

    /// Order-preserving [`serde_json::Value`] projection of this subtree.
    ///
    /// Binary scalars project to their base64 string payload.
    pub fn to_json_value(&self) -> Value {
        match self {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Number(n) => Value::Number(n.clone()),
            Node::Str(s) => Value::String(s.clone()),
            Node::Binary(b64) => Value::String(b64.clone()),
            Node::Sequence(items) => {
                Value::Array(items.iter().map(Node::to_json_value).collect())
            }
            Node::Mapping(entries) => {
                let mut map = serde_json::Map::with_capacity(entries.len());
                for (key, value) in entries {
                    map.insert(key.clone(), value.to_json_value());
                }
                Value::Object(map)
            }
        }
    }

    /// Compact single-line JSON encoding of this subtree.
    ///
    /// `Null` encodes as the 4-character `null` token.
    pub fn to_compact_json(&self) -> Result<String, NodeError> {
        serde_json::to_string(&self.to_json_value()).map_err(|e| NodeError::Json(e.to_string()))
    }
}

impl From<Value> for Node {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n),
            Value::String(s) => Node::Str(s),
            Value::Array(arr) => Node::Sequence(arr.into_iter().map(Node::from).collect()),
            Value::Object(obj) => {
                Node::Mapping(obj.into_iter().map(|(k, v)| (k, Node::from(v))).collect())
            }
        }
    }
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        node.to_json_value()
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Str(s.to_string())
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Number(i.into())
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}
