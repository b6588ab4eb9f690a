//! Flat reference-array store with bounds-checked dereferencing
//!
//! The source page serializes its whole data model as one flat JSON array in
//! which complex structures hold integer indices into the same array instead
//! of inline children. This module wraps that array in a typed store: every
//! lookup is bounds-checked and every shape mismatch yields absence (`None`)
//! instead of a fault, so one malformed entry can never crash a decode.

use serde_json::Value;
use std::collections::HashMap;

/// One node of the flat payload array
///
/// Integers double as references: an `Int` used in reference position names
/// another node of the same store. Whether an integer is a literal or a
/// reference is decided by the consumer, never by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Node>),
    Map(HashMap<String, Node>),
}

impl Node {
    /// Interpret this node as a store index, if it is a non-negative integer
    pub fn as_ref_index(&self) -> Option<usize> {
        match self {
            Node::Int(i) => usize::try_from(*i).ok(),
            _ => None,
        }
    }

    /// Interpret this node as a number
    ///
    /// Accepts integer and float nodes as well as numeric strings; the source
    /// occasionally serializes prices as strings.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Int(i) => Some(*i as f64),
            Node::Float(f) => Some(*f),
            Node::Str(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Interpret this node as a string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this node is a mapping
    pub fn is_map(&self) -> bool {
        matches!(self, Node::Map(_))
    }
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(*b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Node::Float(f)
                } else {
                    Node::Null
                }
            }
            Value::String(s) => Node::Str(s.clone()),
            Value::Array(items) => Node::List(items.iter().map(Node::from).collect()),
            Value::Object(entries) => Node::Map(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), Node::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Read-only store over the flat payload array
///
/// Immutable and scoped to one decode call. All access goes through
/// bounds-checked lookups; out-of-range and wrong-typed references resolve
/// to `None`.
#[derive(Debug, Clone)]
pub struct FlatStore {
    nodes: Vec<Node>,
}

impl FlatStore {
    /// Create a store from already-converted nodes
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// Create a store from the parsed top-level JSON array
    pub fn from_values(values: &[Value]) -> Self {
        Self {
            nodes: values.iter().map(Node::from).collect(),
        }
    }

    /// Number of nodes in the store
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the store holds no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in position order, for scanning
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Bounds-checked node lookup
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Follow a node as a reference: valid only for in-range integer nodes
    pub fn deref(&self, node: &Node) -> Option<&Node> {
        self.get(node.as_ref_index()?)
    }

    /// Resolve a named field of a mapping node through exactly one
    /// dereference hop
    ///
    /// Returns `None` when the container is not a mapping, the field is
    /// missing, the stored field value is not an integer, or the integer is
    /// out of range. Deeper structures (e.g. record -> sector -> name) are
    /// resolved by composing calls, never by this primitive.
    pub fn resolve<'a>(&'a self, container: &Node, field: &str) -> Option<&'a Node> {
        match container {
            Node::Map(entries) => self.deref(entries.get(field)?),
            _ => None,
        }
    }
}

impl From<&[Value]> for FlatStore {
    fn from(values: &[Value]) -> Self {
        Self::from_values(values)
    }
}
