//! Format-neutral change-log node tree.
//!
//! Every supported source format is reduced to the same shape: elements become
//! [`ParsedNode`]s, attributes become value-carrying child nodes placed ahead of
//! element children, and trimmed text content becomes the node's own value.

use std::fmt;

use crate::value::Value;

/// Name of the root node every change log must start with.
pub const ROOT_NODE_NAME: &str = "databaseChangeLog";

/// A scalar carried by a node.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeValue {
    /// Text, always the case for markup sources.
    String(String),
    /// Boolean scalar.
    Bool(bool),
    /// Integer scalar.
    Integer(i64),
    /// Floating point scalar.
    Float(f64),
}

impl NodeValue {
    /// Converts into a dynamic [`Value`] for materialization.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::String(s) => Value::String(s.clone()),
            Self::Bool(b) => Value::Bool(*b),
            Self::Integer(n) => Value::Long(*n),
            Self::Float(n) => Value::Double(*n),
        }
    }

    /// Returns the text of a string scalar.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for NodeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Same rendering as the dynamic value so whole floats keep their ".0".
        write!(f, "{}", self.to_value())
    }
}

impl From<&str> for NodeValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for NodeValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<bool> for NodeValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for NodeValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for NodeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// One node of a parsed change log.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedNode {
    name: String,
    value: Option<NodeValue>,
    children: Vec<ParsedNode>,
}

impl ParsedNode {
    /// Creates a node with no value and no children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children: Vec::new(),
        }
    }

    /// Creates a leaf node carrying a value, the shape used for attributes.
    #[must_use]
    pub fn with_value(name: impl Into<String>, value: impl Into<NodeValue>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            children: Vec::new(),
        }
    }

    /// Node name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Node value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&NodeValue> {
        self.value.as_ref()
    }

    /// Sets the node value.
    pub fn set_value(&mut self, value: impl Into<NodeValue>) {
        self.value = Some(value.into());
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[ParsedNode] {
        &self.children
    }

    /// Appends a child.
    pub fn add_child(&mut self, child: ParsedNode) {
        self.children.push(child);
    }

    /// First child with this name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&ParsedNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Every child with this name, in order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ParsedNode> {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Value of the first child with this name.
    #[must_use]
    pub fn child_value(&self, name: &str) -> Option<&NodeValue> {
        self.child(name).and_then(ParsedNode::value)
    }

    /// Returns true for a node that only carries a value, such as an attribute.
    #[must_use]
    pub fn is_attribute_like(&self) -> bool {
        self.value.is_some() && self.children.is_empty()
    }

    /// Number of levels below and including this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(ParsedNode::depth).max().unwrap_or(0)
    }
}
