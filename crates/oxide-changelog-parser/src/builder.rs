//! Event-driven construction of the node tree.
//!
//! Readers translate their source format into start, text, scalar and end
//! events. The builder keeps one frame per open element; a node is attached
//! to its parent only when its end event arrives, so a finished tree never
//! contains half-built nodes.

use oxide_changelog_core::node::{NodeValue, ParsedNode, ROOT_NODE_NAME};
use tracing::trace;

use crate::error::{ParseError, Result};

#[derive(Debug)]
struct Frame {
    node: ParsedNode,
    text: String,
}

/// Builds a [`ParsedNode`] tree from reader events.
#[derive(Debug, Default)]
pub struct NodeTreeBuilder {
    stack: Vec<Frame>,
    root: Option<ParsedNode>,
}

impl NodeTreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an element. Attributes become value-carrying children, in order.
    ///
    /// # Errors
    ///
    /// [`ParseError::RootMismatch`] if the first element is not the reserved
    /// root, [`ParseError::MultipleRoots`] for an element after the root closed.
    pub fn start_element<I, K, V>(&mut self, name: &str, attributes: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<NodeValue>,
    {
        if self.stack.is_empty() {
            if self.root.is_some() {
                return Err(ParseError::MultipleRoots(name.to_string()));
            }
            if name != ROOT_NODE_NAME {
                return Err(ParseError::RootMismatch {
                    expected: ROOT_NODE_NAME,
                    found: name.to_string(),
                });
            }
        }

        let mut node = ParsedNode::new(name);
        for (key, value) in attributes {
            node.add_child(ParsedNode::with_value(key, value));
        }
        trace!(name, depth = self.stack.len(), "start element");
        self.stack.push(Frame {
            node,
            text: String::new(),
        });
        Ok(())
    }

    /// Appends character data to the open element.
    ///
    /// # Errors
    ///
    /// [`ParseError::UnexpectedText`] for non-whitespace text outside the root.
    pub fn characters(&mut self, text: &str) -> Result<()> {
        match self.stack.last_mut() {
            Some(frame) => {
                frame.text.push_str(text);
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err(ParseError::UnexpectedText(text.trim().to_string())),
        }
    }

    /// Sets a typed value on the open element.
    ///
    /// # Errors
    ///
    /// [`ParseError::StackUnderflow`] if no element is open.
    pub fn scalar(&mut self, value: impl Into<NodeValue>) -> Result<()> {
        let frame = self.stack.last_mut().ok_or(ParseError::StackUnderflow)?;
        frame.node.set_value(value);
        Ok(())
    }

    /// Closes the open element and attaches it to its parent.
    ///
    /// # Errors
    ///
    /// [`ParseError::StackUnderflow`] if no element is open.
    pub fn end_element(&mut self) -> Result<()> {
        let Frame { mut node, text } = self.stack.pop().ok_or(ParseError::StackUnderflow)?;
        let text = text.trim();
        if !text.is_empty() {
            node.set_value(text);
        }
        trace!(name = node.name(), depth = self.stack.len(), "end element");
        match self.stack.last_mut() {
            Some(parent) => parent.node.add_child(node),
            None => self.root = Some(node),
        }
        Ok(())
    }

    /// Number of open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns the finished tree.
    ///
    /// # Errors
    ///
    /// [`ParseError::Unclosed`] if elements are still open,
    /// [`ParseError::EmptyDocument`] if no root was seen.
    pub fn finish(self) -> Result<ParsedNode> {
        if !self.stack.is_empty() {
            return Err(ParseError::Unclosed(self.stack.len()));
        }
        self.root.ok_or(ParseError::EmptyDocument)
    }
}
