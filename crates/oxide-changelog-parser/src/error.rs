//! Error types for change-log readers.

use std::path::PathBuf;

use oxide_changelog_core::MaterializeError;

/// Errors that reject a change-log document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The first element is not the reserved root element.
    #[error("\"{expected}\" expected as root element, found \"{found}\"")]
    RootMismatch {
        /// The reserved root name.
        expected: &'static str,
        /// The name that was found instead.
        found: String,
    },

    /// A second top-level element followed the root.
    #[error("Unexpected element \"{0}\" after the root element")]
    MultipleRoots(String),

    /// An element was closed that was never opened.
    #[error("End of element without a matching start")]
    StackUnderflow,

    /// Non-whitespace text appeared outside the root element.
    #[error("Unexpected text outside the root element: '{0}'")]
    UnexpectedText(String),

    /// An attribute could not be read.
    #[error("Malformed attribute on element \"{element}\": {source}")]
    MalformedAttribute {
        /// The element carrying the attribute.
        element: String,
        /// The underlying failure.
        #[source]
        source: quick_xml::Error,
    },

    /// A YAML mapping key is not a scalar.
    #[error("Mapping keys must be scalars, found a {0}")]
    InvalidKey(&'static str),

    /// The document ended with elements still open.
    #[error("Document ended with {0} unclosed element(s)")]
    Unclosed(usize),

    /// The document contains no root element.
    #[error("Document is empty")]
    EmptyDocument,

    /// A name or text is not valid UTF-8.
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Markup error from the XML tokenizer.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Syntax error from the YAML loader.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// No reader handles this file.
    #[error("No change-log reader supports '{}'", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The change-log file could not be read.
    #[error("IO error reading '{}': {source}", path.display())]
    Io {
        /// The change-log file.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for change-log readers.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors raised while writing a change log.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// A property of the statement could not be read.
    #[error("Cannot serialize {statement} statement: {source}")]
    Property {
        /// Kind of the statement being written.
        statement: &'static str,
        /// The underlying failure.
        #[source]
        source: MaterializeError,
    },

    /// Markup error from the XML writer.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The output could not be written.
    #[error("IO error writing change log: {0}")]
    Io(#[from] std::io::Error),

    /// The written document is not valid UTF-8.
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
