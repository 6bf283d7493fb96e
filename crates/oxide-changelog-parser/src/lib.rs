//! # oxide-changelog-parser
//!
//! Change-log readers that turn XML and YAML documents into the
//! format-neutral node tree of `oxide-changelog-core`.
//!
//! Every reader drives the same [`NodeTreeBuilder`], so documents with the
//! same structure produce trees of the same shape whatever their format, and
//! every document must start with the `databaseChangeLog` root.
//! [`XmlChangeLogSerializer`] goes the other way, from statements to XML.
//!
//! ```rust
//! use oxide_changelog_parser::{ChangeLogReader, XmlChangeLogReader};
//!
//! let root = XmlChangeLogReader
//!     .read_str(r#"<databaseChangeLog><insert tableName="person"/></databaseChangeLog>"#)
//!     .unwrap();
//! assert_eq!(root.child("insert").unwrap().children()[0].name(), "tableName");
//! ```

pub mod builder;
pub mod error;
pub mod serializer;
pub mod xml;
pub mod yaml;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use oxide_changelog_core::node::ParsedNode;
use tracing::{debug, info};

pub use builder::NodeTreeBuilder;
pub use error::{ParseError, Result, SerializeError};
pub use serializer::XmlChangeLogSerializer;
pub use xml::XmlChangeLogReader;
pub use yaml::YamlChangeLogReader;

/// A reader for one change-log format.
pub trait ChangeLogReader {
    /// Format name used in logs.
    fn name(&self) -> &'static str;

    /// File extensions this reader handles, lower case and without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Returns whether `path` has one of this reader's extensions.
    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.extensions()
                    .iter()
                    .any(|supported| ext.eq_ignore_ascii_case(supported))
            })
    }

    /// Reads a whole document in one pass.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`]; the document is rejected as a whole.
    fn read(&self, input: &mut dyn BufRead) -> Result<ParsedNode>;

    /// Reads a document held in memory.
    ///
    /// # Errors
    ///
    /// Same as [`ChangeLogReader::read`].
    fn read_str(&self, document: &str) -> Result<ParsedNode> {
        let mut bytes = document.as_bytes();
        self.read(&mut bytes)
    }
}

/// The built-in readers.
#[must_use]
pub fn readers() -> [&'static dyn ChangeLogReader; 2] {
    [&XmlChangeLogReader, &YamlChangeLogReader]
}

/// Finds the built-in reader for `path` by extension.
#[must_use]
pub fn reader_for(path: &Path) -> Option<&'static dyn ChangeLogReader> {
    readers().into_iter().find(|reader| reader.supports(path))
}

/// Parses a change-log file with the reader matching its extension.
///
/// # Errors
///
/// [`ParseError::UnsupportedFormat`] for an unknown extension,
/// [`ParseError::Io`] if the file cannot be opened, otherwise any error of
/// the selected reader.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParsedNode> {
    let path = path.as_ref();
    let reader = reader_for(path).ok_or_else(|| ParseError::UnsupportedFormat(path.to_path_buf()))?;
    debug!(path = %path.display(), format = reader.name(), "parsing change log");

    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let root = reader.read(&mut BufReader::new(file))?;
    info!(
        path = %path.display(),
        format = reader.name(),
        depth = root.depth(),
        "parsed change log"
    );
    Ok(root)
}
