//! Streaming XML change-log reader.

use std::io::BufRead;

use oxide_changelog_core::node::ParsedNode;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;

use crate::builder::NodeTreeBuilder;
use crate::error::{ParseError, Result};
use crate::ChangeLogReader;

/// Reads XML change logs in a single pass over quick-xml events.
///
/// Element and attribute names lose their namespace prefix, namespace
/// declarations are skipped, and comments and processing instructions are
/// ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlChangeLogReader;

impl XmlChangeLogReader {
    /// Creates the reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ChangeLogReader for XmlChangeLogReader {
    fn name(&self) -> &'static str {
        "xml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["xml"]
    }

    fn read(&self, input: &mut dyn BufRead) -> Result<ParsedNode> {
        let mut reader = Reader::from_reader(input);
        let mut builder = NodeTreeBuilder::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let (name, attributes) = element(&e)?;
                    builder.start_element(&name, attributes)?;
                }
                Event::Empty(e) => {
                    let (name, attributes) = element(&e)?;
                    builder.start_element(&name, attributes)?;
                    builder.end_element()?;
                }
                Event::Text(e) => builder.characters(&e.unescape()?)?,
                Event::CData(e) => builder.characters(std::str::from_utf8(&e)?)?,
                Event::End(_) => builder.end_element()?,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        let root = builder.finish()?;
        debug!(children = root.children().len(), "read xml change log");
        Ok(root)
    }
}

/// Local name and unescaped attributes of a start tag.
fn element(start: &BytesStart<'_>) -> Result<(String, Vec<(String, String)>)> {
    let name = std::str::from_utf8(start.local_name().as_ref())?.to_string();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| ParseError::MalformedAttribute {
            element: name.clone(),
            source: e.into(),
        })?;
        if attribute.key.as_namespace_binding().is_some() {
            continue;
        }
        let key = std::str::from_utf8(attribute.key.local_name().as_ref())?.to_string();
        let value = attribute
            .unescape_value()
            .map_err(|source| ParseError::MalformedAttribute {
                element: name.clone(),
                source,
            })?;
        attributes.push((key, value.into_owned()));
    }
    Ok((name, attributes))
}
