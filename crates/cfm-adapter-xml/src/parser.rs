//! XML parser
//!
//! Builds a [`Document`] from XML text. Each element keeps its first
//! text fragment, exactly as written, as its value. Whitespace counts as
//! text; only elements with no text fragment at all have no value.

use crate::{Error, Result};
use cfm_ir::{Document, DocumentMetadata, Node, Position, SourceInfo, Value};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::path::Path;
use tracing::{debug, trace};

const UTF8_BOM: &str = "\u{feff}";

/// Parser for XML renditions
#[derive(Debug, Clone)]
pub struct XmlParser {
    source_name: String,
}

impl XmlParser {
    /// Create a parser; `source_name` is recorded on documents and errors
    pub fn new(source_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
        }
    }

    /// Parse an XML file
    ///
    /// # Errors
    ///
    /// Returns an IO, encoding or parse error.
    pub fn parse_file(path: &Path) -> Result<Document> {
        let bytes = std::fs::read(path)?;
        Self::new(path.to_string_lossy()).parse_bytes(&bytes)
    }

    /// Parse UTF-8 encoded XML bytes
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] for non UTF-8 input and [`Error::Parse`]
    /// for malformed XML.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<Document> {
        let input = std::str::from_utf8(bytes)
            .map_err(|e| Error::Encoding(format!("{}: {e}", self.source_name)))?;
        self.parse_str(input)
    }

    /// Parse XML text
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed XML.
    pub fn parse_str(&self, input: &str) -> Result<Document> {
        let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
        let mut reader = Reader::from_str(input);
        reader.trim_text(false);
        reader.check_end_names(true);

        let mut builder = TreeBuilder::default();
        let mut metadata = DocumentMetadata {
            source: Some(SourceInfo::new(&self.source_name, Position::new(1, 1, 0))),
            ..DocumentMetadata::default()
        };

        loop {
            let offset = reader.buffer_position();
            let event = reader
                .read_event()
                .map_err(|e| parse_error(input, reader.buffer_position(), e.to_string()))?;

            let outcome = match event {
                Event::Start(start) => element(&start).and_then(|node| builder.open(node)),
                Event::Empty(start) => element(&start).and_then(|node| builder.close_empty(node)),
                Event::End(end) => {
                    let name = String::from_utf8_lossy(end.name().as_ref()).to_string();
                    builder.close(&name)
                }
                Event::Text(text) => match text.unescape() {
                    Ok(text) => builder.text(&text),
                    Err(e) => Err(e.to_string()),
                },
                Event::CData(cdata) => match String::from_utf8(cdata.into_inner().into_owned()) {
                    Ok(text) => builder.text(&text),
                    Err(e) => Err(e.to_string()),
                },
                Event::Decl(decl) => {
                    metadata.version = decl
                        .version()
                        .ok()
                        .map(|v| String::from_utf8_lossy(&v).to_string());
                    metadata.encoding = decl
                        .encoding()
                        .and_then(std::result::Result::ok)
                        .map(|e| String::from_utf8_lossy(&e).to_string());
                    Ok(())
                }
                Event::Eof => break,
                Event::Comment(_) | Event::PI(_) | Event::DocType(_) => Ok(()),
            };

            outcome.map_err(|message| parse_error(input, offset, message))?;
        }

        let root = builder
            .finish()
            .map_err(|message| parse_error(input, input.len(), message))?;

        debug!(
            "Parsed XML document '{}' with root <{}>",
            self.source_name, root.name
        );
        metadata.created_at = Some(chrono::Utc::now());
        Ok(Document::with_metadata(root, metadata))
    }
}

impl Default for XmlParser {
    fn default() -> Self {
        Self::new("<memory>")
    }
}

fn parse_error(input: &str, offset: usize, message: String) -> Error {
    let position = Position::locate(input, offset);
    Error::Parse {
        line: position.line,
        column: position.column,
        message,
    }
}

/// Convert a start tag into a node with its attributes
fn element(start: &BytesStart<'_>) -> std::result::Result<Node, String> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| e.to_string())?
        .to_string();
    let mut node = Node::new(name);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).to_string();
        let value = attribute.unescape_value().map_err(|e| e.to_string())?;
        node.set_attribute(key, value.into_owned());
    }

    Ok(node)
}

/// Assembles the element tree from parser events
#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Node>,
    root: Option<Node>,
}

impl TreeBuilder {
    fn open(&mut self, node: Node) -> std::result::Result<(), String> {
        if self.stack.is_empty() && self.root.is_some() {
            return Err(format!("unexpected second root element <{}>", node.name));
        }
        trace!("Open <{}>", node.name);
        self.stack.push(node);
        Ok(())
    }

    fn close_empty(&mut self, node: Node) -> std::result::Result<(), String> {
        self.open(node)?;
        let name = self.stack.last().map(|n| n.name.clone()).unwrap_or_default();
        self.close(&name)
    }

    fn close(&mut self, name: &str) -> std::result::Result<(), String> {
        let node = self
            .stack
            .pop()
            .ok_or_else(|| format!("unexpected closing tag </{name}>"))?;
        if node.name != name {
            return Err(format!(
                "closing tag </{name}> does not match <{}>",
                node.name
            ));
        }

        match self.stack.last_mut() {
            Some(parent) => {
                parent.add_child(node);
            }
            None => self.root = Some(node),
        }
        Ok(())
    }

    fn text(&mut self, text: &str) -> std::result::Result<(), String> {
        match self.stack.last_mut() {
            Some(node) => {
                if !text.is_empty() && node.value.is_none() {
                    node.value = Some(Value::String(text.to_string()));
                }
                Ok(())
            }
            None if text.trim().is_empty() => Ok(()),
            None => Err("text outside of the root element".to_string()),
        }
    }

    fn finish(self) -> std::result::Result<Node, String> {
        if let Some(open) = self.stack.last() {
            return Err(format!("unclosed element <{}>", open.name));
        }
        self.root.ok_or_else(|| "document has no root element".to_string())
    }
}
