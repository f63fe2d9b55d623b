//! The parser context
//!
//! [DtdParser] owns every piece of state a parse needs: the parameter-entity table, the element
//! map, the attribute lists collected so far and the declaration order. One value parses one
//! document and is consumed by doing so.

use crate::dtd::attributes::parse_attribute_list;
use crate::dtd::declarations::{recognize, Declaration};
use crate::dtd::error::ParseError;
use crate::dtd::model::{AttributeDecl, ElementDecl, ParseResult};
use crate::dtd::reassembly::DeclarationReader;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

#[derive(Debug, Default)]
pub struct DtdParser {
    entities: HashMap<String, String>,
    elements: HashMap<String, ElementDecl>,
    attributes: HashMap<String, Vec<AttributeDecl>>,
    order: Vec<String>,
}

impl DtdParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse DTD text held in memory. In-memory input cannot fail.
    pub fn parse_str(mut self, source: &str) -> ParseResult {
        let mut reader = DeclarationReader::new();
        for line in source.lines() {
            self.feed_line(&mut reader, line);
        }
        self.finish(reader)
    }

    /// Parse DTD text from any buffered reader, line by line.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than failing the read.
    pub fn parse_reader<R: BufRead>(mut self, mut input: R) -> io::Result<ParseResult> {
        let mut reader = DeclarationReader::new();
        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buffer);
            let line = line.trim_end_matches('\n');
            self.feed_line(&mut reader, line.strip_suffix('\r').unwrap_or(line));
        }
        Ok(self.finish(reader))
    }

    /// Open and parse a DTD file. The file is closed on every exit path.
    pub fn parse_file(self, path: impl AsRef<Path>) -> Result<ParseResult, ParseError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ParseError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse_reader(BufReader::new(file))
            .map_err(|source| ParseError::Read {
                path: path.to_path_buf(),
                source,
            })
    }

    fn feed_line(&mut self, reader: &mut DeclarationReader, line: &str) {
        for declaration in reader.push_line(line) {
            self.apply(&declaration);
        }
    }

    fn apply(&mut self, declaration: &str) {
        match recognize(declaration) {
            Declaration::ParameterEntity { name, value } => {
                trace!(entity = name, "recorded parameter entity");
                self.entities.insert(name.to_string(), value.to_string());
            }
            Declaration::Element { name, content } => self.record_element(name, content),
            Declaration::AttributeList { element, body } => {
                let attributes = parse_attribute_list(body, &self.entities);
                trace!(element, count = attributes.len(), "recorded attribute list");
                self.attributes
                    .entry(element.to_string())
                    .or_default()
                    .extend(attributes);
            }
            Declaration::Ignored => debug!(declaration, "dropping unrecognised declaration"),
        }
    }

    fn record_element(&mut self, name: &str, content: &str) {
        match self.elements.get_mut(name) {
            Some(existing) => {
                debug!(element = name, "element re-declared, keeping its original position");
                existing.content = content.to_string();
            }
            None => {
                self.order.push(name.to_string());
                self.elements
                    .insert(name.to_string(), ElementDecl::new(name, content));
            }
        }
    }

    fn finish(mut self, reader: DeclarationReader) -> ParseResult {
        if let Some(unterminated) = reader.finish() {
            debug!(declaration = %unterminated, "dropping unterminated declaration");
        }

        for (element, attributes) in self.attributes.drain() {
            match self.elements.get_mut(&element) {
                Some(decl) => decl.attributes = attributes,
                None => debug!(
                    element = %element,
                    "dropping attributes declared for an undeclared element"
                ),
            }
        }

        ParseResult {
            elements: self.elements,
            order: self.order,
        }
    }
}
