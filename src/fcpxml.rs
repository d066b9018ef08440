//! Minimal owned XML tree for Final Cut Pro exports.
//!
//! Only elements and their attributes are kept; text, comments and the doctype are dropped
//! since nothing in an FCPXML timeline carries timing information in text nodes.

use std::fmt::Display;
use std::fs;
use std::path::Path;

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::error::{ChompError, Result};
use crate::time::parse_fcp_time_seconds;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Reads a time attribute in seconds. `Ok(None)` when the attribute is absent.
    pub fn time_attribute(&self, key: &str) -> Result<Option<f64>> {
        self.attribute(key).map(parse_fcp_time_seconds).transpose()
    }
}

fn malformed(position: u64, err: impl Display) -> ChompError {
    ChompError::MalformedXml {
        position,
        message: err.to_string(),
    }
}

fn element_from_tag(tag: &BytesStart, reader: &Reader<&[u8]>) -> Result<XmlElement> {
    let position = reader.buffer_position() as u64;
    let mut element = XmlElement::new(String::from_utf8_lossy(tag.name().as_ref()));

    for attr in tag.attributes() {
        let attr = attr.map_err(|e| malformed(position, e))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .decode_and_unescape_value(reader.decoder())
            .map_err(|e| malformed(position, e))?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
    position: u64,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_some() {
        return Err(malformed(
            position,
            format!("second root element <{}>", element.name),
        ));
    } else {
        *root = Some(element);
    }
    Ok(())
}

/// Parses XML text into its root element.
pub fn parse_fcpxml(content: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => return Err(malformed(reader.error_position() as u64, e)),
        };
        let position = reader.buffer_position() as u64;

        match event {
            Event::Start(tag) => stack.push(element_from_tag(&tag, &reader)?),
            Event::Empty(tag) => {
                let element = element_from_tag(&tag, &reader)?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed(position, "closing tag without an open element"))?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(malformed(
            reader.buffer_position() as u64,
            format!("unexpected end of document inside <{}>", open.name),
        ));
    }

    root.ok_or_else(|| malformed(0, "document has no root element"))
}

/// Reads and parses an `.fcpxml` document from disk.
pub fn load_fcpxml(path: impl AsRef<Path>) -> Result<XmlElement> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ChompError::io(path, e))?;
    log::debug!("Read {} bytes from {}", content.len(), path.display());
    parse_fcpxml(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_tree_with_attributes() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE fcpxml>
<fcpxml version="1.11">
    <library>
        <sequence duration="60s">
            <spine>
                <asset-clip offset="10s" start="0s" name="A &amp; B">
                    <chapter-marker start="2s" value="Intro"/>
                </asset-clip>
                <gap offset="30s"/>
            </spine>
        </sequence>
    </library>
</fcpxml>"#;

        let root = parse_fcpxml(xml).unwrap();
        assert_eq!(root.name, "fcpxml");
        assert_eq!(root.attribute("version"), Some("1.11"));

        let spine = &root.children[0].children[0].children[0];
        assert_eq!(spine.name, "spine");
        assert_eq!(spine.children.len(), 2);

        let clip = &spine.children[0];
        assert_eq!(clip.attribute("name"), Some("A & B"));
        assert_eq!(clip.time_attribute("offset").unwrap(), Some(10.0));
        assert_eq!(clip.time_attribute("duration").unwrap(), None);
        assert_eq!(clip.children[0].attribute("value"), Some("Intro"));
    }

    #[test]
    fn rejects_unclosed_document() {
        let err = parse_fcpxml("<fcpxml><library>").unwrap_err();
        assert!(matches!(err, ChompError::MalformedXml { .. }));
    }

    #[test]
    fn rejects_mismatched_tags() {
        let err = parse_fcpxml("<fcpxml><library></spine></fcpxml>").unwrap_err();
        assert!(matches!(err, ChompError::MalformedXml { .. }));
    }

    #[test]
    fn rejects_empty_and_multi_root_documents() {
        assert!(matches!(
            parse_fcpxml("   ").unwrap_err(),
            ChompError::MalformedXml { .. }
        ));
        assert!(matches!(
            parse_fcpxml("<a/><b/>").unwrap_err(),
            ChompError::MalformedXml { .. }
        ));
    }

    #[test]
    fn time_attribute_propagates_malformed_values() {
        let element = XmlElement::new("clip").with_attribute("start", "1/2/3s");
        assert!(matches!(
            element.time_attribute("start").unwrap_err(),
            ChompError::MalformedTimeValue { .. }
        ));
    }
}
