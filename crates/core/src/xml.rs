//! Minimal typed element tree for track documents.
//!
//! Built from the `quick-xml` event stream. Selection helpers all walk the
//! tree in document order, so "first matching element" rules are
//! deterministic and independent of any markup query engine.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::gpx::DecodeError;

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

/// An element with its namespace prefix stripped from the name.
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: String,
    /// Attributes in document order, keyed by local name.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Parse a complete document into its root element.
    ///
    /// Fails with [`DecodeError::Malformed`] on anything that is not a single
    /// well-formed root element.
    pub fn parse(raw: &str) -> Result<XmlElement, DecodeError> {
        let mut reader = Reader::from_str(raw);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                DecodeError::Malformed(format!(
                    "{e} at position {}",
                    reader.error_position()
                ))
            })?;

            match event {
                Event::Start(start) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(malformed("more than one root element"));
                    }
                    stack.push(open_element(&start)?);
                }
                Event::Empty(start) => {
                    let element = open_element(&start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| malformed("closing tag without matching opening tag"))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|e| DecodeError::Malformed(e.to_string()))?;
                    push_text(&mut stack, &text)?;
                }
                Event::CData(data) => {
                    let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                    push_text(&mut stack, &text)?;
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions, doctypes.
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(DecodeError::Malformed(format!(
                "unclosed element <{}>",
                open.name
            )));
        }
        root.ok_or_else(|| malformed("document has no root element"))
    }

    /// Value of the attribute with the given local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Direct child elements, in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(element) => Some(element),
            XmlNode::Text(_) => None,
        })
    }

    /// First direct child element named `name`.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|e| e.name == name)
    }

    /// This element and every element below it, pre-order.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }

    /// First element strictly below this one named `name`, in document order.
    pub fn first_descendant(&self, name: &str) -> Option<&XmlElement> {
        self.descendants().skip(1).find(|e| e.name == name)
    }

    /// Concatenated text of all descendant text nodes, trimmed.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out.trim().to_string()
    }
}

/// Pre-order iterator over an element subtree.
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        for node in element.children.iter().rev() {
            if let XmlNode::Element(child) = node {
                self.stack.push(child);
            }
        }
        Some(element)
    }
}

fn malformed(reason: &str) -> DecodeError {
    DecodeError::Malformed(reason.to_string())
}

fn utf8(bytes: &[u8]) -> Result<String, DecodeError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|e| DecodeError::Malformed(e.to_string()))
}

fn open_element(start: &BytesStart<'_>) -> Result<XmlElement, DecodeError> {
    let name = utf8(start.local_name().as_ref())?;

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DecodeError::Malformed(e.to_string()))?;
        let key = utf8(attr.key.local_name().as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|e| DecodeError::Malformed(e.to_string()))?;
        attributes.push((key, value.into_owned()));
    }

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

/// Attach a finished element to its parent, or make it the root.
fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), DecodeError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Element(element));
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(malformed("more than one root element")),
    }
}

fn push_text(stack: &mut [XmlElement], text: &str) -> Result<(), DecodeError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Text(text.to_string()));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(malformed("text outside of the root element")),
    }
}

fn collect_text(element: &XmlElement, out: &mut String) {
    for node in &element.children {
        match node {
            XmlNode::Text(text) => out.push_str(text),
            XmlNode::Element(child) => collect_text(child, out),
        }
    }
}
