//! # XML Document Tree
//!
//! A small owned element tree built from `quick-xml` events. The module
//! documentation is a few kilobytes per file and is walked several times
//! (directives, syntax, descriptions), so a tree is simpler than streaming.
//!
//! ## Entities
//!
//! The documentation DTD defines named entities (`&nbsp;`, `&mdash;`, ...)
//! that are not declared inline. Known ones resolve to their character;
//! unknown ones resolve to nothing.

use std::borrow::Cow;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::DocsError;

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    /// Character data, entities resolved. CDATA sections are text too.
    Text(String),
    Comment,
}

/// An element with its attributes and children, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    /// Value of the attribute `name`, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Element(el) => el.collect_text(out),
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Comment => {}
            }
        }
    }

    /// Child elements, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(el) => Some(el),
            _ => None,
        })
    }

    /// Child elements named `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.child_elements().filter(move |el| el.name == name)
    }

    /// All descendant elements named `name`, depth-first in document order.
    pub fn descendants_named<'a>(&'a self, name: &str) -> Vec<&'a XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for el in self.child_elements() {
            if el.name == name {
                found.push(el);
            }
            el.collect_descendants(name, found);
        }
    }
}

/// Parse `xml` and return its root element.
///
/// # Errors
///
/// Returns [`DocsError::Xml`] for malformed input or a document without a
/// root element.
pub fn parse_document(xml: &str) -> Result<XmlElement, DocsError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| DocsError::Xml(format!("at byte {}: {e}", reader.buffer_position())))?;

        match event {
            Event::Start(start) => stack.push(element_from(&start)?),
            Event::Empty(start) => {
                let el = element_from(&start)?;
                attach(&mut stack, &mut root, XmlNode::Element(el));
            }
            Event::End(_) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| DocsError::Xml("unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, XmlNode::Element(el));
            }
            Event::Text(text) => {
                let text = text
                    .unescape_with(resolve_entity)
                    .map_err(|e| DocsError::Xml(e.to_string()))?;
                append_text(&mut stack, text);
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                append_text(&mut stack, String::from_utf8_lossy(&bytes));
            }
            Event::Comment(_) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(XmlNode::Comment);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(DocsError::Xml(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| DocsError::Xml("document has no root element".to_string()))
}

fn element_from(start: &BytesStart<'_>) -> Result<XmlElement, DocsError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DocsError::Xml(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value_with(resolve_entity)
            .map_err(|e| DocsError::Xml(e.to_string()))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, node: XmlNode) {
    match (stack.last_mut(), node) {
        (Some(parent), node) => parent.children.push(node),
        (None, XmlNode::Element(el)) => *root = Some(el),
        (None, _) => {}
    }
}

fn append_text(stack: &mut [XmlElement], text: Cow<'_, str>) {
    let Some(parent) = stack.last_mut() else {
        return;
    };
    // Entities split one run of character data into several events.
    if let Some(XmlNode::Text(previous)) = parent.children.last_mut() {
        previous.push_str(&text);
    } else {
        parent.children.push(XmlNode::Text(text.into_owned()));
    }
}

fn resolve_entity(name: &str) -> Option<&'static str> {
    Some(match name {
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "apos" => "'",
        "quot" => "\"",
        "nbsp" => "\u{a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        _ => "",
    })
}
