//! Strict XML engine.
//!
//! Nodes follow the text/tail model: text before the first child is stored
//! on the parent, text after a child is stored on that child's `tail`.
//! Tag and attribute names must be valid XML names, and markup must be
//! well-formed.

mod entities;
mod parser;

use std::cell::RefCell;

use crate::element::{Attributes, ChildRef, Element, FRAGMENT_TAG};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::escape::{escape_text, push_attributes};

const ENGINE_NAME: &str = "xml";

#[derive(Debug, Default)]
struct XmlNode {
    tag: String,
    attributes: Attributes,
    text: String,
    tail: String,
    children: Vec<Element>,
}

/// XML engine.
#[derive(Debug, Default)]
pub struct XmlEngine;

impl XmlEngine {
    /// Create the engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn node<'a>(&self, element: &'a Element) -> Result<&'a RefCell<XmlNode>, EngineError> {
        element.node_for::<RefCell<XmlNode>>(ENGINE_NAME)
    }

    fn contains(&self, root: &Element, target: &Element) -> Result<bool, EngineError> {
        if root.ptr_eq(target) {
            return Ok(true);
        }
        let node = self.node(root)?.borrow();
        for child in &node.children {
            if self.contains(child, target)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn append_text(&self, parent: &Element, text: &str) -> Result<(), EngineError> {
        let mut node = self.node(parent)?.borrow_mut();
        match node.children.last() {
            Some(last) => self.node(last)?.borrow_mut().tail.push_str(text),
            None => node.text.push_str(text),
        }
        Ok(())
    }

    fn write_node(&self, element: &Element, out: &mut String) -> Result<(), EngineError> {
        let node = self.node(element)?.borrow();
        let transparent = node.tag == FRAGMENT_TAG;

        if !transparent {
            out.push('<');
            out.push_str(&node.tag);
            push_attributes(out, &node.attributes);
            if node.children.is_empty() && node.text.is_empty() {
                out.push_str("/>");
                return Ok(());
            }
            out.push('>');
        }

        out.push_str(&escape_text(&node.text));
        for child in &node.children {
            self.write_node(child, out)?;
            out.push_str(&escape_text(&self.node(child)?.borrow().tail));
        }

        if !transparent {
            out.push_str("</");
            out.push_str(&node.tag);
            out.push('>');
        }
        Ok(())
    }

    fn write_pretty(
        &self,
        element: &Element,
        depth: usize,
        out: &mut String,
    ) -> Result<(), EngineError> {
        let node = self.node(element)?.borrow();
        let transparent = node.tag == FRAGMENT_TAG;
        let inner = if transparent { depth } else { depth + 1 };

        if !transparent {
            push_line_start(out, depth);
            out.push('<');
            out.push_str(&node.tag);
            push_attributes(out, &node.attributes);
            if node.children.is_empty() && node.text.trim().is_empty() {
                out.push_str("/>\n");
                return Ok(());
            }
            out.push_str(">\n");
        }

        push_text_line(out, inner, &node.text);
        for child in &node.children {
            self.write_pretty(child, inner, out)?;
            push_text_line(out, inner, &self.node(child)?.borrow().tail);
        }

        if !transparent {
            push_line_start(out, depth);
            out.push_str("</");
            out.push_str(&node.tag);
            out.push_str(">\n");
        }
        Ok(())
    }
}

impl Engine for XmlEngine {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn create_tag(&self, name: &str, attributes: &Attributes) -> Result<Element, EngineError> {
        if !is_xml_name(name) {
            return Err(EngineError::InvalidTagName(name.to_owned()));
        }
        if let Some(key) = attributes.keys().find(|key| !is_xml_name(key)) {
            return Err(EngineError::InvalidAttributeName(key.clone()));
        }

        Ok(Element::new(
            ENGINE_NAME,
            RefCell::new(XmlNode {
                tag: name.to_owned(),
                attributes: attributes.clone(),
                ..XmlNode::default()
            }),
        ))
    }

    fn parse_html(&self, markup: &str) -> Result<Element, EngineError> {
        parser::parse(self, markup)
    }

    fn append_child(&self, parent: &Element, child: ChildRef<'_>) -> Result<(), EngineError> {
        match child {
            ChildRef::Element(element) => {
                self.node(element)?;
                if self.contains(element, parent)? {
                    return Err(EngineError::Cycle);
                }
                self.node(parent)?
                    .borrow_mut()
                    .children
                    .push(element.clone());
                Ok(())
            }
            ChildRef::Text(text) => self.append_text(parent, text),
        }
    }

    fn render(&self, element: &Element) -> Result<String, EngineError> {
        let mut out = String::new();
        self.write_node(element, &mut out)?;
        Ok(out)
    }

    fn render_debug(&self, element: &Element) -> Result<String, EngineError> {
        let mut out = String::new();
        self.write_pretty(element, 0, &mut out)?;
        Ok(out.trim_end().to_owned())
    }
}

fn push_line_start(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

fn push_text_line(out: &mut String, depth: usize, text: &str) {
    let text = text.trim();
    if !text.is_empty() {
        push_line_start(out, depth);
        out.push_str(&escape_text(text));
        out.push('\n');
    }
}

/// Whether `name` is a valid XML element or attribute name.
fn is_xml_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_alphabetic() || first == '_' || first == ':')
        && chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.'))
}
