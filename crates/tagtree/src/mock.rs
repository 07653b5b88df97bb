//! Recording engine for tests.
//!
//! Records every `create_tag` call so attribute mapping can be checked
//! without going through a real serializer. Rendering quotes text children
//! and never collapses tags, which keeps child boundaries visible.

use std::cell::RefCell;

use crate::element::{Attributes, ChildRef, Element};
use crate::engine::Engine;
use crate::error::EngineError;

const ENGINE_NAME: &str = "recording";

#[derive(Debug)]
struct MockNode {
    tag: String,
    attributes: Attributes,
    children: Vec<MockChild>,
}

#[derive(Debug)]
enum MockChild {
    Element(Element),
    Text(String),
}

/// Engine that records created tags.
#[derive(Debug, Default)]
pub struct RecordingEngine {
    created: RefCell<Vec<(String, Attributes)>>,
}

impl RecordingEngine {
    /// Create an engine with an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of all created tags, in creation order.
    pub fn created_tags(&self) -> Vec<String> {
        self.created
            .borrow()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Attributes passed to the most recent `create_tag`.
    pub fn last_attributes(&self) -> Option<Attributes> {
        self.created
            .borrow()
            .last()
            .map(|(_, attributes)| attributes.clone())
    }

    fn node<'a>(&self, element: &'a Element) -> Result<&'a RefCell<MockNode>, EngineError> {
        element.node_for::<RefCell<MockNode>>(ENGINE_NAME)
    }

    fn write(&self, element: &Element, out: &mut String) -> Result<(), EngineError> {
        let node = self.node(element)?.borrow();
        out.push('<');
        out.push_str(&node.tag);
        crate::escape::push_attributes(out, &node.attributes);
        out.push('>');
        for child in &node.children {
            match child {
                MockChild::Element(child) => self.write(child, out)?,
                MockChild::Text(text) => {
                    out.push('"');
                    out.push_str(text);
                    out.push('"');
                }
            }
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
        Ok(())
    }
}

impl Engine for RecordingEngine {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn create_tag(&self, name: &str, attributes: &Attributes) -> Result<Element, EngineError> {
        self.created
            .borrow_mut()
            .push((name.to_owned(), attributes.clone()));
        Ok(Element::new(
            ENGINE_NAME,
            RefCell::new(MockNode {
                tag: name.to_owned(),
                attributes: attributes.clone(),
                children: Vec::new(),
            }),
        ))
    }

    fn parse_html(&self, markup: &str) -> Result<Element, EngineError> {
        let element = self.create_tag("parsed", &Attributes::new())?;
        self.append_child(&element, ChildRef::Text(markup))?;
        Ok(element)
    }

    fn append_child(&self, parent: &Element, child: ChildRef<'_>) -> Result<(), EngineError> {
        let child = match child {
            ChildRef::Element(element) if element.ptr_eq(parent) => return Err(EngineError::Cycle),
            ChildRef::Element(element) => MockChild::Element(element.clone()),
            ChildRef::Text(text) => MockChild::Text(text.to_owned()),
        };
        self.node(parent)?.borrow_mut().children.push(child);
        Ok(())
    }

    fn render(&self, element: &Element) -> Result<String, EngineError> {
        let mut out = String::new();
        self.write(element, &mut out)?;
        Ok(out)
    }

    fn render_debug(&self, element: &Element) -> Result<String, EngineError> {
        self.render(element)
    }
}
