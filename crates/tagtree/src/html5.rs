//! Lenient HTML5 engine.
//!
//! Elements are plain in-memory nodes. Markup is parsed with `scraper`
//! (`html5ever`), which recovers from any malformed input the way browsers
//! do, so [`Html5Engine::parse_html`] never fails.

use std::cell::RefCell;

use scraper::{ElementRef, Html};

use crate::element::{Attributes, ChildRef, Element, FRAGMENT_TAG};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::escape::{escape_text, push_attributes};

const ENGINE_NAME: &str = "html5";

/// Elements without content or closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Elements whose text content is written without escaping.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "plaintext", "script", "style", "xmp",
];

#[derive(Debug)]
struct HtmlNode {
    tag: String,
    attributes: Attributes,
    children: Vec<HtmlChild>,
}

#[derive(Debug)]
enum HtmlChild {
    Element(Element),
    Text(String),
}

/// HTML5 engine. The default engine.
#[derive(Debug, Default)]
pub struct Html5Engine;

impl Html5Engine {
    /// Create the engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn node<'a>(&self, element: &'a Element) -> Result<&'a RefCell<HtmlNode>, EngineError> {
        element.node_for::<RefCell<HtmlNode>>(ENGINE_NAME)
    }

    /// Whether `target` is `root` or one of its descendants.
    fn contains(&self, root: &Element, target: &Element) -> Result<bool, EngineError> {
        if root.ptr_eq(target) {
            return Ok(true);
        }
        let node = self.node(root)?.borrow();
        for child in &node.children {
            if let HtmlChild::Element(child) = child
                && self.contains(child, target)?
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Copy parsed children of `source` under `parent`.
    fn import(&self, source: ElementRef<'_>, parent: &Element) -> Result<(), EngineError> {
        for child in source.children() {
            if let Some(child_ref) = ElementRef::wrap(child) {
                let value = child_ref.value();
                let attributes = value
                    .attrs()
                    .map(|(key, value)| (key.to_owned(), value.to_owned()))
                    .collect();
                let element = self.create_tag(value.name(), &attributes)?;
                self.import(child_ref, &element)?;
                self.append_child(parent, ChildRef::Element(&element))?;
            } else if let Some(text) = child.value().as_text() {
                self.append_child(parent, ChildRef::Text(&**text))?;
            }
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
            out.push('>');
            if is_void(&node.tag) {
                return Ok(());
            }
        }

        let raw = is_raw_text(&node.tag);
        for child in &node.children {
            match child {
                HtmlChild::Element(child) => self.write_node(child, out)?,
                HtmlChild::Text(text) if raw => out.push_str(text),
                HtmlChild::Text(text) => out.push_str(&escape_text(text)),
            }
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

        if node.tag == FRAGMENT_TAG {
            for child in &node.children {
                self.write_pretty_child(child, depth, false, out)?;
            }
            return Ok(());
        }

        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&node.tag);
        push_attributes(out, &node.attributes);
        out.push('>');

        if is_void(&node.tag) {
            out.push('\n');
            return Ok(());
        }
        if node.children.is_empty() {
            out.push_str("</");
            out.push_str(&node.tag);
            out.push_str(">\n");
            return Ok(());
        }

        out.push('\n');
        let raw = is_raw_text(&node.tag);
        for child in &node.children {
            self.write_pretty_child(child, depth + 1, raw, out)?;
        }
        out.push_str(&indent);
        out.push_str("</");
        out.push_str(&node.tag);
        out.push_str(">\n");
        Ok(())
    }

    fn write_pretty_child(
        &self,
        child: &HtmlChild,
        depth: usize,
        raw: bool,
        out: &mut String,
    ) -> Result<(), EngineError> {
        match child {
            HtmlChild::Element(element) => self.write_pretty(element, depth, out),
            HtmlChild::Text(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    out.push_str(&"  ".repeat(depth));
                    if raw {
                        out.push_str(text);
                    } else {
                        out.push_str(&escape_text(text));
                    }
                    out.push('\n');
                }
                Ok(())
            }
        }
    }
}

impl Engine for Html5Engine {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn create_tag(&self, name: &str, attributes: &Attributes) -> Result<Element, EngineError> {
        Ok(Element::new(
            ENGINE_NAME,
            RefCell::new(HtmlNode {
                tag: name.to_owned(),
                attributes: attributes.clone(),
                children: Vec::new(),
            }),
        ))
    }

    fn parse_html(&self, markup: &str) -> Result<Element, EngineError> {
        let document = Html::parse_fragment(markup);
        let root = self.create_tag(FRAGMENT_TAG, &Attributes::new())?;
        self.import(document.root_element(), &root)?;
        Ok(root)
    }

    fn append_child(&self, parent: &Element, child: ChildRef<'_>) -> Result<(), EngineError> {
        let child = match child {
            ChildRef::Element(element) => {
                self.node(element)?;
                if self.contains(element, parent)? {
                    return Err(EngineError::Cycle);
                }
                HtmlChild::Element(element.clone())
            }
            ChildRef::Text(text) => HtmlChild::Text(text.to_owned()),
        };

        self.node(parent)?.borrow_mut().children.push(child);
        Ok(())
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

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tag(engine: &Html5Engine, name: &str, pairs: &[(&str, &str)]) -> Element {
        let attributes = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        engine.create_tag(name, &attributes).unwrap()
    }

    #[test]
    fn test_render_element_with_text() {
        let engine = Html5Engine::new();
        let p = tag(&engine, "p", &[("class", "intro")]);
        engine.append_child(&p, ChildRef::Text("Hello")).unwrap();
        assert_eq!(engine.render(&p).unwrap(), r#"<p class="intro">Hello</p>"#);
    }

    #[test]
    fn test_render_void_element() {
        let engine = Html5Engine::new();
        let img = tag(&engine, "img", &[("alt", "x"), ("src", "a.png")]);
        assert_eq!(engine.render(&img).unwrap(), r#"<img alt="x" src="a.png">"#);
    }

    #[test]
    fn test_fragment_is_transparent() {
        let engine = Html5Engine::new();
        let fragment = tag(&engine, FRAGMENT_TAG, &[]);
        let em = tag(&engine, "em", &[]);
        engine.append_child(&em, ChildRef::Text("b")).unwrap();
        engine.append_child(&fragment, ChildRef::Text("a")).unwrap();
        engine.append_child(&fragment, ChildRef::Element(&em)).unwrap();
        assert_eq!(engine.render(&fragment).unwrap(), "a<em>b</em>");
    }

    #[test]
    fn test_escaping() {
        let engine = Html5Engine::new();
        let a = tag(&engine, "a", &[("title", r#"say "hi""#)]);
        engine.append_child(&a, ChildRef::Text("<b> & co")).unwrap();
        assert_eq!(
            engine.render(&a).unwrap(),
            r#"<a title="say &quot;hi&quot;">&lt;b&gt; &amp; co</a>"#
        );
    }

    #[test]
    fn test_parse_html_round_trip() {
        let engine = Html5Engine::new();
        let element = engine
            .parse_html(r#"<p class="x">Hello <strong>world</strong></p><br>"#)
            .unwrap();
        assert_eq!(
            engine.render(&element).unwrap(),
            r#"<p class="x">Hello <strong>world</strong></p><br>"#
        );
    }

    #[test]
    fn test_parse_html_recovers_from_unclosed_tags() {
        let engine = Html5Engine::new();
        let element = engine.parse_html("<p>one<p>two").unwrap();
        assert_eq!(engine.render(&element).unwrap(), "<p>one</p><p>two</p>");
    }

    #[test]
    fn test_raw_text_elements_not_escaped() {
        let engine = Html5Engine::new();
        let parsed = engine
            .parse_html("<style>a > b {}</style><script>if (a < b && c) {}</script>")
            .unwrap();
        assert_eq!(
            engine.render(&parsed).unwrap(),
            "<style>a > b {}</style><script>if (a < b && c) {}</script>"
        );
    }

    #[test]
    fn test_parse_plain_text() {
        let engine = Html5Engine::new();
        let element = engine.parse_html("just text").unwrap();
        assert_eq!(engine.render(&element).unwrap(), "just text");
    }

    #[test]
    fn test_append_self_is_cycle() {
        let engine = Html5Engine::new();
        let div = tag(&engine, "div", &[]);
        let err = engine.append_child(&div, ChildRef::Element(&div)).unwrap_err();
        assert!(matches!(err, EngineError::Cycle));
    }

    #[test]
    fn test_append_ancestor_is_cycle() {
        let engine = Html5Engine::new();
        let outer = tag(&engine, "div", &[]);
        let inner = tag(&engine, "span", &[]);
        engine.append_child(&outer, ChildRef::Element(&inner)).unwrap();
        let err = engine.append_child(&inner, ChildRef::Element(&outer)).unwrap_err();
        assert!(matches!(err, EngineError::Cycle));
    }

    #[test]
    fn test_foreign_element_rejected() {
        let engine = Html5Engine::new();
        let foreign = Element::new("other", 0_u8);
        let err = engine.render(&foreign).unwrap_err();
        assert!(matches!(err, EngineError::ForeignElement { .. }));
    }

    #[test]
    fn test_render_debug_indents() {
        let engine = Html5Engine::new();
        let ul = tag(&engine, "ul", &[]);
        let li = tag(&engine, "li", &[]);
        engine.append_child(&li, ChildRef::Text("item")).unwrap();
        engine.append_child(&ul, ChildRef::Element(&li)).unwrap();
        engine
            .append_child(&ul, ChildRef::Element(&tag(&engine, "br", &[])))
            .unwrap();
        assert_eq!(
            engine.render_debug(&ul).unwrap(),
            "<ul>\n  <li>\n    item\n  </li>\n  <br>\n</ul>"
        );
    }
}
