//! Well-formed markup parser for the XML engine.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::XmlEngine;
use super::entities::convert_html_entities;
use crate::element::{Attributes, ChildRef, Element, FRAGMENT_TAG};
use crate::engine::Engine;
use crate::error::EngineError;

/// Parse markup into a `fragment` element.
///
/// Markup may contain several top-level nodes and text. Named HTML entities
/// are converted to Unicode first, anything else not well-formed is an error.
pub(super) fn parse(engine: &XmlEngine, markup: &str) -> Result<Element, EngineError> {
    let markup = convert_html_entities(markup);
    let wrapped = format!("<{FRAGMENT_TAG}>{markup}</{FRAGMENT_TAG}>");

    let mut reader = Reader::from_str(&wrapped);
    reader.config_mut().trim_text(false);

    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => {
                let root = engine.create_tag(FRAGMENT_TAG, &Attributes::new())?;
                parse_children(engine, &mut reader, &root, FRAGMENT_TAG)?;
                expect_eof(&mut reader)?;
                return Ok(root);
            }
            Event::Eof => return Err(EngineError::Parse("empty document".to_owned())),
            _ => {}
        }
        buf.clear();
    }
}

/// Read events into `parent` until its end tag.
fn parse_children<R: BufRead>(
    engine: &XmlEngine,
    reader: &mut Reader<R>,
    parent: &Element,
    parent_tag: &str,
) -> Result<(), EngineError> {
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = decode_name(reader, e.name().as_ref())?;
                let child = engine.create_tag(&tag, &decode_attrs(reader, &e)?)?;
                parse_children(engine, reader, &child, &tag)?;
                engine.append_child(parent, ChildRef::Element(&child))?;
            }
            Event::Empty(e) => {
                let tag = decode_name(reader, e.name().as_ref())?;
                let child = engine.create_tag(&tag, &decode_attrs(reader, &e)?)?;
                engine.append_child(parent, ChildRef::Element(&child))?;
            }
            Event::Text(e) => {
                let text = reader.decoder().decode(&e)?;
                engine.append_child(parent, ChildRef::Text(&text))?;
            }
            Event::GeneralRef(e) => {
                let entity = reader.decoder().decode(&e)?;
                let text = decode_entity(&entity)?;
                engine.append_child(parent, ChildRef::Text(&text))?;
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e);
                engine.append_child(parent, ChildRef::Text(&text))?;
            }
            Event::End(e) => {
                let tag = decode_name(reader, e.name().as_ref())?;
                if tag != parent_tag {
                    return Err(EngineError::Parse(format!(
                        "expected </{parent_tag}>, found </{tag}>"
                    )));
                }
                return Ok(());
            }
            Event::Eof => {
                return Err(EngineError::Parse(format!("unclosed <{parent_tag}>")));
            }
            Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
        }
        buf.clear();
    }
}

/// Reject anything left after the root closes, such as a stray
/// `</fragment>` in the markup.
fn expect_eof<R: BufRead>(reader: &mut Reader<R>) -> Result<(), EngineError> {
    let mut buf = Vec::new();
    match reader.read_event_into(&mut buf)? {
        Event::Eof => Ok(()),
        _ => Err(EngineError::Parse(format!(
            "unexpected content after </{FRAGMENT_TAG}>"
        ))),
    }
}

fn decode_name<R: BufRead>(reader: &Reader<R>, name: &[u8]) -> Result<String, EngineError> {
    Ok(reader.decoder().decode(name)?.into_owned())
}

fn decode_attrs<R: BufRead>(reader: &Reader<R>, e: &BytesStart) -> Result<Attributes, EngineError> {
    let mut attrs = Attributes::new();
    for attr in e.attributes() {
        let attr = attr?;
        let key = decode_name(reader, attr.key.as_ref())?;
        let value = attr.unescape_value()?.into_owned();
        attrs.insert(key, value);
    }
    Ok(attrs)
}

/// Resolve a predefined XML entity or a numeric character reference.
fn decode_entity(entity: &str) -> Result<String, EngineError> {
    let decoded = match entity {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => entity
            .strip_prefix('#')
            .and_then(|code| match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => code.parse::<u32>().ok(),
            })
            .and_then(char::from_u32),
    };
    decoded
        .map(String::from)
        .ok_or_else(|| EngineError::Parse(format!("unknown entity &{entity};")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn round_trip(markup: &str) -> String {
        let engine = XmlEngine::new();
        let element = engine.parse_html(markup).unwrap();
        engine.render(&element).unwrap()
    }

    #[test]
    fn test_parse_simple_element() {
        assert_eq!(round_trip("<p>Hello</p>"), "<p>Hello</p>");
    }

    #[test]
    fn test_parse_nested_with_tail() {
        assert_eq!(
            round_trip("<p><strong>Bold</strong> text</p>"),
            "<p><strong>Bold</strong> text</p>"
        );
    }

    #[test]
    fn test_parse_multiple_roots_and_text() {
        assert_eq!(round_trip("a<br/>b<i>c</i>"), "a<br/>b<i>c</i>");
    }

    #[test]
    fn test_parse_attributes() {
        assert_eq!(
            round_trip(r#"<a href="/x?a=1&amp;b=2">link</a>"#),
            r#"<a href="/x?a=1&amp;b=2">link</a>"#
        );
    }

    #[test]
    fn test_parse_entities() {
        assert_eq!(round_trip("<p>a &lt; b</p>"), "<p>a &lt; b</p>");
        assert_eq!(round_trip("<p>&#65;&#x42;</p>"), "<p>AB</p>");
        assert_eq!(round_trip("<p>a&nbsp;b</p>"), "<p>a\u{00a0}b</p>");
    }

    #[test]
    fn test_parse_cdata() {
        assert_eq!(round_trip("<p><![CDATA[<raw>]]></p>"), "<p>&lt;raw&gt;</p>");
    }

    #[test]
    fn test_mismatched_end_tag_fails() {
        let engine = XmlEngine::new();
        assert!(engine.parse_html("<p><b>x</p></b>").is_err());
    }

    #[test]
    fn test_unclosed_tag_fails() {
        let engine = XmlEngine::new();
        assert!(engine.parse_html("<p>one<p>two").is_err());
    }

    #[test]
    fn test_stray_fragment_end_fails() {
        let engine = XmlEngine::new();
        let err = engine
            .parse_html("a</fragment><b>dropped</b>")
            .map(|_| ())
            .unwrap_err();
        assert!(matches!(err, EngineError::Parse(_) | EngineError::Xml(_)));
    }

    #[test]
    fn test_nested_fragment_tag_allowed() {
        assert_eq!(round_trip("<fragment>a</fragment>b"), "ab");
    }

    #[test]
    fn test_unknown_entity_fails() {
        let engine = XmlEngine::new();
        assert!(engine.parse_html("<p>&bogus;</p>").is_err());
    }

    #[test]
    fn test_decode_entity() {
        assert_eq!(decode_entity("quot").unwrap(), "\"");
        assert_eq!(decode_entity("#x263A").unwrap(), "\u{263a}");
        assert!(decode_entity("#xZZ").is_err());
    }
}
