//! JSON node trees.
//!
//! A tree is a node object, a string, `null`, or an array of those:
//!
//! ```json
//! {"type": "p", "props": {"className": "intro"}, "children": ["Hello ", {"type": "b", "children": ["world"]}]}
//! ```
//!
//! `"type": null` (or a missing type) builds an empty fragment: its props and
//! children are ignored, as for any fragment descriptor. A root that is not a
//! node object is wrapped in a `fragment` tag, so its text and elements are
//! rendered in place.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use tagtree::{Child, FRAGMENT_TAG, Node, PropValue, Props};

use crate::error::CliError;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct JsonNode {
    #[serde(rename = "type", default)]
    ty: Option<String>,
    #[serde(default)]
    props: BTreeMap<String, Value>,
    #[serde(default)]
    children: Vec<JsonChild>,
}

// Nodes are read from objects only. A derived struct also accepts a
// positional array, which would swallow child lists.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonChild {
    Null,
    Text(String),
    List(Vec<JsonChild>),
    Node(Map<String, Value>),
}

/// Parse a JSON document into a node descriptor.
pub(crate) fn parse_tree(input: &str) -> Result<Node, CliError> {
    let root: JsonChild = serde_json::from_str(input)?;
    Ok(match convert_child(root)? {
        Child::Node(node) => node,
        other => Node::new(FRAGMENT_TAG, Props::new(), vec![other]),
    })
}

fn convert_node(node: JsonNode) -> Result<Node, CliError> {
    let props = node
        .props
        .into_iter()
        .map(|(key, value)| {
            let value = convert_prop(&key, value)?;
            Ok((key, value))
        })
        .collect::<Result<Props, CliError>>()?;
    let children = node
        .children
        .into_iter()
        .map(convert_child)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Node::new(node.ty.as_deref(), props, children))
}

fn convert_child(child: JsonChild) -> Result<Child, CliError> {
    Ok(match child {
        JsonChild::Null => Child::Empty,
        JsonChild::Text(text) => Child::Text(text),
        JsonChild::Node(object) => {
            let node: JsonNode = serde_json::from_value(Value::Object(object))?;
            Child::Node(convert_node(node)?)
        }
        JsonChild::List(items) => Child::List(
            items
                .into_iter()
                .map(convert_child)
                .collect::<Result<_, _>>()?,
        ),
    })
}

fn convert_prop(key: &str, value: Value) -> Result<PropValue, CliError> {
    Ok(match value {
        Value::Null => PropValue::Null,
        Value::Bool(b) => PropValue::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                PropValue::Int(i)
            } else if n.is_f64() {
                PropValue::Float(n.as_f64().unwrap_or(f64::NAN))
            } else {
                // u64 above i64::MAX, kept exact
                PropValue::Str(n.to_string())
            }
        }
        Value::String(s) => PropValue::Str(s),
        Value::Object(map) => PropValue::Map(
            map.into_iter()
                .map(|(k, v)| {
                    let v = convert_prop(key, v)?;
                    Ok((k, v))
                })
                .collect::<Result<_, CliError>>()?,
        ),
        Value::Array(_) => {
            return Err(CliError::Tree(format!(
                "prop {key:?} is an array, which has no attribute form"
            )));
        }
    })
}
