//! Node properties and their mapping to markup attributes.

use std::collections::BTreeMap;
use std::fmt;

use crate::casing::camel_to_dash;
use crate::element::Attributes;
use crate::node::Child;

/// Prop holding the resolved children of a component.
pub(crate) const CHILDREN_KEY: &str = "children";

/// Props consumed by the builder that never reach a raw tag.
const RESERVED_KEYS: &[&str] = &[CHILDREN_KEY, "block", "entity"];

/// A single prop value.
#[derive(Debug, Clone)]
pub enum PropValue {
    /// Absent value. Omitted from attributes.
    Null,
    /// Boolean, rendered as `"true"` or `"false"`.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating point number.
    Float(f64),
    /// String.
    Str(String),
    /// Nested mapping, e.g. a `style` object.
    Map(BTreeMap<String, PropValue>),
    /// A single resolved child.
    Child(Child),
    /// A sequence of resolved children.
    Children(Vec<Child>),
}

impl PropValue {
    /// Whether this is [`PropValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Attribute text for this value, `None` when it should be omitted.
    fn to_attribute(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Child(_) | Self::Children(_) => {
                tracing::trace!("Dropping child-valued prop from raw tag attributes");
                None
            }
            _ => Some(self.to_string()),
        }
    }
}

impl fmt::Display for PropValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Str(value) => f.write_str(value),
            Self::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Self::Child(_) => f.write_str("[child]"),
            Self::Children(children) => write!(f, "[{} children]", children.len()),
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for PropValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Child> for PropValue {
    fn from(value: Child) -> Self {
        Self::Child(value)
    }
}

impl From<Vec<Child>> for PropValue {
    fn from(value: Vec<Child>) -> Self {
        Self::Children(value)
    }
}

impl From<BTreeMap<String, PropValue>> for PropValue {
    fn from(value: BTreeMap<String, PropValue>) -> Self {
        Self::Map(value)
    }
}

impl<K: Into<String>, V: Into<PropValue>, const N: usize> From<[(K, V); N]> for PropValue {
    fn from(entries: [(K, V); N]) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<T: Into<PropValue>> From<Option<T>> for PropValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Properties of a node descriptor.
///
/// Keys are attribute names for raw tags, or arbitrary inputs for components.
/// `children`, `block` and `entity` are reserved: the builder injects
/// `children` for components and strips all three before creating a tag.
#[derive(Debug, Clone, Default)]
pub struct Props(BTreeMap<String, PropValue>);

impl Props {
    /// Create empty props.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prop, builder style.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a prop, returning the previous value.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropValue>,
    ) -> Option<PropValue> {
        self.0.insert(key.into(), value.into())
    }

    /// Get a prop.
    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.0.get(key)
    }

    /// Get a string prop.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(PropValue::as_str)
    }

    /// Remove a prop.
    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.0.remove(key)
    }

    /// Whether a prop is set.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of props.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no props.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate props in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Children injected by the builder, as a list.
    ///
    /// A single child is returned as a one-element list. Missing or null
    /// `children` gives an empty list.
    pub fn children(&self) -> Vec<Child> {
        match self.get(CHILDREN_KEY) {
            Some(PropValue::Child(child)) => vec![child.clone()],
            Some(PropValue::Children(children)) => children.clone(),
            Some(PropValue::Str(text)) => vec![Child::Text(text.clone())],
            _ => Vec::new(),
        }
    }

    /// Derive the attribute mapping for a raw tag.
    ///
    /// - `children`, `block` and `entity` are dropped
    /// - a `style` map becomes sorted `key: value;` rules with dashed keys
    /// - `className` becomes `class`
    /// - booleans become `"true"`/`"false"`, nulls are omitted
    pub(crate) fn into_attributes(self) -> Attributes {
        let mut attributes = Attributes::new();

        for (key, value) in self.0 {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }

            let value = match (key.as_str(), value) {
                ("style", PropValue::Map(rules)) => Some(style_rules(&rules)),
                (_, value) => value.to_attribute(),
            };
            let key = if key == "className" {
                "class".to_owned()
            } else {
                key
            };

            // A null `className` clears any `class` set before it.
            match value {
                Some(value) => {
                    attributes.insert(key, value);
                }
                None => {
                    attributes.remove(&key);
                }
            }
        }

        attributes
    }
}

impl<K: Into<String>, V: Into<PropValue>> FromIterator<(K, V)> for Props {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<PropValue>, const N: usize> From<[(K, V); N]> for Props {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl IntoIterator for Props {
    type Item = (String, PropValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, PropValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Serialize a style mapping into a single CSS declaration string.
///
/// Rules are sorted as whole `key: value;` strings and concatenated without
/// a separator. Null values are skipped.
fn style_rules(style: &BTreeMap<String, PropValue>) -> String {
    let mut rules: Vec<String> = style
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| format!("{}: {value};", camel_to_dash(key)))
        .collect();
    rules.sort();
    rules.concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn attrs(pairs: &[(&str, &str)]) -> Attributes {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_reserved_keys_stripped() {
        let props = Props::new()
            .with("children", vec![Child::from("x")])
            .with("block", [("type", "unstyled")])
            .with("entity", [("type", "LINK")])
            .with("id", "a");
        assert_eq!(props.into_attributes(), attrs(&[("id", "a")]));
    }

    #[test]
    fn test_style_sorted_and_dashed() {
        let props = Props::new().with("style", [("color", "blue"), ("backgroundColor", "red")]);
        assert_eq!(
            props.into_attributes(),
            attrs(&[("style", "background-color: red;color: blue;")])
        );
    }

    #[test]
    fn test_style_sorted_by_rule_text() {
        // "a-b: ..." sorts before "a: ..." because '-' < ':'.
        let props = Props::new().with("style", [("a", "1"), ("aB", "2")]);
        assert_eq!(
            props.into_attributes(),
            attrs(&[("style", "a-b: 2;a: 1;")])
        );
    }

    #[test]
    fn test_style_string_passed_through() {
        let props = Props::new().with("style", "color: red;");
        assert_eq!(props.into_attributes(), attrs(&[("style", "color: red;")]));
    }

    #[test]
    fn test_style_numbers_and_nulls() {
        let props = Props::new().with(
            "style",
            [
                ("zIndex", PropValue::Int(3)),
                ("margin", PropValue::Null),
            ],
        );
        assert_eq!(props.into_attributes(), attrs(&[("style", "z-index: 3;")]));
    }

    #[test]
    fn test_class_name_renamed() {
        let props = Props::new().with("className", "foo bar");
        assert_eq!(props.into_attributes(), attrs(&[("class", "foo bar")]));
    }

    #[test]
    fn test_class_name_overrides_class() {
        let props = Props::new().with("class", "a").with("className", "b");
        assert_eq!(props.into_attributes(), attrs(&[("class", "b")]));
    }

    #[test]
    fn test_null_class_name_clears_class() {
        let props = Props::new()
            .with("class", "a")
            .with("className", PropValue::Null);
        assert_eq!(props.into_attributes(), Attributes::new());
    }

    #[test]
    fn test_booleans_and_nulls() {
        let props = Props::new()
            .with("disabled", true)
            .with("checked", false)
            .with("hidden", PropValue::Null);
        assert_eq!(
            props.into_attributes(),
            attrs(&[("checked", "false"), ("disabled", "true")])
        );
    }

    #[test]
    fn test_numbers_stringified() {
        let props = Props::new().with("colspan", 2).with("opacity", 0.5);
        assert_eq!(
            props.into_attributes(),
            attrs(&[("colspan", "2"), ("opacity", "0.5")])
        );
    }

    #[test]
    fn test_child_valued_prop_dropped() {
        let props = Props::new().with("icon", Child::from("x")).with("id", "a");
        assert_eq!(props.into_attributes(), attrs(&[("id", "a")]));
    }

    #[test]
    fn test_map_prop_stringified() {
        let props = Props::new().with("data-meta", [("a", 1), ("b", 2)]);
        assert_eq!(
            props.into_attributes(),
            attrs(&[("data-meta", "{a: 1, b: 2}")])
        );
    }

    #[test]
    fn test_children_accessor() {
        let single = Props::new().with("children", Child::from("a"));
        assert_eq!(single.children().len(), 1);

        let many = Props::new().with("children", vec![Child::from("a"), Child::from("b")]);
        assert_eq!(many.children().len(), 2);

        assert!(Props::new().children().is_empty());
    }

    #[test]
    fn test_option_into_prop_value() {
        assert!(PropValue::from(None::<&str>).is_null());
        assert_eq!(PropValue::from(Some("x")).as_str(), Some("x"));
    }
}
