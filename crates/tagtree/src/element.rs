//! Opaque element handles shared between the builder and engines.

use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use crate::error::EngineError;

/// Tag name of the transparent container element.
///
/// Built-in engines render only the children of a `fragment`.
pub const FRAGMENT_TAG: &str = "fragment";

/// Attribute mapping passed to [`Engine::create_tag`](crate::Engine::create_tag).
pub type Attributes = BTreeMap<String, String>;

/// Backend-owned element.
///
/// The builder never looks inside an element. Engines store their own node
/// type and get it back with [`Element::downcast_ref`]. Cloning is cheap and
/// yields a handle to the same node.
#[derive(Clone)]
pub struct Element {
    engine: &'static str,
    node: Rc<dyn Any>,
}

impl Element {
    /// Wrap an engine node.
    pub fn new<T: Any>(engine: &'static str, node: T) -> Self {
        Self {
            engine,
            node: Rc::new(node),
        }
    }

    /// Name of the engine that created this element.
    pub fn engine(&self) -> &'static str {
        self.engine
    }

    /// Borrow the engine node if it has type `T`.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.node.downcast_ref::<T>()
    }

    /// Borrow the engine node, failing with [`EngineError::ForeignElement`].
    pub fn node_for<T: Any>(&self, engine: &'static str) -> Result<&T, EngineError> {
        self.downcast_ref::<T>()
            .ok_or(EngineError::ForeignElement {
                expected: engine,
                found: self.engine,
            })
    }

    /// Whether both handles point at the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

/// Child passed to [`Engine::append_child`](crate::Engine::append_child).
#[derive(Debug, Clone, Copy)]
pub enum ChildRef<'a> {
    /// Nested element.
    Element(&'a Element),
    /// Literal text.
    Text(&'a str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downcast_matching_type() {
        let element = Element::new("test", 42_u32);
        assert_eq!(element.downcast_ref::<u32>(), Some(&42));
        assert_eq!(element.engine(), "test");
    }

    #[test]
    fn test_node_for_foreign_type() {
        let element = Element::new("other", "node");
        let err = element.node_for::<u32>("test").unwrap_err();
        assert!(matches!(
            err,
            EngineError::ForeignElement {
                expected: "test",
                found: "other"
            }
        ));
    }

    #[test]
    fn test_clone_shares_node() {
        let element = Element::new("test", 1_u8);
        let copy = element.clone();
        assert!(element.ptr_eq(&copy));
        assert!(!element.ptr_eq(&Element::new("test", 1_u8)));
    }
}
