//! Element builder.
//!
//! [`Dom`] resolves node descriptors into engine elements, dispatching on the
//! descriptor's [`NodeType`]:
//!
//! 1. fragment: an empty `fragment` element, nothing else is looked at
//! 2. component definition or instance: `render(props)` with `children` injected
//! 3. plain function: called with `children` injected
//! 4. raw tag: props mapped to attributes, children appended in order
//!
//! Component and function results are built recursively. A result of
//! [`Rendered::Nothing`] becomes an empty fragment, and a plain text or list
//! result is wrapped in a fragment.

use std::fmt;
use std::rc::Rc;

use crate::element::{Attributes, ChildRef, Element, FRAGMENT_TAG};
use crate::engine::{Engine, EngineSelection};
use crate::error::{ConfigurationError, DomError};
use crate::html5::Html5Engine;
use crate::node::{Child, Node, NodeType, Rendered};
use crate::props::{CHILDREN_KEY, PropValue, Props};

/// Element builder bound to one active engine.
///
/// Select the engine once with [`Dom::use_engine`], then build any number of
/// elements. Every `Dom` owns its engine, so two builders never interfere.
/// A `Dom` is not `Send`: concurrent builds use one `Dom` per thread.
pub struct Dom {
    engine: Rc<dyn Engine>,
}

impl Dom {
    /// Create a builder using the default engine.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: Rc::new(Html5Engine::new()),
        }
    }

    /// Create a builder with an explicit selection.
    ///
    /// [`EngineSelection::Keep`] keeps the default engine.
    pub fn with_engine(selection: impl Into<EngineSelection>) -> Result<Self, ConfigurationError> {
        let mut dom = Self::new();
        dom.use_engine(selection)?;
        Ok(dom)
    }

    /// Create a builder around a custom engine.
    pub fn from_engine(engine: Rc<dyn Engine>) -> Self {
        Self { engine }
    }

    /// Active engine.
    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    /// Choose the engine used by subsequent builds.
    ///
    /// Accepts a registry name (see [`EngineKind`](crate::EngineKind)), a custom engine,
    /// [`EngineSelection::Default`] to reinstall the html5 engine, or
    /// [`EngineSelection::Keep`]. An empty name or `None` keeps the active
    /// engine. An unknown name fails and leaves the active engine unchanged.
    pub fn use_engine(
        &mut self,
        selection: impl Into<EngineSelection>,
    ) -> Result<(), ConfigurationError> {
        if let Some(engine) = selection.into().resolve()? {
            tracing::debug!(engine = engine.name(), "Selected DOM engine");
            self.engine = engine;
        }
        Ok(())
    }

    /// Build an element from its parts.
    ///
    /// Signature inspired by `React.createElement(type, props, ...children)`.
    pub fn build(
        &self,
        ty: impl Into<NodeType>,
        props: Props,
        children: Vec<Child>,
    ) -> Result<Element, DomError> {
        self.create_element(Node::new(ty, props, children))
    }

    /// Resolve a node descriptor into an element.
    ///
    /// The descriptor is consumed. Errors from components and from the engine
    /// are returned unchanged.
    pub fn create_element(&self, node: Node) -> Result<Element, DomError> {
        let Node {
            ty,
            props,
            children,
        } = node;

        if ty.is_fragment() {
            return self.fragment();
        }

        let rendered = match ty {
            NodeType::Fragment => return self.fragment(),
            NodeType::Tag(name) => {
                let children = self.resolve_children(children)?;
                return self.create_tag(&name, props, &children);
            }
            NodeType::ComponentType(construct) => {
                tracing::trace!("Rendering component definition");
                let props = self.inject_children(props, children)?;
                construct().render(self, props)?
            }
            NodeType::ComponentInstance(component) => {
                tracing::trace!("Rendering component instance");
                let props = self.inject_children(props, children)?;
                component.render(self, props)?
            }
            NodeType::Function(render) => {
                tracing::trace!("Rendering function");
                let props = self.inject_children(props, children)?;
                render(self, props)?
            }
        };

        match rendered {
            Rendered::Node(node) => self.create_element(node),
            Rendered::Element(element) => Ok(element),
            Rendered::Nothing => self.fragment(),
            Rendered::Child(Child::Element(element)) => Ok(element),
            Rendered::Child(Child::Node(node)) => self.create_element(node),
            Rendered::Child(child) => {
                let children = self.resolve_children(vec![child])?;
                self.create_tag(FRAGMENT_TAG, Props::new(), &children)
            }
        }
    }

    /// Parse markup with the active engine.
    pub fn parse_html(&self, markup: &str) -> Result<Element, DomError> {
        Ok(self.engine.parse_html(markup)?)
    }

    /// Append an element or text with the active engine.
    pub fn append_child(&self, parent: &Element, child: ChildRef<'_>) -> Result<(), DomError> {
        Ok(self.engine.append_child(parent, child)?)
    }

    /// Render an element with the active engine.
    pub fn render(&self, element: &Element) -> Result<String, DomError> {
        Ok(self.engine.render(element)?)
    }

    /// Render an element in indented, human-readable form.
    pub fn render_debug(&self, element: &Element) -> Result<String, DomError> {
        Ok(self.engine.render_debug(element)?)
    }

    fn fragment(&self) -> Result<Element, DomError> {
        Ok(self.engine.create_tag(FRAGMENT_TAG, &Attributes::new())?)
    }

    fn create_tag(&self, name: &str, props: Props, children: &[Child]) -> Result<Element, DomError> {
        let attributes = props.into_attributes();
        let element = self.engine.create_tag(name, &attributes)?;

        for child in children {
            match child {
                Child::Element(child) => {
                    self.engine.append_child(&element, ChildRef::Element(child))?;
                }
                Child::Text(text) if !text.is_empty() => {
                    self.engine.append_child(&element, ChildRef::Text(text))?;
                }
                _ => {}
            }
        }

        Ok(element)
    }

    /// Store resolved children under the `children` prop.
    ///
    /// A single child is stored directly, any other count as a list.
    fn inject_children(&self, mut props: Props, children: Vec<Child>) -> Result<Props, DomError> {
        let mut children = self.resolve_children(children)?;
        let value = if children.len() == 1 {
            PropValue::Child(children.remove(0))
        } else {
            PropValue::Children(children)
        };
        props.insert(CHILDREN_KEY, value);
        Ok(props)
    }

    /// Build descriptor children and flatten lists, keeping their order.
    ///
    /// Empty entries are kept so components see the children they were given.
    fn resolve_children(&self, children: Vec<Child>) -> Result<Vec<Child>, DomError> {
        let mut resolved = Vec::with_capacity(children.len());
        for child in children {
            self.resolve_child(child, &mut resolved)?;
        }
        Ok(resolved)
    }

    fn resolve_child(&self, child: Child, out: &mut Vec<Child>) -> Result<(), DomError> {
        match child {
            Child::Node(node) => out.push(Child::Element(self.create_element(node)?)),
            Child::List(items) => {
                for item in items {
                    self.resolve_child(item, out)?;
                }
            }
            other => out.push(other),
        }
        Ok(())
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dom")
            .field("engine", &self.engine.name())
            .finish()
    }
}
