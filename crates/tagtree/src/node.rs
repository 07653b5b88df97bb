//! Node descriptors: the `(type, props, children)` triple.

use std::fmt;
use std::rc::Rc;

use crate::dom::Dom;
use crate::element::Element;
use crate::error::DomError;
use crate::props::Props;

/// Reusable composite node.
///
/// `render` receives the node's props with `children` injected and returns
/// either a further descriptor or a finished element.
pub trait Component {
    fn render(&self, dom: &Dom, props: Props) -> Result<Rendered, DomError>;
}

/// Signature of a plain render function.
pub type RenderFn = dyn Fn(&Dom, Props) -> Result<Rendered, DomError>;

/// Constructor for a component definition.
pub type ComponentFactory = fn() -> Box<dyn Component>;

/// What a node descriptor builds.
#[derive(Clone)]
pub enum NodeType {
    /// Empty fragment. Props and children are ignored.
    Fragment,
    /// Literal tag name.
    Tag(String),
    /// Component definition, instantiated on every build.
    ComponentType(ComponentFactory),
    /// Already-instantiated component.
    ComponentInstance(Rc<dyn Component>),
    /// Plain render function.
    Function(Rc<RenderFn>),
}

impl NodeType {
    /// Component definition built from `C::default()` on every build.
    pub fn component<C: Component + Default + 'static>() -> Self {
        Self::ComponentType(construct::<C>)
    }

    /// Already-instantiated component.
    pub fn instance(component: impl Component + 'static) -> Self {
        Self::ComponentInstance(Rc::new(component))
    }

    /// Plain render function.
    pub fn function(
        render: impl Fn(&Dom, Props) -> Result<Rendered, DomError> + 'static,
    ) -> Self {
        Self::Function(Rc::new(render))
    }

    /// Whether this builds an empty fragment.
    pub fn is_fragment(&self) -> bool {
        match self {
            Self::Fragment => true,
            Self::Tag(name) => name.is_empty(),
            _ => false,
        }
    }
}

fn construct<C: Component + Default + 'static>() -> Box<dyn Component> {
    Box::new(C::default())
}

impl fmt::Debug for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fragment => f.write_str("Fragment"),
            Self::Tag(name) => f.debug_tuple("Tag").field(name).finish(),
            Self::ComponentType(_) => f.write_str("ComponentType(..)"),
            Self::ComponentInstance(_) => f.write_str("ComponentInstance(..)"),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<&str> for NodeType {
    fn from(name: &str) -> Self {
        if name.is_empty() {
            Self::Fragment
        } else {
            Self::Tag(name.to_owned())
        }
    }
}

impl From<String> for NodeType {
    fn from(name: String) -> Self {
        if name.is_empty() {
            Self::Fragment
        } else {
            Self::Tag(name)
        }
    }
}

impl From<Option<&str>> for NodeType {
    fn from(name: Option<&str>) -> Self {
        name.map_or(Self::Fragment, Self::from)
    }
}

impl From<Rc<dyn Component>> for NodeType {
    fn from(component: Rc<dyn Component>) -> Self {
        Self::ComponentInstance(component)
    }
}

/// Child of a node descriptor.
#[derive(Debug, Clone)]
pub enum Child {
    /// Nothing. Skipped when appending.
    Empty,
    /// Literal text. Empty text is skipped when appending.
    Text(String),
    /// Already-built element.
    Element(Element),
    /// Unbuilt descriptor, resolved before its parent.
    Node(Node),
    /// Sequence flattened into the surrounding children.
    List(Vec<Child>),
}

impl Child {
    /// Whether appending this child is a no-op.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Element> for Child {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Vec<Child>> for Child {
    fn from(children: Vec<Child>) -> Self {
        Self::List(children)
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(child: Option<T>) -> Self {
        child.map_or(Self::Empty, Into::into)
    }
}

/// Result of rendering a component or function.
#[derive(Debug, Clone)]
pub enum Rendered {
    /// Further descriptor, built recursively.
    Node(Node),
    /// Finished element, returned as is.
    Element(Element),
    /// Nothing. Replaced by an empty fragment.
    Nothing,
    /// Child value, such as text passed through from `children`. Text and
    /// lists are wrapped in a fragment; empty text gives an empty fragment.
    Child(Child),
}

impl From<Node> for Rendered {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Element> for Rendered {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<Child> for Rendered {
    fn from(child: Child) -> Self {
        Self::Child(child)
    }
}

impl<T: Into<Rendered>> From<Option<T>> for Rendered {
    fn from(rendered: Option<T>) -> Self {
        rendered.map_or(Self::Nothing, Into::into)
    }
}

/// Unbuilt markup node.
#[derive(Debug, Clone)]
pub struct Node {
    /// What to build.
    pub ty: NodeType,
    /// Node properties.
    pub props: Props,
    /// Ordered children.
    pub children: Vec<Child>,
}

impl Node {
    /// Create a descriptor.
    pub fn new(ty: impl Into<NodeType>, props: Props, children: Vec<Child>) -> Self {
        Self {
            ty: ty.into(),
            props,
            children,
        }
    }

    /// Raw tag without props or children.
    pub fn tag(name: impl Into<String>) -> Self {
        Self::new(NodeType::from(name.into()), Props::new(), Vec::new())
    }

    /// Empty fragment.
    pub fn fragment() -> Self {
        Self::new(NodeType::Fragment, Props::new(), Vec::new())
    }

    /// Add a prop.
    #[must_use]
    pub fn with_prop(
        mut self,
        key: impl Into<String>,
        value: impl Into<crate::props::PropValue>,
    ) -> Self {
        self.props.insert(key, value);
        self
    }

    /// Append a child.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Append several children.
    #[must_use]
    pub fn with_children<C: Into<Child>>(mut self, children: impl IntoIterator<Item = C>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}
