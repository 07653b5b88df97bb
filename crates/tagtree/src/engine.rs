//! DOM engine contract and the registry of built-in engines.
//!
//! An engine implements the four markup primitives the builder relies on.
//! The builder only calls [`Engine::create_tag`] and [`Engine::append_child`];
//! parsing and rendering are forwarded verbatim for callers.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use crate::element::{Attributes, ChildRef, Element};
use crate::error::{ConfigurationError, EngineError};
use crate::html5::Html5Engine;

/// Backend implementing the markup primitives.
pub trait Engine {
    /// Name stamped on every element this engine creates.
    fn name(&self) -> &'static str;

    /// Create a tag node with the given attributes.
    fn create_tag(&self, name: &str, attributes: &Attributes) -> Result<Element, EngineError>;

    /// Parse markup into a node.
    fn parse_html(&self, markup: &str) -> Result<Element, EngineError>;

    /// Append an element or text to `parent`.
    fn append_child(&self, parent: &Element, child: ChildRef<'_>) -> Result<(), EngineError>;

    /// Serialize a node to markup.
    fn render(&self, element: &Element) -> Result<String, EngineError>;

    /// Serialize a node in a human-readable, indented form.
    fn render_debug(&self, element: &Element) -> Result<String, EngineError>;
}

/// Built-in engines, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EngineKind {
    /// Lenient HTML5 parsing (`html5ever`). The default.
    #[default]
    Html5,
    /// Strict XML tree (`quick-xml`).
    Xml,
}

impl EngineKind {
    /// All registry entries.
    pub const ALL: [Self; 2] = [Self::Html5, Self::Xml];

    /// Registry name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html5 => "html5",
            Self::Xml => "xml",
        }
    }

    /// Instantiate the engine.
    ///
    /// Engines are only constructed when selected. The XML engine needs the
    /// `xml` feature.
    pub fn load(self) -> Result<Rc<dyn Engine>, ConfigurationError> {
        match self {
            Self::Html5 => Ok(Rc::new(Html5Engine::new())),
            #[cfg(feature = "xml")]
            Self::Xml => Ok(Rc::new(crate::xml::XmlEngine::new())),
            #[cfg(not(feature = "xml"))]
            Self::Xml => Err(ConfigurationError::EngineUnavailable {
                engine: self.as_str(),
                feature: "xml",
            }),
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = ConfigurationError;

    /// Case-insensitive lookup in the registry.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigurationError::UnknownEngine(name.to_owned()))
    }
}

/// Engine selection request.
#[derive(Clone, Default)]
pub enum EngineSelection {
    /// Keep the active engine.
    #[default]
    Keep,
    /// Reinstall the default engine ([`EngineKind::Html5`]).
    Default,
    /// Registry name, case-insensitive. An empty name keeps the active engine.
    Name(String),
    /// User-supplied engine, used as is.
    Engine(Rc<dyn Engine>),
}

impl EngineSelection {
    /// Resolve to the engine to install, `None` to keep the current one.
    pub(crate) fn resolve(self) -> Result<Option<Rc<dyn Engine>>, ConfigurationError> {
        match self {
            Self::Keep => Ok(None),
            Self::Default => EngineKind::default().load().map(Some),
            Self::Name(name) if name.is_empty() => Ok(None),
            Self::Name(name) => name.parse::<EngineKind>()?.load().map(Some),
            Self::Engine(engine) => Ok(Some(engine)),
        }
    }
}

impl fmt::Debug for EngineSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keep => f.write_str("Keep"),
            Self::Default => f.write_str("Default"),
            Self::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Self::Engine(engine) => f.debug_tuple("Engine").field(&engine.name()).finish(),
        }
    }
}

impl From<&str> for EngineSelection {
    fn from(name: &str) -> Self {
        Self::Name(name.to_owned())
    }
}

impl From<String> for EngineSelection {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<Option<&str>> for EngineSelection {
    fn from(name: Option<&str>) -> Self {
        name.map_or(Self::Keep, Self::from)
    }
}

impl From<EngineKind> for EngineSelection {
    fn from(kind: EngineKind) -> Self {
        Self::Name(kind.as_str().to_owned())
    }
}

impl From<Rc<dyn Engine>> for EngineSelection {
    fn from(engine: Rc<dyn Engine>) -> Self {
        Self::Engine(engine)
    }
}
