//! Error types for engine selection, engine operations and element building.

/// Error raised when selecting a DOM engine.
///
/// Selection validates before swapping, so the previously active engine stays
/// in place when this is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// The name is not in the engine registry.
    #[error("Invalid DOM engine: {0:?}")]
    UnknownEngine(String),

    /// The engine exists but was compiled out.
    #[error("DOM engine {engine:?} requires the `{feature}` feature")]
    EngineUnavailable {
        /// Registry name of the engine.
        engine: &'static str,
        /// Cargo feature that enables it.
        feature: &'static str,
    },
}

/// Error raised by an engine primitive.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Tag name rejected by a strict engine.
    #[error("invalid tag name: {0:?}")]
    InvalidTagName(String),

    /// Attribute name rejected by a strict engine.
    #[error("invalid attribute name: {0:?}")]
    InvalidAttributeName(String),

    /// Element was created by another engine.
    #[error("element belongs to the {found} engine, expected {expected}")]
    ForeignElement {
        /// Engine performing the operation.
        expected: &'static str,
        /// Engine that created the element.
        found: &'static str,
    },

    /// Appending would make an element its own descendant.
    #[error("cannot append an element to itself or its descendants")]
    Cycle,

    /// Markup could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// XML reader error.
    #[cfg(feature = "xml")]
    #[error("XML parse error")]
    Xml(#[from] quick_xml::Error),

    /// XML attribute error.
    #[cfg(feature = "xml")]
    #[error("XML attribute error")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    /// Encoding error during XML parsing.
    #[cfg(feature = "xml")]
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),
}

/// Error raised while building or rendering elements.
#[derive(Debug, thiserror::Error)]
pub enum DomError {
    /// Engine selection failed.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// An engine primitive failed.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A component or render function failed.
    #[error("component error: {0}")]
    Component(Box<dyn std::error::Error + Send + Sync>),
}

impl DomError {
    /// Wrap an application error raised inside a component.
    pub fn component(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Component(err.into())
    }
}
