//! Component-based markup builder with pluggable DOM engines.
//!
//! This crate turns a tree of node descriptors into a backend-owned element
//! graph, in the spirit of `React.createElement`. The actual DOM work is
//! delegated to an [`Engine`].
//!
//! # Architecture
//!
//! - [`Dom`]: the element builder. It owns the active engine and resolves
//!   [`Node`] descriptors recursively.
//! - [`NodeType`]: what a descriptor builds. Raw tags, component definitions,
//!   component instances, plain functions, or a fragment.
//! - [`Engine`]: the four markup primitives (create, append, parse, render).
//! - [`EngineKind`]: the closed registry of built-in engines:
//!   - [`Html5Engine`]: lenient HTML5 parsing through `html5ever`
//!   - `XmlEngine`: strict XML tree (behind the `xml` feature)
//!
//! A [`Dom`] is single-threaded (`!Send`). Code that needs two engines at the
//! same time creates two `Dom` values instead of switching one back and forth.
//!
//! # Example
//!
//! ```
//! use tagtree::{Child, Dom, Props};
//!
//! let dom = Dom::new();
//! let props = Props::new()
//!     .with("className", "note")
//!     .with("style", [("backgroundColor", "red")]);
//! let element = dom
//!     .build("p", props, vec![Child::from("Hello")])
//!     .unwrap();
//!
//! assert_eq!(
//!     dom.render(&element).unwrap(),
//!     r#"<p class="note" style="background-color: red;">Hello</p>"#
//! );
//! ```

mod casing;
mod dom;
mod element;
mod engine;
mod error;
mod escape;
mod html5;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod node;
mod props;
#[cfg(feature = "xml")]
mod xml;

pub use casing::camel_to_dash;
pub use dom::Dom;
pub use element::{Attributes, ChildRef, Element, FRAGMENT_TAG};
pub use engine::{Engine, EngineKind, EngineSelection};
pub use error::{ConfigurationError, DomError, EngineError};
pub use html5::Html5Engine;
#[cfg(feature = "mock")]
pub use mock::RecordingEngine;
pub use node::{Child, Component, Node, NodeType, RenderFn, Rendered};
pub use props::{PropValue, Props};
#[cfg(feature = "xml")]
pub use xml::XmlEngine;
