//! Owned SVG/XML tree and writer for the markup consumed by tinta.
//!
//! Parsing is done by `roxmltree`; the result is copied into an owned arena
//! with parent links so callers can keep it around, walk it freely and write
//! it back with some elements' attributes replaced.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`tree`] | `Document`, `Node`, `NodeId`, `Element`, `Attribute` |
//! | [`error`] | `ParseError` |
//! | [`parser`] | `parse_str` entry point |
//! | [`writer`] | `Rewrites`, `Document::to_markup_with` |
//!
//! # Quick start
//!
//! ```rust
//! use tinta_markup::{parse_str, Attribute, Rewrites};
//!
//! let doc = parse_str(r#"<svg><g fill="red"><path d="M0 0"/></g></svg>"#).unwrap();
//! let path = doc.elements_named("path").next().unwrap();
//! let group = doc.parent(path).unwrap();
//! assert_eq!(doc.element(group).unwrap().attr("fill"), Some("red"));
//!
//! let mut rewrites = Rewrites::new();
//! rewrites.insert(path, vec![Attribute::new("fill", "none")]);
//! assert_eq!(
//!     doc.to_markup_with(&rewrites),
//!     r#"<svg><g fill="red"><path fill="none"/></g></svg>"#,
//! );
//! ```

pub mod error;
pub mod parser;
pub mod tree;
pub mod writer;

pub use error::ParseError;
pub use parser::parse_str;
pub use tree::{Attribute, Document, Element, Node, NodeId, NodeKind};
pub use writer::Rewrites;
