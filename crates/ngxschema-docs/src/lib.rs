//! # ngxschema-docs — Module Documentation Reader
//!
//! Reads the XML sources of the nginx module documentation and turns every
//! documented directive into a [`Directive`](ngxschema_core::Directive)
//! descriptor ready for schema synthesis.
//!
//! ## Pipeline Position
//!
//! ```text
//! module XML ──► xml::parse_document ──► extract_directives ──► Directive
//!                                              │
//!                                              └─► render_description (Markdown)
//! ```
//!
//! - [`xml`]: owned element tree over `quick-xml` events.
//! - [`extract`]: `module` / `directive` structure to descriptors.
//! - [`markdown`]: description markup to CommonMark via `comrak`.
//!
//! ## Crate Policy
//!
//! - Depends only on `ngxschema-core` internally.
//! - Works on strings; reading files is left to the caller.
//! - Every structural problem in a module document is a [`DocsError`].

pub mod error;
pub mod extract;
pub mod markdown;
pub mod xml;

pub use error::DocsError;
pub use extract::{directives_from_xml, extract_directives, is_module_document};
pub use markdown::{render_description, render_markdown, DescNode, TagItem};
pub use xml::{parse_document, XmlElement, XmlNode};
