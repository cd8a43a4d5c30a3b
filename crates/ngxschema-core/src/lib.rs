//! # ngxschema-core — Foundational Types for nginx-json-schema
//!
//! This crate is the leaf of the workspace DAG. It defines the vocabulary
//! every other crate speaks: the tokens of the informal directive syntax
//! notation used by the nginx documentation, the tokenizer that produces
//! them, the alternation splitter, and the [`Directive`] descriptor that
//! carries one documented directive from extraction to schema synthesis.
//!
//! ## Pipeline Position
//!
//! ```text
//! documentation record ──► tokenize_syntax ──► group_or_variants ──► synthesizer
//!        (ngxschema-docs)        (here)             (here)        (ngxschema-schema)
//! ```
//!
//! ## Key Design Principles
//!
//! 1. **Closed node set.** Syntax descriptions are a [`SyntaxNode`] tagged
//!    union. Unknown documentation elements are rejected when the node is
//!    constructed, never silently ignored during tokenization.
//!
//! 2. **Brackets are data, not grammar.** `[`/`]` become tokens so callers
//!    can detect them, but [`group_or_variants`] refuses them: nested
//!    optional syntax is declared unsupported instead of approximated.
//!
//! 3. **Descriptors are immutable.** A [`Directive`] is built once per
//!    documented directive and only read afterwards.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ngxschema-*` crates.
//! - No I/O.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod directive;
pub mod error;
pub mod token;
pub mod tokenizer;
pub mod variants;

pub use directive::{
    module_namespace, normalize_context, DefaultValue, Directive, ANY_CONTEXT, CORE_MODULE,
    MAIN_CONTEXT,
};
pub use error::SyntaxError;
pub use token::SyntaxToken;
pub use tokenizer::{tokenize_syntax, SyntaxNode};
pub use variants::group_or_variants;
