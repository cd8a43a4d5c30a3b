//! # Error Types
//!
//! Errors raised while turning a syntax description into tokens and
//! variants. All of them are fatal for the run: a malformed syntax
//! description means the documentation source changed shape and the
//! generated schema would be wrong.

use thiserror::Error;

/// Error in directive syntax handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A syntax description contained an element that is neither a
    /// literal, a value placeholder, nor plain text.
    #[error("unexpected element: {0}")]
    UnexpectedElement(String),

    /// Optional-bracket syntax reached the variant grouper.
    #[error("bracket syntax is not supported")]
    BracketSyntax,

    /// A token of a kind that cannot stand where it was found.
    #[error("unexpected token type: {kind}")]
    UnexpectedToken {
        /// Upper-case token kind name (e.g. `SEPARATOR`).
        kind: &'static str,
    },
}
