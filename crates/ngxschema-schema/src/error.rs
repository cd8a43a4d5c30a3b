//! Errors raised while synthesizing a schema document.

use ngxschema_core::SyntaxError;
use thiserror::Error;

/// Fatal conditions of schema generation. No partial document is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two input directives share the same `<module>:<name>` id.
    #[error("found duplicated directive: {0}")]
    DuplicateDirective(String),

    /// A directive's syntax could not be turned into a fragment.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
}
