//! Errors raised while loading a schema document for filtering.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    /// The document has no `$defs` object.
    #[error("missing $defs in schema")]
    MissingDefs,

    /// The document is not JSON or not a schema document.
    #[error("invalid schema document: {0}")]
    Json(#[from] serde_json::Error),
}
