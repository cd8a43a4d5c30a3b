//! Errors raised while reading module documentation.

use ngxschema_core::SyntaxError;
use thiserror::Error;

/// Fatal documentation problems. The whole run is aborted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocsError {
    /// Malformed XML.
    #[error("XML error: {0}")]
    Xml(String),

    /// A required element is absent.
    #[error("missing \"{0}\" element")]
    MissingElement(&'static str),

    /// A required attribute is absent or empty.
    #[error("expected \"{attribute}\" attribute in \"{element}\" element")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// The module `link` does not follow `/ngx_<name>_module.<ext>`.
    #[error("unexpected module link: {0}")]
    UnexpectedModuleLink(String),

    /// A `tag-name` in a tag list has no following `tag-desc`.
    #[error("tag-desc not found for tag-name {0}")]
    MissingTagDescription(String),

    /// The Markdown formatter failed.
    #[error("cannot render description: {0}")]
    Render(String),

    /// A syntax description contains an unsupported element.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}
