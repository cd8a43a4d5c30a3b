//! # Directive Descriptor
//!
//! [`Directive`] is the record the documentation extractor produces for each
//! documented directive, and the only input of schema synthesis.
//!
//! ## Identifiers
//!
//! - Directive id: `<module>:<name>` (e.g. `http_gzip:gzip`). Unique across
//!   the whole input; duplicates are rejected by the document builder.
//! - Module namespace: the module name up to the first `_`
//!   (`http_proxy` → `http`, `core` → `core`).
//! - Context id: `context:<name>` when the namespace is `core` or equals the
//!   directive name, `context:<namespace>:<name>` otherwise. This keeps e.g.
//!   `http` `server` and `stream` `server` blocks apart.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::token::SyntaxToken;

/// Context that matches every block.
pub const ANY_CONTEXT: &str = "any";

/// Top-level configuration context.
pub const MAIN_CONTEXT: &str = "main";

/// The universal module; its directives are legal in every namespace.
pub const CORE_MODULE: &str = "core";

/// Documented default value of a directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    /// A purely numeric default.
    Number(u64),
    /// Any other default, verbatim.
    Text(String),
}

impl DefaultValue {
    /// Normalize the text of a `<default>` element.
    ///
    /// Platform-dependent defaults are written `A|B` (e.g. `4k|8k`); the
    /// second form wins when present. All-digit values become numbers.
    pub fn from_doc_text(raw: &str) -> Self {
        let mut parts = raw.split('|');
        let first = parts.next().unwrap_or_default();
        let value = parts.next().filter(|b| !b.is_empty()).unwrap_or(first);

        if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = value.parse::<u64>() {
                return Self::Number(n);
            }
        }
        Self::Text(value.to_string())
    }
}

/// One documented directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directive {
    /// Module name without the `ngx_` prefix and `_module` suffix.
    pub module: String,
    /// Directive name.
    pub name: String,
    /// Tokenized syntax forms, one per `<syntax>` element.
    pub syntax: Vec<Vec<SyntaxToken>>,
    /// Whether the directive opens a nested block.
    pub block: bool,
    /// Documented default value (never set for block directives).
    pub default: Option<DefaultValue>,
    /// Contexts in which the directive is legal. Never empty: an empty or
    /// missing `<context>` is recorded as [`ANY_CONTEXT`].
    pub context: BTreeSet<String>,
    /// Rendered Markdown description.
    pub description: String,
    /// Version in which the directive appeared.
    pub since: Option<String>,
    /// Link to the directive documentation.
    pub doc_url: String,
}

impl Directive {
    /// `<module>:<name>`.
    pub fn id(&self) -> String {
        format!("{}:{}", self.module, self.name)
    }

    /// Namespace of the declaring module.
    pub fn namespace(&self) -> &str {
        module_namespace(&self.module)
    }

    /// Definitions key of the context this directive opens.
    pub fn context_id(&self) -> String {
        let namespace = self.namespace();
        if namespace == CORE_MODULE || namespace == self.name {
            format!("context:{}", self.name)
        } else {
            format!("context:{namespace}:{}", self.name)
        }
    }

    /// True when the directive has at most one syntax form and it is empty.
    pub fn takes_no_parameters(&self) -> bool {
        self.syntax.len() < 2 && self.syntax.first().map_or(true, Vec::is_empty)
    }

    /// True when any syntax form contains a token matching `pred`.
    pub fn any_token(&self, pred: impl Fn(&SyntaxToken) -> bool) -> bool {
        self.syntax.iter().flatten().any(pred)
    }
}

/// Namespace of a module: its name up to the first `_`.
pub fn module_namespace(module: &str) -> &str {
    module.split('_').next().unwrap_or(module)
}

/// Normalize the text of a `<context>` element.
///
/// Empty means "anywhere"; multi-word contexts (`if in location`) are joined
/// with underscores.
pub fn normalize_context(raw: &str) -> String {
    if raw.is_empty() {
        ANY_CONTEXT.to_string()
    } else {
        raw.replace(' ', "_")
    }
}
