//! # Document Builder
//!
//! Assembles the final JSON Schema document from directive descriptors.
//!
//! ## Layout
//!
//! ```text
//! {
//!   "$schema": "https://json-schema.org/draft/2020-12/schema",
//!   "$id": ...,                       (only when set)
//!   "$comment": ...,
//!   "type": "object",
//!   "properties": { <main context> },
//!   "$defs": {
//!     "context:<id>": { ... },        (one per block context)
//!     "<module>:<directive>": { ... } (one per directive)
//!   }
//! }
//! ```
//!
//! ## Determinism
//!
//! All maps are `BTreeMap`s and every struct serializes its fields in
//! declaration order, so the same input always yields byte-identical output.

use std::collections::{BTreeMap, BTreeSet};

use ngxschema_core::Directive;
use serde::{Deserialize, Serialize};

use crate::context::{context_schemas, main_schema};
use crate::error::SchemaError;
use crate::fragment::{Schema, SchemaType};
use crate::synth::synthesize;

/// Dialect of every generated document.
pub const SCHEMA_DIALECT: &str = "https://json-schema.org/draft/2020-12/schema";

/// A generated schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDocument {
    #[serde(rename = "$schema")]
    pub schema: String,

    #[serde(rename = "$id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "$comment", default)]
    pub comment: String,

    #[serde(rename = "type")]
    pub kind: SchemaType,

    #[serde(default)]
    pub properties: BTreeMap<String, Schema>,

    /// Context and directive definitions in one key-sorted map.
    #[serde(rename = "$defs")]
    pub defs: BTreeMap<String, Schema>,
}

impl SchemaDocument {
    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Number of `context:*` definitions.
    pub fn context_count(&self) -> usize {
        self.defs.keys().filter(|k| k.starts_with("context:")).count()
    }
}

/// Build the schema document for `directives`.
///
/// # Errors
///
/// - [`SchemaError::DuplicateDirective`] if two directives share a
///   `<module>:<name>` id.
/// - [`SchemaError::Syntax`] if a directive's syntax cannot be synthesized.
pub fn generate_document(
    directives: &[Directive],
    comment: &str,
) -> Result<SchemaDocument, SchemaError> {
    let mut seen = BTreeSet::new();
    for dir in directives {
        let id = dir.id();
        if !seen.insert(id.clone()) {
            return Err(SchemaError::DuplicateDirective(id));
        }
    }

    let main = main_schema(directives);
    let contexts = context_schemas(directives);

    let mut defs = contexts.clone();
    for dir in directives {
        defs.insert(dir.id(), directive_schema(dir, &contexts)?);
    }

    tracing::info!(
        directives = directives.len(),
        contexts = contexts.len(),
        "generated schema document"
    );

    Ok(SchemaDocument {
        schema: SCHEMA_DIALECT.to_string(),
        id: None,
        comment: comment.to_string(),
        kind: SchemaType::Object,
        properties: main.properties.unwrap_or_default(),
        defs,
    })
}

/// Synthesized fragment plus documentation annotations.
fn directive_schema(
    dir: &Directive,
    contexts: &BTreeMap<String, Schema>,
) -> Result<Schema, SchemaError> {
    let fragment = synthesize(dir, contexts)?;
    Ok(Schema {
        default: dir.default.clone(),
        description: Some(dir.doc_url.clone()),
        markdown_description: Some(dir.description.clone()),
        x_context: Some(dir.context.iter().cloned().collect()),
        x_module: Some(dir.module.clone()),
        x_since: dir.since.clone(),
        ..fragment
    })
}
