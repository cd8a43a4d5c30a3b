//! # Retained Modules and Document Filtering

use std::collections::{BTreeMap, BTreeSet};

use ngxschema_schema::{Schema, SchemaDocument, DEFS_POINTER};
use serde_json::Value;

use crate::error::FilterError;
use crate::modules::{is_group, prerequisites, MODULES};

/// Prefix of context definitions, which are kept regardless of modules.
const CONTEXT_PREFIX: &str = "context:";

/// The module that is retained unconditionally.
const CORE: &str = "core";

/// Resolve include/exclude lists of modules and groups into module names.
///
/// 1. Every non-group name in `include` is retained.
/// 2. A table module is retained when each of its prerequisites is
///    included or already retained, and not excluded. Repeated until
///    nothing changes, so chains like `http_grpc` → `http_v2` resolve.
/// 3. Modules with an excluded prerequisite are dropped.
/// 4. Excluded names are dropped.
/// 5. `core` is added.
pub fn filter_modules(include: &BTreeSet<String>, exclude: &BTreeSet<String>) -> BTreeSet<String> {
    let mut retained: BTreeSet<String> = include.iter().filter(|n| !is_group(n)).cloned().collect();

    loop {
        let before = retained.len();
        for module in MODULES {
            let satisfied = module.depends_on.iter().all(|dep| {
                (include.contains(*dep) || retained.contains(*dep)) && !exclude.contains(*dep)
            });
            if satisfied {
                retained.insert(module.name.to_string());
            }
        }
        if retained.len() == before {
            break;
        }
    }

    retained.retain(|name| {
        !prerequisites(name).is_some_and(|deps| deps.iter().any(|dep| exclude.contains(*dep)))
    });
    for name in exclude {
        retained.remove(name);
    }
    retained.insert(CORE.to_string());

    tracing::info!(modules = retained.len(), "resolved retained modules");
    retained
}

/// Distinct module prefixes of the directive definitions in `document`.
pub fn module_names(document: &SchemaDocument) -> BTreeSet<String> {
    document
        .defs
        .keys()
        .filter(|key| !key.starts_with(CONTEXT_PREFIX))
        .map(|key| module_of(key).to_string())
        .collect()
}

/// Copy of `document` restricted to `modules`.
///
/// Context definitions are kept; directive definitions of other modules are
/// dropped, as are root and context properties referring to them. The
/// retained module list is appended to `$comment`. `id`, when given,
/// replaces `$id`.
pub fn filter_schema(
    document: &SchemaDocument,
    modules: &BTreeSet<String>,
    id: Option<&str>,
) -> SchemaDocument {
    let defs = document
        .defs
        .iter()
        .filter_map(|(key, schema)| {
            if key.starts_with(CONTEXT_PREFIX) {
                let mut schema = schema.clone();
                if let Some(properties) = schema.properties.take() {
                    schema.properties = Some(filter_properties(&properties, modules));
                }
                Some((key.clone(), schema))
            } else if modules.contains(module_of(key)) {
                Some((key.clone(), schema.clone()))
            } else {
                None
            }
        })
        .collect();

    let listed: Vec<&str> = modules.iter().map(String::as_str).collect();

    SchemaDocument {
        schema: document.schema.clone(),
        id: id.map(str::to_string).or_else(|| document.id.clone()),
        comment: format!("{}\nIncluded modules: {}", document.comment, listed.join(", ")),
        kind: document.kind,
        properties: filter_properties(&document.properties, modules),
        defs,
    }
}

/// Parse a generated schema document.
///
/// # Errors
///
/// [`FilterError::MissingDefs`] when there is no `$defs` object,
/// [`FilterError::Json`] for anything else that does not deserialize.
pub fn load_document(json: &str) -> Result<SchemaDocument, FilterError> {
    let value: Value = serde_json::from_str(json)?;
    if !value.get("$defs").is_some_and(Value::is_object) {
        return Err(FilterError::MissingDefs);
    }
    Ok(serde_json::from_value(value)?)
}

/// Properties that are not a `$ref` or refer to a retained module.
fn filter_properties(
    properties: &BTreeMap<String, Schema>,
    modules: &BTreeSet<String>,
) -> BTreeMap<String, Schema> {
    properties
        .iter()
        .filter(|(_, schema)| match schema.reference.as_deref() {
            Some(reference) => module_of_ref(reference).is_some_and(|m| modules.contains(m)),
            None => true,
        })
        .map(|(name, schema)| (name.clone(), schema.clone()))
        .collect()
}

/// `http_gzip` for `http_gzip:gzip`.
fn module_of(key: &str) -> &str {
    key.split(':').next().unwrap_or(key)
}

/// `http_gzip` for `#/$defs/http_gzip:gzip`.
fn module_of_ref(reference: &str) -> Option<&str> {
    let key = reference.strip_prefix(DEFS_POINTER)?;
    key.split([':', '/']).next().filter(|m| !m.is_empty())
}
