//! # Context Assembler
//!
//! Builds the object schemas describing which directives may appear inside
//! each configuration block.
//!
//! A context is any block directive whose name some directive declares as
//! its context. Its schema is an object whose properties are the eligible
//! directive names, each referencing the directive fragment by id.
//!
//! ## Eligibility
//!
//! A directive is eligible for context `C` in namespace `N` when both hold:
//!
//! - `N` is `main`, the directive belongs to the `core` module, or its
//!   module namespace is `N`;
//! - it declares `C`, declares `any`, or `C` is `if` and it declares
//!   `if_in_location`.

use std::collections::{BTreeMap, BTreeSet};

use ngxschema_core::{Directive, ANY_CONTEXT, CORE_MODULE, MAIN_CONTEXT};

use crate::fragment::{Schema, SchemaType};

/// Directives legal in `context` of the given module `namespace`, in input
/// order.
pub fn directives_in_context<'a>(
    namespace: &str,
    context: &str,
    directives: &'a [Directive],
) -> Vec<&'a Directive> {
    directives
        .iter()
        .filter(|dir| {
            let in_namespace = namespace == MAIN_CONTEXT
                || dir.module == CORE_MODULE
                || dir.namespace() == namespace;
            let in_context = dir.context.contains(context)
                || dir.context.contains(ANY_CONTEXT)
                || (context == "if" && dir.context.contains("if_in_location"));
            in_namespace && in_context
        })
        .collect()
}

/// Object schema with one `$ref` property per directive, keyed by name.
///
/// When two directives share a name the later one wins.
pub fn context_schema(directives: &[&Directive]) -> Schema {
    let properties = directives
        .iter()
        .map(|dir| (dir.name.clone(), Schema::ref_to(&dir.id())))
        .collect::<BTreeMap<_, _>>();

    Schema {
        properties: Some(properties),
        ..Schema::of_type(SchemaType::Object)
    }
}

/// Schema of the top-level (`main`) context.
pub fn main_schema(directives: &[Directive]) -> Schema {
    context_schema(&directives_in_context(MAIN_CONTEXT, MAIN_CONTEXT, directives))
}

/// Schemas of every context opened by a block directive, keyed by
/// [`Directive::context_id`].
pub fn context_schemas(directives: &[Directive]) -> BTreeMap<String, Schema> {
    let used: BTreeSet<&str> = directives
        .iter()
        .flat_map(|dir| dir.context.iter().map(String::as_str))
        .collect();

    let mut schemas = BTreeMap::new();
    for dir in directives.iter().filter(|d| d.block && used.contains(d.name.as_str())) {
        let members = directives_in_context(dir.namespace(), &dir.name, directives);
        tracing::debug!(
            context = %dir.context_id(),
            directives = members.len(),
            "assembled context"
        );
        schemas.insert(dir.context_id(), context_schema(&members));
    }
    schemas
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn directive(module: &str, name: &str, contexts: &[&str], block: bool) -> Directive {
        Directive {
            module: module.to_string(),
            name: name.to_string(),
            syntax: vec![vec![]],
            block,
            default: None,
            context: contexts.iter().map(|c| c.to_string()).collect(),
            description: String::new(),
            since: None,
            doc_url: String::new(),
        }
    }

    fn names(dirs: &[&Directive]) -> Vec<String> {
        dirs.iter().map(|d| d.id()).collect()
    }

    #[test]
    fn events_context_lists_its_members() {
        let dirs = vec![
            directive("core", "events", &["main"], true),
            directive("core", "worker_connections", &["events"], false),
        ];
        let contexts = context_schemas(&dirs);
        assert_eq!(
            serde_json::to_value(&contexts["context:events"]).unwrap(),
            json!({
                "type": "object",
                "properties": {"worker_connections": {"$ref": "#/$defs/core:worker_connections"}}
            })
        );
    }

    #[test]
    fn unused_block_gets_no_context() {
        let dirs = vec![directive("http_core", "limit_except", &["location"], true)];
        assert!(context_schemas(&dirs).is_empty());
    }

    #[test]
    fn namespace_keeps_families_apart() {
        let dirs = vec![
            directive("http_core", "server", &["http"], true),
            directive("stream_core", "server", &["stream"], true),
            directive("http_core", "listen", &["server"], false),
            directive("stream_core", "listen", &["server"], false),
            directive("core", "error_log", &["main", "server"], false),
        ];
        let contexts = context_schemas(&dirs);

        let http = contexts["context:http:server"].properties.as_ref().unwrap();
        assert_eq!(http["listen"].reference.as_deref(), Some("#/$defs/http_core:listen"));
        assert!(http.contains_key("error_log"));

        let stream = contexts["context:stream:server"].properties.as_ref().unwrap();
        assert_eq!(stream["listen"].reference.as_deref(), Some("#/$defs/stream_core:listen"));
    }

    #[test]
    fn any_context_matches_everywhere_in_namespace() {
        let dirs = vec![
            directive("http_core", "location", &["server"], true),
            directive("http_rewrite", "rewrite_log", &["any"], false),
            directive("mail_core", "smtp_auth", &["any"], false),
        ];
        let members = directives_in_context("http", "location", &dirs);
        assert_eq!(names(&members), vec!["http_rewrite:rewrite_log"]);
    }

    #[test]
    fn if_context_accepts_if_in_location() {
        let dirs = vec![
            directive("http_rewrite", "if", &["server", "location"], true),
            directive("http_core", "root", &["if_in_location"], false),
        ];
        assert_eq!(names(&directives_in_context("http", "if", &dirs)), vec!["http_core:root"]);
        assert_eq!(
            names(&directives_in_context("http", "location", &dirs)),
            vec!["http_rewrite:if"]
        );
    }

    #[test]
    fn main_namespace_matches_every_module() {
        let dirs = vec![
            directive("core", "daemon", &["main"], false),
            directive("http_core", "http", &["main"], true),
            directive("http_core", "root", &["location"], false),
        ];
        let main = main_schema(&dirs);
        let props = main.properties.unwrap();
        assert_eq!(props.keys().collect::<Vec<_>>(), vec!["daemon", "http"]);
    }

    #[test]
    fn later_duplicate_name_wins() {
        let a = directive("http_proxy", "proxy_pass", &["location"], false);
        let b = directive("http_proxy_extra", "proxy_pass", &["location"], false);
        let schema = context_schema(&[&a, &b]);
        assert_eq!(
            schema.properties.unwrap()["proxy_pass"].reference.as_deref(),
            Some("#/$defs/http_proxy_extra:proxy_pass")
        );
    }
}
