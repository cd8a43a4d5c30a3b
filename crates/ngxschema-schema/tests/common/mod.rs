//! Shared fixtures: a miniature nginx directive set.

#![allow(dead_code)]

use std::collections::BTreeSet;

use ngxschema_core::{DefaultValue, Directive, SyntaxToken};

pub fn lit(s: &str) -> SyntaxToken {
    SyntaxToken::literal(s)
}

pub fn val(s: &str) -> SyntaxToken {
    SyntaxToken::value(s)
}

pub const SEP: SyntaxToken = SyntaxToken::Separator;
pub const OR: SyntaxToken = SyntaxToken::Or;

pub fn directive(
    module: &str,
    name: &str,
    syntax: Vec<Vec<SyntaxToken>>,
    contexts: &[&str],
) -> Directive {
    Directive {
        module: module.to_string(),
        name: name.to_string(),
        syntax,
        block: false,
        default: None,
        context: contexts.iter().map(|c| c.to_string()).collect::<BTreeSet<_>>(),
        description: String::new(),
        since: None,
        doc_url: format!("https://nginx.org/en/docs/ngx_{module}_module.html#{name}"),
    }
}

pub fn block(
    module: &str,
    name: &str,
    syntax: Vec<Vec<SyntaxToken>>,
    contexts: &[&str],
) -> Directive {
    Directive {
        block: true,
        ..directive(module, name, syntax, contexts)
    }
}

/// A small but representative subset of the core, events and http modules.
pub fn sample_directives() -> Vec<Directive> {
    let mut worker_connections =
        directive("core", "worker_connections", vec![vec![val("number")]], &["events"]);
    worker_connections.default = Some(DefaultValue::Number(512));

    let mut gzip = directive("http_gzip", "gzip", vec![vec![lit("on"), OR, lit("off")]], &[
        "http",
        "server",
        "location",
        "if_in_location",
    ]);
    gzip.default = Some(DefaultValue::Text("off".into()));

    vec![
        directive("core", "daemon", vec![vec![lit("on"), OR, lit("off")]], &["main"]),
        directive("core", "worker_processes", vec![vec![val("number"), OR, lit("auto")]], &["main"]),
        directive("core", "error_log", vec![vec![val("file"), SEP, val("level")]], &["main", "http", "server", "location"]),
        block("core", "events", vec![vec![]], &["main"]),
        worker_connections,
        block("http_core", "http", vec![vec![]], &["main"]),
        block("http_core", "server", vec![vec![]], &["http"]),
        directive(
            "http_core",
            "listen",
            vec![vec![
                val("address"),
                SEP,
                SyntaxToken::LeftBracket,
                lit("default_server"),
                SyntaxToken::RightBracket,
            ]],
            &["server"],
        ),
        block("http_core", "location", vec![vec![val("uri")]], &["server", "location"]),
        directive("http_core", "root", vec![vec![val("path")]], &["http", "server", "location", "if_in_location"]),
        directive("http_core", "client_max_body_size", vec![vec![val("size")]], &["http", "server", "location"]),
        gzip,
        block("http_rewrite", "if", vec![vec![lit("("), val("condition"), lit(")")]], &["server", "location"]),
        directive("http_rewrite", "return", vec![vec![val("code"), SEP, val("URL")]], &["server", "location", "if"]),
        directive("http_proxy", "proxy_set_header", vec![vec![val("field"), SEP, val("value")]], &["http", "server", "location"]),
        directive("http_proxy", "proxy_read_timeout", vec![vec![val("timeout")]], &["http", "server", "location"]),
        directive("http_core", "internal", vec![vec![]], &["location"]),
    ]
}
