//! Integration test: validate sample nginx configurations against a
//! generated schema document.
//!
//! Configurations are nginx.conf files expressed as nested objects: each
//! directive is a key, blocks are objects, repeated directives are arrays and
//! parameterised blocks (`location /`) are maps keyed by the parameter.

mod common;

use std::io::Write;

use common::sample_directives;
use ngxschema_schema::{generate_document, SchemaValidationError, SchemaValidator};
use serde_json::{json, Value};

fn validator() -> SchemaValidator {
    let doc = generate_document(&sample_directives(), "").unwrap();
    SchemaValidator::from_document(&doc).unwrap()
}

fn violation_paths(err: SchemaValidationError) -> Vec<String> {
    match err {
        SchemaValidationError::ValidationFailed { violations, .. } => violations
            .into_inner()
            .into_iter()
            .map(|v| v.instance_path)
            .collect(),
        other => panic!("expected ValidationFailed, got: {other}"),
    }
}

fn full_config() -> Value {
    json!({
        "worker_processes": "auto",
        "daemon": false,
        "events": {"worker_connections": 1024},
        "http": {
            "gzip": "on",
            "client_max_body_size": "10m",
            "proxy_set_header": {"Host": "$host", "X-Real-IP": "$remote_addr"},
            "server": [
                {
                    "listen": "80 default_server",
                    "location": {
                        "/": {
                            "root": "/var/www",
                            "proxy_read_timeout": "1h 30s",
                            "if": {"($request_method = POST)": {"return": "405 /error"}}
                        },
                        "/internal": {"internal": null}
                    }
                },
                {"listen": 443}
            ]
        }
    })
}

#[test]
fn test_generated_schema_compiles() {
    let doc = generate_document(&sample_directives(), "").unwrap();
    let value = serde_json::to_value(&doc).unwrap();
    SchemaValidator::new(&value).unwrap();
}

#[test]
fn test_valid_configuration_passes() {
    validator().validate(&full_config()).unwrap();
}

#[test]
fn test_empty_configuration_passes() {
    validator().validate(&json!({})).unwrap();
}

#[test]
fn test_numeric_and_string_forms_both_accepted() {
    let v = validator();
    v.validate(&json!({"worker_processes": 4})).unwrap();
    v.validate(&json!({"worker_processes": "4"})).unwrap();
    v.validate(&json!({"http": {"client_max_body_size": 1048576}})).unwrap();
    v.validate(&json!({"http": {"proxy_read_timeout": 60}})).unwrap();
}

#[test]
fn test_invalid_size_is_rejected() {
    let err = validator()
        .validate(&json!({"http": {"client_max_body_size": "10 megabytes"}}))
        .unwrap_err();
    // Blocks accept one object or an array of them, so the failure surfaces
    // at the outermost `anyOf`.
    assert_eq!(violation_paths(err), vec!["/http"]);
}

#[test]
fn test_invalid_nested_value_reports_path() {
    let err = validator()
        .validate(&json!({"events": {"worker_connections": "lots"}}))
        .unwrap_err();
    assert_eq!(violation_paths(err), vec!["/events"]);
}

#[test]
fn test_invalid_top_level_value_reports_its_own_path() {
    let err = validator()
        .validate(&json!({"worker_processes": "many", "daemon": null}))
        .unwrap_err();
    let mut paths = violation_paths(err);
    paths.sort();
    assert_eq!(paths, vec!["/daemon", "/worker_processes"]);
}

#[test]
fn test_invalid_flag_is_rejected() {
    let v = validator();
    assert!(v.validate(&json!({"daemon": "yes"})).is_err());
    assert!(v.validate(&json!({"http": {"gzip": "maybe"}})).is_err());
    v.validate(&json!({"daemon": "off", "http": {"gzip": true}})).unwrap();
}

#[test]
fn test_parameterless_directive_requires_null() {
    let err = validator()
        .validate(&json!({"http": {"server": {"location": {"/": {"internal": "yes"}}}}}))
        .unwrap_err();
    assert_eq!(violation_paths(err), vec!["/http"]);
}

#[test]
fn test_validate_yaml_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "worker_processes: 2\nevents:\n  worker_connections: 512\nhttp:\n  gzip: \"on\"\n  server:\n    listen: 8080\n"
    )
    .unwrap();
    validator().validate_file(file.path()).unwrap();
}

#[test]
fn test_validate_json_file_with_violation() {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    write!(file, r#"{{"events": {{"worker_connections": [1, "x"]}}}}"#).unwrap();
    let err = validator().validate_file(file.path()).unwrap_err();
    let message = err.to_string();
    assert!(message.contains(&file.path().display().to_string()));
    assert!(message.contains("/events"));
}

#[test]
fn test_unparseable_file_is_load_error() {
    let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
    writeln!(file, "events: [unclosed").unwrap();
    let err = validator().validate_file(file.path()).unwrap_err();
    assert!(matches!(err, SchemaValidationError::DocumentLoadError { .. }));
}
