//! # Schema Fragment Model
//!
//! A typed subset of JSON Schema (Draft 2020-12) covering exactly the
//! keywords the synthesizer emits, plus the editor-facing annotations
//! (`markdownDescription`) and `x-*` metadata attached to directive
//! definitions.
//!
//! Field declaration order is serialization order, so every fragment is
//! emitted with a stable key layout independent of the JSON map backend.

use std::collections::BTreeMap;

use ngxschema_core::DefaultValue;
use serde::{Deserialize, Serialize};

/// Prefix of every definitions pointer.
pub const DEFS_POINTER: &str = "#/$defs/";

/// Pointer to the definition with the given key.
pub fn defs_ref(key: &str) -> String {
    format!("{DEFS_POINTER}{key}")
}

/// JSON Schema `type` keyword values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    Null,
    Boolean,
    Object,
    Array,
    Number,
    String,
}

/// A schema fragment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SchemaType>,

    #[serde(rename = "const", skip_serializing_if = "Option::is_none")]
    pub constant: Option<String>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enumeration: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_properties: Option<BTreeMap<String, Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<Schema>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub markdown_description: Option<String>,

    #[serde(rename = "x-context", skip_serializing_if = "Option::is_none")]
    pub x_context: Option<Vec<String>>,

    #[serde(rename = "x-module", skip_serializing_if = "Option::is_none")]
    pub x_module: Option<String>,

    #[serde(rename = "x-since", skip_serializing_if = "Option::is_none")]
    pub x_since: Option<String>,
}

impl Schema {
    /// `{"type": kind}`.
    pub fn of_type(kind: SchemaType) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// `{"$ref": "#/$defs/<key>"}`.
    pub fn ref_to(key: &str) -> Self {
        Self {
            reference: Some(defs_ref(key)),
            ..Self::default()
        }
    }

    /// `{"const": value}`.
    pub fn constant(value: impl Into<String>) -> Self {
        Self {
            constant: Some(value.into()),
            ..Self::default()
        }
    }

    /// `{"enum": values}`.
    pub fn enumeration(values: Vec<String>) -> Self {
        Self {
            enumeration: Some(values),
            ..Self::default()
        }
    }

    /// `{"type": "string", "pattern": pattern}`.
    pub fn string_pattern(pattern: impl Into<String>) -> Self {
        Self {
            pattern: Some(pattern.into()),
            ..Self::of_type(SchemaType::String)
        }
    }

    /// `{"anyOf": schemas}`.
    pub fn any_of(schemas: Vec<Schema>) -> Self {
        Self {
            any_of: Some(schemas),
            ..Self::default()
        }
    }

    /// `{"type": "array", "items": items}`.
    pub fn array_of(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_type(SchemaType::Array)
        }
    }

    /// `{"type": "object", "additionalProperties": values}`.
    pub fn object_of(values: Schema) -> Self {
        Self {
            additional_properties: Some(Box::new(values)),
            ..Self::of_type(SchemaType::Object)
        }
    }

    /// Attach a `title`.
    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// True for an exact-value (`const`) fragment.
    pub fn is_const(&self) -> bool {
        self.constant.is_some()
    }
}
