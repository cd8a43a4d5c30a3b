//! # ngxschema-schema — JSON Schema Synthesis
//!
//! Turns [`Directive`](ngxschema_core::Directive) descriptors into a single
//! JSON Schema (Draft 2020-12) document describing nginx configurations
//! written as nested JSON/YAML objects.
//!
//! ## Pipeline
//!
//! ```text
//! directives ──► context assembler ──► context table (read-only)
//!     │                                      │
//!     └────────► synthesizer ◄───────────────┘
//!                    │
//!                    ▼
//!             document builder ──► SchemaDocument ──► validator
//! ```
//!
//! - [`patterns`]: placeholder name → regular expression.
//! - [`fragment`]: typed subset of JSON Schema with stable key order.
//! - [`synth`]: per-directive fragments.
//! - [`context`]: block context schemas.
//! - [`document`]: the final document.
//! - [`validate`]: checks configurations against a generated document.
//!
//! ## Crate Policy
//!
//! - Depends only on `ngxschema-core` internally.
//! - Synthesis is pure and deterministic; I/O is limited to [`validate`].

pub mod context;
pub mod document;
pub mod error;
pub mod fragment;
pub mod patterns;
pub mod synth;
pub mod validate;

pub use context::{context_schema, context_schemas, directives_in_context, main_schema};
pub use document::{generate_document, SchemaDocument, SCHEMA_DIALECT};
pub use error::SchemaError;
pub use fragment::{defs_ref, Schema, SchemaType, DEFS_POINTER};
pub use patterns::{is_numeric_value, pattern_body, value_pattern, NUMERIC_VALUES, VALUE_PATTERNS};
pub use synth::{collapse_booleans, composite_pattern, one_or_array, placeholder_schema, synthesize, Collapsed};
pub use validate::{yaml_to_json_value, SchemaValidationError, SchemaValidator, ValidationViolations, Violation};
