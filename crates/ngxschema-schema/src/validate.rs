//! # Configuration Validation
//!
//! Checks nginx configurations written as JSON or YAML documents against a
//! generated [`SchemaDocument`] (Draft 2020-12).
//!
//! Generated documents are self-contained: every `$ref` points into the
//! document's own `$defs`, so no external retrieval is configured.
//!
//! Violations are reported with the instance path, the schema path, and the
//! validator's message, so a failing `worker_connections: lots` reads as
//! `/events/worker_connections: ...` rather than a bare "invalid".

use std::fmt;
use std::path::Path;

use jsonschema::Validator;
use serde_json::Value;
use thiserror::Error;

use crate::document::SchemaDocument;

/// Error during configuration validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The configuration did not conform to the schema.
    #[error("validation failed for '{source_name}':\n{violations}")]
    ValidationFailed {
        /// File path or `<inline>`.
        source_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The configuration or schema file could not be loaded or parsed.
    #[error("document load error for '{path}': {reason}")]
    DocumentLoadError {
        /// Path to the document that failed to load.
        path: String,
        /// Reason the document could not be loaded.
        reason: String,
    },

    /// The schema could not be compiled.
    #[error("validator build error: {reason}")]
    ValidatorBuildError {
        /// Reason the validator could not be built.
        reason: String,
    },

    /// IO error reading a document.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value in the configuration.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Collection of validation violations.
#[derive(Debug, Clone, Default)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// A compiled generated schema.
///
/// Compilation happens once; the validator can then check any number of
/// configurations and is `Send + Sync`.
pub struct SchemaValidator {
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator").finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile a schema given as a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::ValidatorBuildError`] if the value is
    /// not a valid Draft 2020-12 schema.
    pub fn new(schema: &Value) -> Result<Self, SchemaValidationError> {
        let mut options = jsonschema::options();
        options.with_draft(jsonschema::Draft::Draft202012);
        let validator = options
            .build(schema)
            .map_err(|e| SchemaValidationError::ValidatorBuildError {
                reason: e.to_string(),
            })?;
        Ok(Self { validator })
    }

    /// Compile an in-memory generated document.
    pub fn from_document(document: &SchemaDocument) -> Result<Self, SchemaValidationError> {
        let value = serde_json::to_value(document).map_err(|e| {
            SchemaValidationError::ValidatorBuildError {
                reason: format!("cannot serialize document: {e}"),
            }
        })?;
        Self::new(&value)
    }

    /// Load and compile a generated document from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::DocumentLoadError`] if the file
    /// cannot be read or is not JSON.
    pub fn from_file(path: &Path) -> Result<Self, SchemaValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason: format!("cannot read file: {e}"),
            }
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason: format!("invalid JSON: {e}"),
            }
        })?;
        Self::new(&value)
    }

    /// Validate a configuration value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::ValidationFailed`] with every
    /// violation if the configuration is invalid.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        self.validate_named(instance, "<inline>")
    }

    /// Validate a configuration file.
    ///
    /// `.yaml`/`.yml` files are parsed as YAML, everything else as JSON.
    pub fn validate_file(&self, path: &Path) -> Result<(), SchemaValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SchemaValidationError::DocumentLoadError {
                path: path.display().to_string(),
                reason: format!("cannot read file: {e}"),
            }
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let load_error = |reason: String| SchemaValidationError::DocumentLoadError {
            path: path.display().to_string(),
            reason,
        };

        let instance = match ext {
            "yaml" | "yml" => {
                let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
                    .map_err(|e| load_error(format!("invalid YAML: {e}")))?;
                yaml_to_json_value(&yaml)
                    .map_err(|e| load_error(format!("YAML-to-JSON conversion failed: {e}")))?
            }
            _ => serde_json::from_str(&content)
                .map_err(|e| load_error(format!("invalid JSON: {e}")))?,
        };

        tracing::debug!(path = %path.display(), "validating configuration");
        self.validate_named(&instance, &path.display().to_string())
    }

    fn validate_named(&self, instance: &Value, source_name: &str) -> Result<(), SchemaValidationError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                source_name: source_name.to_string(),
                violations: ValidationViolations { violations },
            })
        }
    }
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tags are dropped; non-string scalar keys are stringified.
pub fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(i.into()))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(u.into()))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut object = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                object.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(object))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
