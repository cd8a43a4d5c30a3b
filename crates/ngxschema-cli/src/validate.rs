//! # Validate Subcommand
//!
//! Checks nginx configurations written as JSON or YAML documents against a
//! generated schema.
//!
//! ```bash
//! ngxschema validate --schema nginx.schema.json nginx.yaml sites/*.yaml
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ngxschema_schema::{SchemaValidationError, SchemaValidator};

/// Arguments for the `ngxschema validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Generated schema file.
    #[arg(long, value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Configuration documents (`.json`, `.yaml`, `.yml`).
    #[arg(value_name = "CONFIG", required = true)]
    pub configs: Vec<PathBuf>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every document is valid, 1 otherwise.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let validator = SchemaValidator::from_file(&args.schema)
        .with_context(|| format!("failed to load schema {}", args.schema.display()))?;

    let mut failed = 0usize;
    for path in &args.configs {
        match validator.validate_file(path) {
            Ok(()) => println!("  OK:   {}", path.display()),
            Err(SchemaValidationError::ValidationFailed { violations, .. }) => {
                failed += 1;
                println!("  FAIL: {} ({} violation(s))", path.display(), violations.len());
                println!("{violations}");
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to validate {}", path.display()))
            }
        }
    }

    println!("Configurations: {}/{} passed", args.configs.len() - failed, args.configs.len());
    tracing::info!(total = args.configs.len(), failed, "validation finished");

    Ok(if failed > 0 { 1 } else { 0 })
}
