//! # ngxschema-cli — nginx-json-schema Command-Line Interface
//!
//! ## Subcommands
//!
//! - `generate`: module documentation XML to JSON Schema
//! - `filter`: restrict a generated schema to a set of modules
//! - `validate`: check JSON/YAML configurations against a generated schema
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers live here and return an
//!   exit code so they can be tested without a process.
//! - Handlers delegate to the library crates; no schema logic here.
//! - The schema goes to stdout, logs go to stderr.

pub mod config;
pub mod filter;
pub mod generate;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};

/// Write `content` to `out`, or to stdout when no path is given.
pub fn write_output(content: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, format!("{content}\n"))
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
