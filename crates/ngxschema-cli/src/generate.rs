//! # Generate Subcommand
//!
//! Reads module documentation files and writes the JSON Schema built from
//! all of their directives.
//!
//! ```bash
//! ngxschema generate -c "nginx 1.27" -o nginx.schema.json xml/en/docs/**/ngx_*_module.xml
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ngxschema_core::Directive;
use ngxschema_docs::directives_from_xml;
use ngxschema_schema::generate_document;

use crate::config::CliConfig;
use crate::write_output;

/// Arguments for the `ngxschema generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Value of `$comment` in the generated schema.
    #[arg(short, long)]
    pub comment: Option<String>,

    /// Write the schema to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Module documentation XML files.
    #[arg(value_name = "XML", required = true)]
    pub files: Vec<PathBuf>,
}

/// Execute the generate subcommand.
pub fn run_generate(args: &GenerateArgs, config: &CliConfig) -> Result<u8> {
    let mut directives: Vec<Directive> = Vec::new();

    for path in &args.files {
        if config.skips(path) {
            tracing::info!(path = %path.display(), "skipping document");
            continue;
        }
        let xml = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match directives_from_xml(&xml)
            .with_context(|| format!("failed to process {}", path.display()))?
        {
            Some(found) => {
                tracing::debug!(path = %path.display(), directives = found.len(), "read module document");
                directives.extend(found);
            }
            None => tracing::warn!(path = %path.display(), "not a module document"),
        }
    }

    let comment = args
        .comment
        .as_deref()
        .or(config.comment.as_deref())
        .unwrap_or_default();
    let document = generate_document(&directives, comment).context("failed to generate schema")?;
    let json = document.to_json_pretty().context("failed to serialize schema")?;

    write_output(&json, args.out.as_deref())?;
    Ok(0)
}
