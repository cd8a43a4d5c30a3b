//! # Filter Subcommand
//!
//! ```bash
//! # Schema for a stock build plus HTTP/2:
//! ngxschema filter -i @default,http_v2 nginx.schema.json
//!
//! # Which modules would be kept:
//! ngxschema filter -l -x @commercial nginx.schema.json
//! ```

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use ngxschema_filter::{filter_modules, filter_schema, load_document, module_names};

use crate::config::CliConfig;
use crate::write_output;

/// Arguments for the `ngxschema filter` subcommand.
#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Print the retained module names instead of the schema.
    #[arg(short, long)]
    pub list_modules: bool,

    /// Modules or groups (@default, @optional, @commercial) to keep.
    /// All modules of the schema when omitted.
    #[arg(short, long, value_delimiter = ',', value_name = "MODULES")]
    pub include: Vec<String>,

    /// Modules or groups to remove. Takes precedence over --include.
    #[arg(short = 'x', long, value_delimiter = ',', value_name = "MODULES")]
    pub exclude: Vec<String>,

    /// Replace `$id` of the schema.
    #[arg(long)]
    pub id: Option<String>,

    /// Write to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Generated schema file.
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// Execute the filter subcommand.
pub fn run_filter(args: &FilterArgs, config: &CliConfig) -> Result<u8> {
    let json = std::fs::read_to_string(&args.schema)
        .with_context(|| format!("failed to read {}", args.schema.display()))?;
    let document = load_document(&json)
        .with_context(|| format!("failed to load {}", args.schema.display()))?;

    let or_config = |flags: &[String], configured: &[String]| -> BTreeSet<String> {
        if flags.is_empty() { configured } else { flags }.iter().cloned().collect()
    };
    let mut include = or_config(&args.include, &config.filter.include);
    let exclude = or_config(&args.exclude, &config.filter.exclude);
    if include.is_empty() {
        include = module_names(&document);
    }

    let modules = filter_modules(&include, &exclude);

    let output = if args.list_modules {
        modules.iter().cloned().collect::<Vec<_>>().join("\n")
    } else {
        let id = args.id.as_deref().or(config.filter.id.as_deref());
        filter_schema(&document, &modules, id)
            .to_json_pretty()
            .context("failed to serialize schema")?
    };

    write_output(&output, args.out.as_deref())?;
    Ok(0)
}
