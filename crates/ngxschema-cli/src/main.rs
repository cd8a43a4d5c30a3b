//! # ngxschema CLI entry point
//!
//! Parses command-line arguments, sets up logging, and dispatches to the
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ngxschema_cli::config::CliConfig;
use ngxschema_cli::filter::{run_filter, FilterArgs};
use ngxschema_cli::generate::{run_generate, GenerateArgs};
use ngxschema_cli::validate::{run_validate, ValidateArgs};

/// JSON Schema for nginx configuration, generated from the nginx
/// documentation.
#[derive(Parser, Debug)]
#[command(name = "ngxschema", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the schema from module documentation XML files.
    Generate(GenerateArgs),

    /// Restrict a generated schema to a set of modules.
    Filter(FilterArgs),

    /// Validate JSON/YAML configuration documents against a schema.
    Validate(ValidateArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = CliConfig::load(cli.config.as_deref()).and_then(|config| match cli.command {
        Commands::Generate(args) => run_generate(&args, &config),
        Commands::Filter(args) => run_filter(&args, &config),
        Commands::Validate(args) => run_validate(&args),
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
