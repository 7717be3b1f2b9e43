//! # Validate Command
//!
//! Compiles the schema once, validates every YAML document under the
//! target directory, and maps the outcome to an exit code.
//!
//! Exit codes: 0 when every file passes, 1 when any file fails or the
//! schema cannot be loaded, 2 when the directory tree cannot be read.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use docgate_schema::{CompiledSchema, Pipeline};

use crate::report::Reporter;
use crate::{EXIT_FAILURE, EXIT_OPERATIONAL, EXIT_SUCCESS};

/// Positional arguments: the schema and the tree to validate.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the JSON Schema file.
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,

    /// Directory to scan recursively for .yaml and .yml files.
    #[arg(value_name = "DIRECTORY")]
    pub directory: PathBuf,
}

/// Execute a validation run, writing status lines through `reporter`.
///
/// Returns the process exit code.
pub fn run_validate<O: Write, E: Write>(
    args: &ValidateArgs,
    reporter: &mut Reporter<O, E>,
) -> u8 {
    let schema = match CompiledSchema::from_path(&args.schema)
        .with_context(|| format!("failed to load schema {}", args.schema.display()))
    {
        Ok(schema) => schema,
        Err(e) => {
            tracing::error!(schema = %args.schema.display(), "schema load failed");
            reporter.fatal(format_args!("{e:#}"));
            return EXIT_FAILURE;
        }
    };

    tracing::info!(schema = %schema.path().display(), "loaded schema");

    let pipeline = Pipeline::new(&schema);
    let report = match pipeline
        .validate_directory(&args.directory, reporter)
        .with_context(|| format!("failed to scan {}", args.directory.display()))
    {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(directory = %args.directory.display(), "document collection failed");
            reporter.fatal(format_args!("{e:#}"));
            return EXIT_OPERATIONAL;
        }
    };

    reporter.summary(&report);

    if report.is_success() {
        EXIT_SUCCESS
    } else {
        EXIT_FAILURE
    }
}
