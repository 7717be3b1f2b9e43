//! # docgate CLI entry point
//!
//! Parses the two positional arguments, initialises tracing, and runs the
//! validate command.

use std::io::Write;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use docgate_cli::report::Reporter;
use docgate_cli::validate::{run_validate, ValidateArgs};
use docgate_cli::{EXIT_FAILURE, EXIT_SUCCESS};

/// Validate a tree of YAML documents against a JSON Schema and HTML
/// content-safety rules.
#[derive(Parser, Debug)]
#[command(name = "docgate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    args: ValidateArgs,
}

fn main() -> ExitCode {
    let mut reporter = Reporter::stdio();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            init_tracing(0);
            return ExitCode::from(parse_failure(&e, &mut reporter));
        }
    };

    init_tracing(cli.verbose);

    tracing::debug!(
        schema = %cli.args.schema.display(),
        directory = %cli.args.directory.display(),
        "docgate starting"
    );

    ExitCode::from(run_validate(&cli.args, &mut reporter))
}

/// Install the stderr subscriber. `RUST_LOG` wins over the verbosity flag
/// when set.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handle a clap error: help and version exit cleanly, anything else
/// prints the usage line to stdout and exits 1.
fn parse_failure<O: Write, E: Write>(e: &clap::Error, reporter: &mut Reporter<O, E>) -> u8 {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            reporter.print_out(e.render());
            EXIT_SUCCESS
        }
        ErrorKind::MissingRequiredArgument => {
            reporter.usage();
            EXIT_FAILURE
        }
        _ => {
            reporter.print_err(e.render());
            reporter.usage();
            EXIT_FAILURE
        }
    }
}
