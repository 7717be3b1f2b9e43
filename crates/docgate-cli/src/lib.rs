//! # docgate-cli — Batch Validation Gate
//!
//! Provides the `docgate` command-line interface:
//!
//! ```bash
//! docgate schemas/notice.schema.json content/notices
//! ```
//!
//! Every `.yaml` / `.yml` file under the directory is validated against the
//! schema and the content-safety rules. One status line is printed per file
//! as it finishes, followed by a summary, and the exit code gates CI.
//!
//! ## Crate Policy
//!
//! - Argument parsing and output formatting live here; validation logic
//!   lives in `docgate-schema`.
//! - Status lines are written through [`report::Reporter`], never through
//!   the tracing subscriber.

pub mod report;
pub mod validate;

/// Every file passed.
pub const EXIT_SUCCESS: u8 = 0;

/// A file failed validation, the schema could not be loaded, or the
/// arguments were incomplete.
pub const EXIT_FAILURE: u8 = 1;

/// The target directory could not be read.
pub const EXIT_OPERATIONAL: u8 = 2;

/// One-line usage shown when the positional arguments are missing.
pub const USAGE: &str = "Usage: docgate <schema-path> <directory-path>";
