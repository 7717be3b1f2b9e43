//! # Status Reporter
//!
//! Line-oriented, human-readable status output. Progress and successes go
//! to the output stream; per-file errors, fatal errors and the failure
//! summary go to the error stream. Both streams are injected so the
//! output can be captured in tests.

use std::fmt;
use std::io::{self, Stderr, Stdout, Write};
use std::path::Path;

use docgate_schema::{BatchObserver, BatchReport, FileOutcome};

use crate::USAGE;

/// Writes status lines for a validation run.
#[derive(Debug)]
pub struct Reporter<O: Write, E: Write> {
    out: O,
    err: E,
}

impl Reporter<Stdout, Stderr> {
    /// A reporter over the process's standard streams.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    /// A reporter over arbitrary output and error streams.
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Consume the reporter, returning `(out, err)`.
    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }

    /// Print the one-line usage message.
    pub fn usage(&mut self) {
        emit(&mut self.out, format_args!("{USAGE}"));
    }

    /// Write pre-rendered text, such as help output, to the output stream.
    pub fn print_out(&mut self, text: impl fmt::Display) {
        write_logged(&mut self.out, format_args!("{text}"));
    }

    /// Write pre-rendered text, such as a parser diagnostic, to the error
    /// stream.
    pub fn print_err(&mut self, text: impl fmt::Display) {
        write_logged(&mut self.err, format_args!("{text}"));
    }

    /// Report an error that aborts the run.
    pub fn fatal(&mut self, message: impl fmt::Display) {
        emit(&mut self.err, format_args!("error: {message}"));
    }

    /// Print the closing summary line for a finished batch.
    pub fn summary(&mut self, report: &BatchReport) {
        if report.is_success() {
            emit(
                &mut self.out,
                format_args!("All {} file(s) passed validation.", report.total),
            );
        } else {
            emit(
                &mut self.err,
                format_args!(
                    "{} of {} file(s) failed validation.",
                    report.failed(),
                    report.total
                ),
            );
        }
    }
}

impl<O: Write, E: Write> BatchObserver for Reporter<O, E> {
    fn on_start(&mut self, path: &Path) {
        emit(&mut self.out, format_args!("Validating: {}", path.display()));
    }

    fn on_finish(&mut self, outcome: &FileOutcome) {
        match &outcome.result {
            Ok(()) => emit(
                &mut self.out,
                format_args!("Passed: {}", outcome.path.display()),
            ),
            Err(e) => emit(
                &mut self.err,
                format_args!("error in {}: {e}", outcome.path.display()),
            ),
        }
    }
}

/// Write one line and flush so status appears as soon as it is known.
fn emit(stream: &mut impl Write, line: fmt::Arguments<'_>) {
    write_logged(stream, format_args!("{line}\n"));
}

fn write_logged(stream: &mut impl Write, text: fmt::Arguments<'_>) {
    let written = stream.write_fmt(text).and_then(|()| stream.flush());
    if let Err(e) = written {
        tracing::warn!(error = %e, "failed to write status line");
    }
}
