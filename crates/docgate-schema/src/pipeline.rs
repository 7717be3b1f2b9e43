//! # Validation Pipeline
//!
//! Composes the stages for one file (load → schema → content) and for a
//! whole directory (collect → per-file pipeline → report).
//!
//! Per-file failures are recorded and the batch continues. Only a
//! [`CollectError`] stops a directory run. Outcomes are streamed to a
//! [`BatchObserver`] as each file finishes, in traversal order.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::collect::{collect_documents, CollectError};
use crate::content::{ContentChecker, ContentViolation};
use crate::document::{load_document, DocumentLoadError};
use crate::validate::{CompiledSchema, SchemaValidationError};

/// Why a single file failed. The first failing stage wins.
#[derive(Error, Debug)]
pub enum FileValidationError {
    /// The file could not be read, parsed or converted.
    #[error(transparent)]
    Load(#[from] DocumentLoadError),

    /// The document violates the schema.
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),

    /// The document violates a content-safety rule.
    #[error(transparent)]
    Content(#[from] ContentViolation),
}

/// The result of validating one file.
#[derive(Debug)]
pub struct FileOutcome {
    /// Path of the validated file.
    pub path: PathBuf,
    /// `Ok(())` if the file passed every stage.
    pub result: Result<(), FileValidationError>,
}

impl FileOutcome {
    /// True if the file passed.
    pub fn passed(&self) -> bool {
        self.result.is_ok()
    }
}

/// Aggregated result of a directory run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Number of files validated.
    pub total: usize,
    /// Number of files that passed.
    pub passed: usize,
    /// Outcomes of the files that failed, in traversal order.
    pub failures: Vec<FileOutcome>,
}

impl BatchReport {
    /// Number of files that failed.
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// True if no file failed. An empty run is a success.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, outcome: FileOutcome) {
        self.total += 1;
        if outcome.passed() {
            self.passed += 1;
        } else {
            self.failures.push(outcome);
        }
    }
}

/// Receives per-file progress during a directory run.
pub trait BatchObserver {
    /// Called before a file is validated.
    fn on_start(&mut self, path: &Path);

    /// Called as soon as a file's outcome is known.
    fn on_finish(&mut self, outcome: &FileOutcome);
}

impl BatchObserver for () {
    fn on_start(&mut self, _path: &Path) {}

    fn on_finish(&mut self, _outcome: &FileOutcome) {}
}

/// A compiled schema plus the content rules, ready to validate files.
#[derive(Debug)]
pub struct Pipeline<'s> {
    schema: &'s CompiledSchema,
    content: ContentChecker,
}

impl<'s> Pipeline<'s> {
    /// Build a pipeline over a compiled schema.
    pub fn new(schema: &'s CompiledSchema) -> Self {
        Self {
            schema,
            content: ContentChecker::new(),
        }
    }

    /// Validate one file: load, then schema, then content rules.
    ///
    /// # Errors
    ///
    /// Returns the [`FileValidationError`] of the first failing stage.
    pub fn validate_file(&self, path: &Path) -> Result<(), FileValidationError> {
        let document = load_document(path)?;
        self.schema.validate(&document)?;
        self.content.check(&document)?;
        Ok(())
    }

    /// Validate every `.yaml` / `.yml` file under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError`] if the tree cannot be enumerated; no file is
    /// validated in that case.
    pub fn validate_directory(
        &self,
        root: &Path,
        observer: &mut impl BatchObserver,
    ) -> Result<BatchReport, CollectError> {
        let paths = collect_documents(root)?;
        let mut report = BatchReport::default();

        for path in paths {
            observer.on_start(&path);
            let result = self.validate_file(&path);
            match &result {
                Ok(()) => tracing::debug!(path = %path.display(), "document passed"),
                Err(e) => tracing::debug!(path = %path.display(), error = %e, "document failed"),
            }
            let outcome = FileOutcome { path, result };
            observer.on_finish(&outcome);
            report.record(outcome);
        }

        tracing::info!(
            total = report.total,
            passed = report.passed,
            failed = report.failed(),
            "batch validation complete"
        );

        Ok(report)
    }
}
