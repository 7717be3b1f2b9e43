//! # docgate-schema — Document Validation Pipeline
//!
//! Validates YAML data files against a JSON Schema and a small set of
//! content-safety rules that the schema language cannot express.
//!
//! ## Stages
//!
//! - [`collect`] — recursive discovery of `.yaml` / `.yml` files.
//! - [`document`] — YAML loading into a generic [`serde_json::Value`] tree.
//! - [`validate`] — [`CompiledSchema`], a Draft-agnostic wrapper over the
//!   `jsonschema` crate, compiled once per run.
//! - [`content`] — [`ContentChecker`], the HTML hygiene rules for the
//!   `details`, `title` and `message` fields.
//! - [`pipeline`] — [`Pipeline`], composing the stages per file and per
//!   directory and aggregating a [`BatchReport`].
//!
//! ## Error Severity
//!
//! Only two errors are fatal to a run: [`SchemaError`] (the schema cannot be
//! loaded or compiled) and [`CollectError`] (the target tree cannot be
//! read). Everything else is a per-file [`FileValidationError`] recorded in
//! the report while the batch continues.

pub mod collect;
pub mod content;
pub mod document;
pub mod pipeline;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use collect::{collect_documents, CollectError, DOCUMENT_EXTENSIONS};
pub use content::{ContentChecker, ContentViolation, PLAIN_TEXT_FIELDS, RICH_TEXT_FIELD};
pub use document::{load_document, DocumentLoadError};
pub use pipeline::{BatchObserver, BatchReport, FileOutcome, FileValidationError, Pipeline};
pub use validate::{CompiledSchema, SchemaError, SchemaValidationError, Violation};
