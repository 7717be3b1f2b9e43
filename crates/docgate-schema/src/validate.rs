//! # Schema Validation
//!
//! Wraps the `jsonschema` crate behind [`CompiledSchema`]: one schema file,
//! compiled once at startup, then reused read-only for every document.
//!
//! ## Schema Resolution
//!
//! The draft is detected from the schema's `$schema` keyword. A root schema
//! without an identifier is given the `file://` URI of its own path, so
//! relative `$ref`s such as `defs/name.json` or `../shared/id.json` resolve
//! against the schema file's location. Only `file` URIs are retrieved;
//! nothing is fetched over the network, and a reference to a missing file
//! or to any other scheme fails compilation.

use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Draft, Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Errors loading or compiling the schema. Always fatal to a run.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read.
    #[error("cannot read schema {}: {source}", .path.display())]
    Read {
        /// Path of the schema file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The schema file is not valid JSON.
    #[error("invalid JSON in schema {}: {reason}", .path.display())]
    Parse {
        /// Path of the schema file.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// The schema is JSON but not a valid JSON Schema.
    #[error("failed to compile schema {}: {reason}", .path.display())]
    Compile {
        /// Path of the schema file.
        path: PathBuf,
        /// Compiler diagnostic.
        reason: String,
    },
}

/// A single schema violation with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value in the document.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// The document did not conform to the schema. Per-file.
#[derive(Error, Debug, Clone)]
#[error("schema validation failed with {} violation(s):\n{}", .violations.len(), render(.violations))]
pub struct SchemaValidationError {
    violations: Vec<Violation>,
}

impl SchemaValidationError {
    /// Every violation reported by the validator, in validator order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Resolves `$ref` URIs that name local files. Any other scheme is refused.
struct FileRetriever;

impl Retrieve for FileRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        let mut url = Url::parse(uri_str)?;
        if url.scheme() != "file" {
            return Err(format!("refusing to fetch non-file schema reference {uri_str}").into());
        }
        url.set_fragment(None);

        let path = url
            .to_file_path()
            .map_err(|()| format!("schema reference {uri_str} is not a local file path"))?;

        tracing::debug!(uri = uri_str, path = %path.display(), "resolving schema reference");
        let content = std::fs::read_to_string(&path).map_err(|e| {
            format!("schema reference {uri_str} not readable at {}: {e}", path.display())
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Give the root schema a `file://` identifier unless it declares one, so
/// relative `$ref`s resolve against `base`.
fn with_base_id(mut schema: Value, base: &Url) -> Value {
    let key = match Draft::default().detect(&schema) {
        Ok(Draft::Draft4) => "id",
        _ => "$id",
    };
    if let Value::Object(map) = &mut schema {
        map.entry(key)
            .or_insert_with(|| Value::String(base.to_string()));
    }
    schema
}

/// An immutable, compiled JSON Schema.
///
/// `CompiledSchema` is `Send + Sync`; a single instance can be shared by
/// reference across any number of document validations.
pub struct CompiledSchema {
    path: PathBuf,
    validator: Validator,
}

impl fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl CompiledSchema {
    /// Load and compile the schema at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Read`] if the file cannot be read,
    /// [`SchemaError::Parse`] if it is not JSON, and
    /// [`SchemaError::Compile`] if the validator cannot be built (including
    /// unresolvable `$ref`s).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref().to_path_buf();

        let content = std::fs::read_to_string(&path).map_err(|source| SchemaError::Read {
            path: path.clone(),
            source,
        })?;

        let schema: Value = serde_json::from_str(&content).map_err(|e| SchemaError::Parse {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let absolute = std::fs::canonicalize(&path).map_err(|source| SchemaError::Read {
            path: path.clone(),
            source,
        })?;
        let base = Url::from_file_path(&absolute).map_err(|()| SchemaError::Compile {
            path: path.clone(),
            reason: format!("cannot express {} as a file URI", absolute.display()),
        })?;

        Self::compile(path, schema, &base)
    }

    /// Compile an already-parsed schema value. Relative `$ref`s resolve
    /// against `schema_dir`, which must exist.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::Compile`] if `schema_dir` cannot be resolved
    /// or the validator cannot be built.
    pub fn from_value(schema: Value, schema_dir: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = PathBuf::from("<inline>");
        let schema_dir = schema_dir.as_ref();

        let base = std::fs::canonicalize(schema_dir)
            .map_err(|e| e.to_string())
            .and_then(|dir| {
                Url::from_directory_path(&dir)
                    .map_err(|()| format!("cannot express {} as a file URI", dir.display()))
            })
            .map_err(|reason| SchemaError::Compile {
                path: path.clone(),
                reason: format!("schema directory {}: {reason}", schema_dir.display()),
            })?;

        Self::compile(path, schema, &base)
    }

    fn compile(path: PathBuf, schema: Value, base: &Url) -> Result<Self, SchemaError> {
        let schema = with_base_id(schema, base);

        let mut opts = jsonschema::options();
        opts.with_retriever(FileRetriever);

        let validator = opts.build(&schema).map_err(|e| SchemaError::Compile {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        tracing::debug!(schema = %path.display(), base = %base, "compiled schema");

        Ok(Self { path, validator })
    }

    /// Path the schema was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate a document, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError`] listing each violation if the
    /// document does not conform.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let violations: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError { violations })
        }
    }
}
