//! # Document Loader
//!
//! Reads one YAML file and converts it into the generic JSON value tree that
//! both the schema validator and the content checker operate on.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

/// Errors raised while loading a single document. Always per-file.
#[derive(Error, Debug)]
pub enum DocumentLoadError {
    /// The file could not be read from disk.
    #[error("cannot read file {}: {source}", .path.display())]
    Read {
        /// Path of the unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file contents are not valid YAML.
    #[error("invalid YAML in {}: {reason}", .path.display())]
    Parse {
        /// Path of the malformed file.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// The YAML tree has no JSON equivalent.
    #[error("YAML-to-JSON conversion failed for {}: {reason}", .path.display())]
    Convert {
        /// Path of the offending file.
        path: PathBuf,
        /// What could not be represented.
        reason: String,
    },
}

/// Load a YAML file into a [`serde_json::Value`].
///
/// The file must hold exactly one YAML document. Scalar types and nesting
/// are preserved; YAML tags are dropped in favour of the tagged value.
///
/// # Errors
///
/// Returns [`DocumentLoadError::Read`] if the file cannot be read,
/// [`DocumentLoadError::Parse`] if it is not UTF-8 or not valid YAML, and
/// [`DocumentLoadError::Convert`] if the parsed tree cannot be expressed
/// as JSON (e.g. a sequence used as a mapping key, or a `.nan` float).
pub fn load_document(path: &Path) -> Result<Value, DocumentLoadError> {
    let bytes = std::fs::read(path).map_err(|source| DocumentLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let content = String::from_utf8(bytes).map_err(|e| DocumentLoadError::Parse {
        path: path.to_path_buf(),
        reason: format!("file is not valid UTF-8: {}", e.utf8_error()),
    })?;

    let yaml_value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|e| DocumentLoadError::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    yaml_to_json_value(&yaml_value).map_err(|reason| DocumentLoadError::Convert {
        path: path.to_path_buf(),
        reason,
    })
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Mapping keys that are strings, numbers or booleans become JSON object
/// keys; any other key type is rejected, as are non-finite floats.
pub(crate) fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_json_value).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key type: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
