//! # File Collector
//!
//! Recursive discovery of YAML data files under a target directory.
//! Traversal is sorted by file name at every level so that a run over an
//! unchanged tree always visits files in the same order.
//!
//! A root that is itself a file is treated as a one-entry tree: it is
//! collected when its name matches, and yields nothing otherwise.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

/// File name suffixes recognised as data documents. Matching is
/// case-sensitive.
pub const DOCUMENT_EXTENSIONS: [&str; 2] = [".yaml", ".yml"];

/// Errors while enumerating the target tree. Always fatal to a run.
#[derive(Error, Debug)]
pub enum CollectError {
    /// The root or a directory beneath it could not be read.
    #[error("cannot read directory {}: {source}", .path.display())]
    Walk {
        /// The directory (or entry) that failed.
        path: PathBuf,
        /// Underlying traversal error.
        #[source]
        source: walkdir::Error,
    },
}

/// Returns true if `name` ends with one of [`DOCUMENT_EXTENSIONS`]. Names
/// need not be valid UTF-8.
pub fn is_document_name(name: &OsStr) -> bool {
    let bytes = name.as_encoded_bytes();
    DOCUMENT_EXTENSIONS
        .iter()
        .any(|ext| bytes.ends_with(ext.as_bytes()))
}

/// Collect every non-directory entry under `root` whose file name ends in
/// `.yaml` or `.yml`, in deterministic traversal order.
///
/// # Errors
///
/// Returns [`CollectError::Walk`] if `root` or any directory beneath it
/// cannot be read.
pub fn collect_documents(root: &Path) -> Result<Vec<PathBuf>, CollectError> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| CollectError::Walk {
            path: source.path().unwrap_or(root).to_path_buf(),
            source,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        if is_document_name(entry.file_name()) {
            documents.push(entry.into_path());
        }
    }

    tracing::debug!(
        root = %root.display(),
        count = documents.len(),
        "collected documents"
    );

    Ok(documents)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, b"title: x\n").unwrap();
    }

    #[test]
    fn test_collects_only_yaml_and_yml() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("a.yaml"));
        touch(&root.join("b.yml"));
        touch(&root.join("c.json"));
        touch(&root.join("d.YAML"));
        touch(&root.join("e.yaml.bak"));
        touch(&root.join("notes.txt"));

        let files = collect_documents(root).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.yml"]);
    }

    #[test]
    fn test_recurses_into_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("top.yaml"));
        touch(&root.join("nested").join("deeper").join("leaf.yml"));
        touch(&root.join("nested").join("mid.yaml"));

        let files = collect_documents(root).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.contains(&root.join("nested").join("deeper").join("leaf.yml")));
    }

    #[test]
    fn test_directory_named_like_yaml_is_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir_all(root.join("config.yaml")).unwrap();
        touch(&root.join("config.yaml").join("inner.yaml"));

        let files = collect_documents(root).unwrap();
        assert_eq!(files, vec![root.join("config.yaml").join("inner.yaml")]);
    }

    #[test]
    fn test_order_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        for name in ["zeta.yaml", "alpha.yml", "mid/beta.yaml", "gamma.yaml"] {
            touch(&root.join(name));
        }

        let first = collect_documents(root).unwrap();
        let second = collect_documents(root).unwrap();
        assert_eq!(first, second);
        assert_eq!(first[0], root.join("alpha.yml"));
    }

    #[test]
    fn test_empty_directory_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_documents(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_walk_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = collect_documents(&dir.path().join("nope")).unwrap_err();
        assert!(
            matches!(err, CollectError::Walk { .. }),
            "Expected Walk, got: {err}"
        );
    }

    #[test]
    fn test_matching_file_root_is_collected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("single.yaml");
        touch(&file);
        assert_eq!(collect_documents(&file).unwrap(), vec![file]);
    }

    #[test]
    fn test_other_file_root_yields_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        touch(&file);
        assert!(collect_documents(&file).unwrap().is_empty());
    }

    #[test]
    fn test_is_document_name_is_case_sensitive() {
        assert!(is_document_name(OsStr::new("x.yaml")));
        assert!(is_document_name(OsStr::new("x.yml")));
        assert!(!is_document_name(OsStr::new("x.Yml")));
        assert!(!is_document_name(OsStr::new("yaml")));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_file_name_is_collected() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.yaml");
        let path = dir.path().join(name);
        touch(&path);
        touch(&dir.path().join(OsStr::from_bytes(b"caf\xe9.txt")));

        assert_eq!(collect_documents(dir.path()).unwrap(), vec![path]);
    }
}
