//! Integration test: validate a mixed directory tree end to end.
//!
//! Builds a schema and a tree of passing and failing documents in a temp
//! directory, then checks that every document is visited, that each failure
//! lands in the right stage, and that repeated runs agree.

use std::path::{Path, PathBuf};

use docgate_schema::{
    BatchReport, CompiledSchema, ContentViolation, FileValidationError, Pipeline,
};

const SCHEMA: &str = r#"{
    "$schema": "https://json-schema.org/draft/2020-12/schema",
    "type": "object",
    "required": ["name"],
    "properties": {
        "name": { "$ref": "identifier.schema.json" },
        "title": { "type": "string" },
        "message": { "type": "string" },
        "details": { "type": "string" }
    }
}"#;

const IDENTIFIER_SCHEMA: &str = r#"{
    "type": "string",
    "pattern": "^[a-z][a-z0-9-]*$"
}"#;

fn write(root: &Path, rel: &str, body: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, body).unwrap();
    path
}

/// Lay out a schema directory and a document tree under one temp dir.
fn fixture() -> (tempfile::TempDir, PathBuf, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let schema_path = write(dir.path(), "schemas/notice.schema.json", SCHEMA);
    write(dir.path(), "schemas/identifier.schema.json", IDENTIFIER_SCHEMA);

    let docs = dir.path().join("notices");
    write(&docs, "release.yaml", "name: release\ntitle: New release\ndetails: hello\n");
    write(&docs, "archive/old.yml", "name: old-notice\nmessage: 'a<b'\n");
    write(&docs, "archive/unnamed.yaml", "title: Missing name\n");
    write(&docs, "archive/bad-id.yaml", "name: Bad_Id\n");
    write(&docs, "markup/bold.yaml", "name: bold\ndetails: <b>hi</b>\n");
    write(&docs, "markup/tag.yaml", "name: tag\ntitle: a<b>c\n");
    write(&docs, "broken.yaml", "name: [unterminated\n");
    write(&docs, "list.yaml", "- name: item\n");
    write(&docs, "README.md", "# not a document\n");
    write(&docs, "data.json", "{\"name\": \"skip\"}\n");

    (dir, schema_path, docs)
}

fn run(schema_path: &Path, docs: &Path) -> BatchReport {
    let schema = CompiledSchema::from_path(schema_path).expect("schema compiles");
    Pipeline::new(&schema)
        .validate_directory(docs, &mut ())
        .expect("tree is readable")
}

fn failure<'a>(report: &'a BatchReport, name: &str) -> &'a FileValidationError {
    let outcome = report
        .failures
        .iter()
        .find(|o| o.path.file_name().is_some_and(|n| n == name))
        .unwrap_or_else(|| panic!("expected {name} to fail"));
    outcome.result.as_ref().unwrap_err()
}

#[test]
fn test_only_yaml_documents_are_processed() {
    let (_dir, schema_path, docs) = fixture();
    let report = run(&schema_path, &docs);
    assert_eq!(report.total, 8);
}

#[test]
fn test_outcomes_per_stage() {
    let (_dir, schema_path, docs) = fixture();
    let report = run(&schema_path, &docs);

    assert_eq!(report.passed, 2, "release.yaml and old.yml should pass");
    assert_eq!(report.failed(), 6);

    assert!(matches!(
        failure(&report, "broken.yaml"),
        FileValidationError::Load(_)
    ));

    let unnamed = failure(&report, "unnamed.yaml");
    assert!(matches!(unnamed, FileValidationError::Schema(_)));
    assert!(unnamed.to_string().contains("name"), "got: {unnamed}");

    assert!(matches!(
        failure(&report, "bad-id.yaml"),
        FileValidationError::Schema(_)
    ));
    assert!(matches!(
        failure(&report, "list.yaml"),
        FileValidationError::Schema(_)
    ));

    assert!(matches!(
        failure(&report, "bold.yaml"),
        FileValidationError::Content(ContentViolation::UnsafeHtml { field: "details" })
    ));
    assert!(matches!(
        failure(&report, "tag.yaml"),
        FileValidationError::Content(ContentViolation::MarkupInPlainText { field: "title" })
    ));
}

#[test]
fn test_repeated_runs_are_identical() {
    let (_dir, schema_path, docs) = fixture();
    let first = run(&schema_path, &docs);
    let second = run(&schema_path, &docs);

    let summarize = |r: &BatchReport| {
        r.failures
            .iter()
            .map(|o| (o.path.clone(), o.result.as_ref().unwrap_err().to_string()))
            .collect::<Vec<_>>()
    };

    assert_eq!(first.total, second.total);
    assert_eq!(first.passed, second.passed);
    assert_eq!(summarize(&first), summarize(&second));
}

#[test]
fn test_unreadable_tree_is_fatal() {
    let (_dir, schema_path, docs) = fixture();
    let schema = CompiledSchema::from_path(&schema_path).unwrap();
    let result = Pipeline::new(&schema).validate_directory(&docs.join("does-not-exist"), &mut ());
    assert!(result.is_err());
}
