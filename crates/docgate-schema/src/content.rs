//! # Content-Safety Rules
//!
//! Hygiene checks on free-text fields that JSON Schema cannot express.
//!
//! Rules run in a fixed order and the first violation wins:
//!
//! 1. `details` (rich text): a non-empty string must survive strict HTML
//!    sanitization unchanged. The strict policy allows no tags and no
//!    attributes, so any markup at all is rejected, as is any text the
//!    sanitizer would escape.
//! 2. `title`, then `message` (plain text): a string containing both a `<`
//!    and a `>` anywhere is rejected. This is a character heuristic, not a
//!    parser; `"1 < 2 and 3 > 1"` is rejected too.
//!
//! Absent, empty or non-string fields are skipped. No other keys are read.

use ammonia::Builder;
use serde_json::{Map, Value};
use thiserror::Error;

/// Field sanitized with the strict HTML policy.
pub const RICH_TEXT_FIELD: &str = "details";

/// Fields rejected when they contain tag-like markup, in check order.
pub const PLAIN_TEXT_FIELDS: [&str; 2] = ["title", "message"];

/// A content-safety rule violation. Per-file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentViolation {
    /// The document root is not a mapping.
    #[error("expected an object at the document root")]
    NotAnObject,

    /// The rich-text field changed under strict sanitization.
    #[error("unsafe HTML content detected in field '{field}'")]
    UnsafeHtml {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A plain-text field contains both `<` and `>`.
    #[error("HTML markup is not allowed in field '{field}'")]
    MarkupInPlainText {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Applies the content-safety rules to a loaded document.
pub struct ContentChecker {
    sanitizer: Builder<'static>,
}

impl std::fmt::Debug for ContentChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentChecker")
            .field("rich_text_field", &RICH_TEXT_FIELD)
            .field("plain_text_fields", &PLAIN_TEXT_FIELDS)
            .finish()
    }
}

impl Default for ContentChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentChecker {
    /// Build a checker with the strict sanitization policy.
    pub fn new() -> Self {
        Self {
            sanitizer: Builder::empty(),
        }
    }

    /// Check a document against all rules.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContentViolation`] encountered.
    pub fn check(&self, document: &Value) -> Result<(), ContentViolation> {
        let object = document.as_object().ok_or(ContentViolation::NotAnObject)?;

        if let Some(details) = string_field(object, RICH_TEXT_FIELD) {
            if !details.is_empty() && !self.is_clean(details) {
                return Err(ContentViolation::UnsafeHtml {
                    field: RICH_TEXT_FIELD,
                });
            }
        }

        for field in PLAIN_TEXT_FIELDS {
            if let Some(text) = string_field(object, field) {
                if contains_tag_markers(text) {
                    return Err(ContentViolation::MarkupInPlainText { field });
                }
            }
        }

        Ok(())
    }

    /// True if strict sanitization leaves `text` byte-for-byte unchanged.
    fn is_clean(&self, text: &str) -> bool {
        self.sanitizer.clean(text).to_string() == text
    }
}

fn string_field<'a>(object: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    object.get(field).and_then(Value::as_str)
}

fn contains_tag_markers(text: &str) -> bool {
    text.contains('<') && text.contains('>')
}
