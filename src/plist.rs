//! Plist codec seam.
//!
//! The verifier never parses the `.strings` format itself. It only consumes
//! a flat key → value mapping produced by a [`PlistCodec`], so the core
//! stays testable with in-memory fakes while production shells out to
//! `plutil`.

use std::path::Path;
use std::process::Command;

use serde_json::Value;
use thiserror::Error;

use crate::types::TranslationTable;

/// Errors from loading a resource file through a codec.
#[derive(Error, Debug)]
pub enum PlistError {
    #[error("Failed to run plist converter for '{path}': {source}")]
    Io { path: String, source: std::io::Error },
    #[error("Plist conversion failed for '{path}': {stderr}")]
    Convert { path: String, stderr: String },
    #[error("Failed to parse converter output for '{path}': {source}")]
    Parse { path: String, source: serde_json::Error },
    #[error("Converter output for '{path}' is not a key/value dictionary")]
    NotADictionary { path: String },
}

/// Structural validation plus flatten-to-map loading of one resource file.
///
/// Any tool able to lint a plist and flatten it to string pairs satisfies
/// this seam.
pub trait PlistCodec {
    /// Checks structural validity without loading.
    fn validate(&self, path: &Path) -> bool;

    /// Loads the file as a flat key → value table.
    fn load(&self, path: &Path) -> Result<TranslationTable, PlistError>;
}

/// Production codec backed by the `plutil` command line tool.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlutilCodec;

impl PlutilCodec {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl PlistCodec for PlutilCodec {
    fn validate(&self, path: &Path) -> bool {
        match Command::new("plutil").arg("-lint").arg(path).output() {
            Ok(output) => output.status.success(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to run plutil -lint");
                false
            }
        }
    }

    fn load(&self, path: &Path) -> Result<TranslationTable, PlistError> {
        let output = Command::new("plutil")
            .args(["-convert", "json", "-o", "-"])
            .arg(path)
            .output()
            .map_err(|source| PlistError::Io { path: path.display().to_string(), source })?;

        if !output.status.success() {
            return Err(PlistError::Convert {
                path: path.display().to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let json: Value = serde_json::from_slice(&output.stdout)
            .map_err(|source| PlistError::Parse { path: path.display().to_string(), source })?;

        table_from_json(&json).ok_or_else(|| PlistError::NotADictionary {
            path: path.display().to_string(),
        })
    }
}

/// Converts a JSON object into a [`TranslationTable`].
///
/// `.strings` files are flat dictionaries; scalar non-string values are kept
/// as their JSON rendering rather than rejected.
#[must_use]
pub fn table_from_json(json: &Value) -> Option<TranslationTable> {
    let object = json.as_object()?;
    let mut table = TranslationTable::new();
    for (key, value) in object {
        let rendered = match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        table.insert(key.clone(), rendered);
    }
    Some(table)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use serde_json::json;

    use super::*;

    #[googletest::test]
    fn test_table_from_json_flat_dictionary() {
        let json = json!({
            "greeting": "Hello",
            "farewell": "Goodbye"
        });

        let table = table_from_json(&json).unwrap();

        expect_that!(table.get("greeting"), some(eq(&"Hello".to_string())));
        expect_that!(table.get("farewell"), some(eq(&"Goodbye".to_string())));
        expect_that!(table.len(), eq(2));
    }

    #[googletest::test]
    fn test_table_from_json_renders_non_string_values() {
        let json = json!({
            "count": 3,
            "flag": true
        });

        let table = table_from_json(&json).unwrap();

        expect_that!(table.get("count"), some(eq(&"3".to_string())));
        expect_that!(table.get("flag"), some(eq(&"true".to_string())));
    }

    #[googletest::test]
    fn test_table_from_json_rejects_non_object() {
        expect_that!(table_from_json(&json!(["a", "b"])), none());
        expect_that!(table_from_json(&json!("scalar")), none());
    }
}
