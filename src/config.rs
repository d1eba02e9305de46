//! Run configuration supplied by the host automation.

use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::types::LanguageTag;

/// A single configuration problem, keyed by field path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

/// Errors raised while reading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings for one `verify` invocation.
///
/// `expected_languages` is deliberately tri-state: `None` disables the
/// language set check entirely, while `Some(vec![])` asserts that zero
/// languages are expected.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VerifyConfig {
    /// Base file name of the bundle family, without extension
    /// (e.g. `Localizable`).
    pub base_name: String,

    /// The authoritative language every other language is diffed against.
    pub development_language: LanguageTag,

    /// Exact set of languages that must be present, if configured.
    pub expected_languages: Option<Vec<LanguageTag>>,

    /// Disables the key-equals-value check.
    pub ignore_key_equals_value: bool,

    /// Root directory searched for `.lproj` bundles.
    pub search_path: PathBuf,

    /// When true (default), a language set mismatch is fatal and
    /// short-circuits the remaining checks; when false it only warns.
    pub strict_language_set: bool,

    /// When true (default), a structurally invalid development-language
    /// file aborts the run; when false it warns and disables diffing.
    pub strict_baseline_validation: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            base_name: String::new(),
            development_language: LanguageTag::new(""),
            expected_languages: None,
            ignore_key_equals_value: false,
            search_path: PathBuf::from("."),
            strict_language_set: true,
            strict_baseline_validation: true,
        }
    }
}

impl VerifyConfig {
    /// Creates a configuration with the required fields and defaults for
    /// the rest.
    #[must_use]
    pub fn new(base_name: impl Into<String>, development_language: LanguageTag) -> Self {
        Self { base_name: base_name.into(), development_language, ..Self::default() }
    }

    /// # Errors
    /// - `baseName` is empty
    /// - `developmentLanguage` is empty
    /// - an expected language tag is empty
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.base_name.is_empty() {
            errors.push(ValidationError::new(
                "baseName",
                "The base file name cannot be empty. Example: \"Localizable\"",
            ));
        }

        if self.development_language.is_empty() {
            errors.push(ValidationError::new(
                "developmentLanguage",
                "development_language has not been set",
            ));
        }

        if let Some(expected) = &self.expected_languages {
            for (index, tag) in expected.iter().enumerate() {
                if tag.is_empty() {
                    errors.push(ValidationError::new(
                        format!("expectedLanguages[{index}]"),
                        "Language tags cannot be empty",
                    ));
                }
            }
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
