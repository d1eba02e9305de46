//! Core types used throughout the project.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{
    Deserialize,
    Serialize,
};

/// Language identifier derived from a `<tag>.lproj` directory name
/// (e.g. `en`, `es`, `zh-Hans`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// One discovered resource file together with the language its `.lproj`
/// directory implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceFileRef {
    pub language: LanguageTag,
    pub path: PathBuf,
}

impl ResourceFileRef {
    #[must_use]
    pub fn new(language: LanguageTag, path: PathBuf) -> Self {
        Self { language, path }
    }
}

/// All discovered resource files for one run, keyed by language.
///
/// A `BTreeMap` so that every per-language pass iterates in a stable,
/// lexicographic order.
pub type TranslationSet = BTreeMap<LanguageTag, ResourceFileRef>;

/// Flattened key → value mapping for one language's resource file.
///
/// Lexicographic key order is relied on for deterministic finding output.
pub type TranslationTable = BTreeMap<String, String>;

/// Builds a [`TranslationSet`] from discovered files.
///
/// Duplicate language tags resolve last-discovered-wins; the overwrite is
/// logged because it usually means nested or stray `.lproj` directories.
#[must_use]
pub fn collect_translation_set(refs: Vec<ResourceFileRef>) -> TranslationSet {
    let mut set = TranslationSet::new();
    for file_ref in refs {
        if let Some(previous) = set.insert(file_ref.language.clone(), file_ref.clone()) {
            tracing::warn!(
                language = %file_ref.language,
                replaced = %previous.path.display(),
                kept = %file_ref.path.display(),
                "Duplicate language directory, keeping the last discovered file"
            );
        }
    }
    set
}
