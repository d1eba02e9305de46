//! Resource file discovery.
//!
//! Walks a search root for `{base_name}.strings` files living inside
//! `<tag>.lproj` directories and tags each hit with the language the
//! directory name implies.

use std::path::Path;

use globset::Glob;
use ignore::WalkBuilder;
use thiserror::Error;

use crate::types::{
    LanguageTag,
    ResourceFileRef,
};

/// Directory suffix that marks a language-specific resource bundle.
const LANGUAGE_DIR_SUFFIX: &str = ".lproj";

/// Errors from resource file discovery.
#[derive(Error, Debug)]
pub enum LocatorError {
    /// The search matched nothing. The message embeds the exact pattern so
    /// reviewers can reproduce the search; existing consumers rely on this
    /// wording.
    #[error("Unable to find any strings files matching `{pattern}`")]
    NoMatches { pattern: String },
    /// The base name produced an uncompilable glob.
    #[error("Invalid search pattern '{pattern}': {source}")]
    Pattern { pattern: String, source: globset::Error },
}

/// Renders the glob pattern used to search for a bundle family.
#[must_use]
pub fn search_pattern(search_root: &Path, base_name: &str) -> String {
    search_root.join("**").join(format!("{base_name}.strings")).display().to_string()
}

/// Finds every `{base_name}.strings` file beneath `search_root`.
///
/// Only files whose parent directory carries the `.lproj` suffix are kept;
/// anything else named after the base file is ignored. Trailing separators
/// on `search_root` do not change the result since paths are joined, not
/// concatenated.
///
/// # Errors
/// [`LocatorError::NoMatches`] when nothing matched.
pub fn locate(search_root: &Path, base_name: &str) -> Result<Vec<ResourceFileRef>, LocatorError> {
    let pattern = search_pattern(search_root, base_name);
    let matcher = Glob::new(&format!("**/{base_name}.strings"))
        .map_err(|source| LocatorError::Pattern { pattern: pattern.clone(), source })?
        .compile_matcher();

    tracing::debug!(pattern = %pattern, "Searching for strings files");

    let mut found = Vec::new();
    for result in WalkBuilder::new(search_root)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        if !matcher.is_match(path) {
            continue;
        }

        let Some(language) = language_from_path(path) else {
            tracing::debug!(path = %path.display(), "Skipping match outside a language directory");
            continue;
        };

        found.push(ResourceFileRef::new(language, path.to_path_buf()));
    }

    if found.is_empty() {
        return Err(LocatorError::NoMatches { pattern });
    }

    Ok(found)
}

/// Extracts the language tag from the file's containing `.lproj` directory.
fn language_from_path(path: &Path) -> Option<LanguageTag> {
    let dir_name = path.parent()?.file_name()?.to_str()?;
    let tag = dir_name.strip_suffix(LANGUAGE_DIR_SUFFIX)?;
    if tag.is_empty() {
        return None;
    }
    Some(LanguageTag::new(tag))
}
