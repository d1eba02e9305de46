//! Shared helpers for unit tests.
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use std::collections::{
    HashMap,
    HashSet,
};
use std::fs;
use std::path::{
    Path,
    PathBuf,
};

use crate::plist::{
    PlistCodec,
    PlistError,
};
use crate::types::TranslationTable;

/// In-memory codec standing in for the external plist converter.
///
/// Paths registered with [`FakeCodec::insert`] load the given table; paths
/// registered with [`FakeCodec::mark_invalid`] fail structural validation.
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeCodec {
    tables: HashMap<PathBuf, TranslationTable>,
    invalid: HashSet<PathBuf>,
}

impl FakeCodec {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, path: impl Into<PathBuf>, table: TranslationTable) {
        self.tables.insert(path.into(), table);
    }

    pub(crate) fn mark_invalid(&mut self, path: impl Into<PathBuf>) {
        self.invalid.insert(path.into());
    }
}

impl PlistCodec for FakeCodec {
    fn validate(&self, path: &Path) -> bool {
        !self.invalid.contains(path)
    }

    fn load(&self, path: &Path) -> Result<TranslationTable, PlistError> {
        self.tables.get(path).cloned().ok_or_else(|| PlistError::Convert {
            path: path.display().to_string(),
            stderr: "no table registered".to_string(),
        })
    }
}

/// Builds a [`TranslationTable`] from literal pairs.
pub(crate) fn table(entries: &[(&str, &str)]) -> TranslationTable {
    entries.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

/// Creates an empty on-disk fixture file, with parents, and returns its path.
///
/// The locator needs real files; their content is irrelevant because tests
/// load through [`FakeCodec`].
pub(crate) fn write_fixture(root: &Path, relative: &str) -> PathBuf {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "").unwrap();
    path
}
