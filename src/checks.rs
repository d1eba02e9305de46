//! Pure comparison engines: language set reconciliation, key diffing and
//! the key-equals-value scan.
//!
//! Everything here is side-effect free; the verifier turns the returned
//! sets into findings.

use std::collections::BTreeSet;

use crate::types::{
    LanguageTag,
    TranslationTable,
};

/// Result of reconciling discovered languages against an expected set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageDiff {
    /// Expected but not discovered, sorted.
    pub missing: Vec<LanguageTag>,
    /// Discovered but not expected, sorted.
    pub unexpected: Vec<LanguageTag>,
}

impl LanguageDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.unexpected.is_empty()
    }
}

/// Compares the expected language set with the discovered one.
#[must_use]
pub fn reconcile_languages(expected: &[LanguageTag], actual: &[LanguageTag]) -> LanguageDiff {
    let expected: BTreeSet<&LanguageTag> = expected.iter().collect();
    let actual: BTreeSet<&LanguageTag> = actual.iter().collect();

    LanguageDiff {
        missing: expected.difference(&actual).map(|t| (*t).clone()).collect(),
        unexpected: actual.difference(&expected).map(|t| (*t).clone()).collect(),
    }
}

/// Result of diffing one language's keys against the baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyDiff {
    /// Present in the reference, absent from the candidate. Sorted.
    pub missing_keys: Vec<String>,
    /// Present in the candidate, absent from the reference. Sorted.
    pub extra_keys: Vec<String>,
}

impl KeyDiff {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing_keys.is_empty() && self.extra_keys.is_empty()
    }
}

/// Diffs a candidate table's key set against the reference table's.
///
/// Values are never compared; a translation gap is purely a key-set
/// difference.
#[must_use]
pub fn diff_translations(reference: &TranslationTable, candidate: &TranslationTable) -> KeyDiff {
    KeyDiff {
        missing_keys: reference
            .keys()
            .filter(|key| !candidate.contains_key(*key))
            .cloned()
            .collect(),
        extra_keys: candidate
            .keys()
            .filter(|key| !reference.contains_key(*key))
            .cloned()
            .collect(),
    }
}

/// Returns the keys whose trimmed value equals the key itself, sorted.
///
/// An entry left equal to its key is almost always an untranslated
/// placeholder. The comparison is exact and case-sensitive.
#[must_use]
pub fn self_referential_keys(table: &TranslationTable) -> Vec<String> {
    table
        .iter()
        .filter(|(key, value)| value.trim() == key.as_str())
        .map(|(key, _)| key.clone())
        .collect()
}
