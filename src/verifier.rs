//! Verification orchestrator.
//!
//! Sequences discovery, language reconciliation, per-language structural
//! checks and key diffing, and decides which findings block the review.
//! All findings accumulate in discovery order on the run and are flushed to
//! the reporter at the end, including on early aborts.

use std::path::Path;

use crate::checks::{
    diff_translations,
    reconcile_languages,
    self_referential_keys,
};
use crate::config::VerifyConfig;
use crate::plist::PlistCodec;
use crate::report::{
    self,
    Finding,
    Reporter,
    Severity,
};
use crate::types::{
    LanguageTag,
    TranslationSet,
    TranslationTable,
    collect_translation_set,
};
use crate::{
    locator,
    plist,
};

/// Counters and outcome of one completed (or aborted) run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Key count of the development language's table.
    pub baseline_strings: usize,
    /// Distinct languages discovered for the bundle family.
    pub languages: usize,
    /// Tables that loaded successfully.
    pub loaded_tables: usize,
    /// Whether any fatal finding occurred.
    pub blocking: bool,
}

impl RunSummary {
    /// True when the review should be blocked.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        self.blocking
    }
}

/// Per-invocation state. Created when `verify` starts, dropped when it
/// returns; findings never cross run boundaries.
#[derive(Debug, Default)]
struct VerificationRun {
    findings: Vec<Finding>,
    baseline_strings: usize,
    languages: usize,
    loaded_tables: usize,
    had_fatal: bool,
}

impl VerificationRun {
    fn push(&mut self, finding: Finding) {
        if finding.severity == Severity::Fatal {
            self.had_fatal = true;
        }
        self.findings.push(finding);
    }

    fn fatal(&mut self, message: impl Into<String>) {
        self.push(Finding::fatal(message));
    }

    fn advisory(&mut self, message: impl Into<String>) {
        self.push(Finding::advisory(message));
    }

    fn summary(&self) -> RunSummary {
        RunSummary {
            baseline_strings: self.baseline_strings,
            languages: self.languages,
            loaded_tables: self.loaded_tables,
            blocking: self.had_fatal,
        }
    }
}

/// Validates one localization bundle family against its development
/// language.
#[derive(Debug, Clone)]
pub struct Verifier<C> {
    codec: C,
}

impl<C: PlistCodec> Verifier<C> {
    #[must_use]
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Runs every check for the configured bundle family and flushes the
    /// resulting findings to `reporter` in discovery order.
    pub fn verify(&self, config: &VerifyConfig, reporter: &mut dyn Reporter) -> RunSummary {
        let mut run = VerificationRun::default();
        self.run_checks(config, &mut run);
        report::flush(&run.findings, reporter);
        run.summary()
    }

    fn run_checks(&self, config: &VerifyConfig, run: &mut VerificationRun) {
        // Configuration problems abort before any I/O.
        if let Err(errors) = config.validate() {
            for error in errors {
                run.fatal(error.message);
            }
            return;
        }

        let refs = match locator::locate(&config.search_path, &config.base_name) {
            Ok(refs) => refs,
            Err(e) => {
                run.fatal(e.to_string());
                return;
            }
        };

        let translations = collect_translation_set(refs);
        run.languages = translations.len();

        let Some(development_path) = translations
            .get(&config.development_language)
            .map(|file_ref| file_ref.path.clone())
        else {
            run.fatal(format!(
                "Unable to find strings file for development_language. Missing file \
                 `{}.lproj/{}.strings`",
                config.development_language, config.base_name
            ));
            return;
        };

        if !self.reconcile_language_set(config, &translations, run) {
            return;
        }

        let Some(baseline) = self.load_baseline(config, &development_path, run) else {
            return;
        };
        run.baseline_strings = baseline.as_ref().map_or(0, TranslationTable::len);

        self.check_languages(config, &translations, baseline.as_ref(), run);

        if !run.had_fatal {
            run.push(Finding::info(format!(
                "Successfully verified {} strings across {} languages",
                run.baseline_strings, run.languages
            )));
        }
    }

    /// Compares discovered languages against the expected set, if one is
    /// configured. Returns false when the run must stop.
    fn reconcile_language_set(
        &self,
        config: &VerifyConfig,
        translations: &TranslationSet,
        run: &mut VerificationRun,
    ) -> bool {
        let Some(expected) = &config.expected_languages else {
            return true;
        };

        let actual: Vec<LanguageTag> = translations.keys().cloned().collect();
        let diff = reconcile_languages(expected, &actual);
        if diff.is_empty() {
            return true;
        }

        for language in &diff.missing {
            let message = format!(
                "Unable to find strings file named `{}.strings` for language `{language}`",
                config.base_name
            );
            if config.strict_language_set {
                run.fatal(message);
            } else {
                run.advisory(message);
            }
        }
        for language in &diff.unexpected {
            let message = format!(
                "Found unexpected strings file named `{}.strings` for language `{language}`",
                config.base_name
            );
            if config.strict_language_set {
                run.fatal(message);
            } else {
                run.advisory(message);
            }
        }

        !config.strict_language_set
    }

    /// Loads the development language's table once; it is the comparison
    /// baseline for every other language.
    ///
    /// Returns `None` when the run must stop, `Some(None)` when the
    /// baseline is unusable but a lenient policy lets the run continue
    /// without diffing.
    fn load_baseline(
        &self,
        config: &VerifyConfig,
        development_path: &Path,
        run: &mut VerificationRun,
    ) -> Option<Option<TranslationTable>> {
        let loaded = if self.codec.validate(development_path) {
            match self.codec.load(development_path) {
                Ok(table) => Some(table),
                Err(e) => {
                    tracing::debug!(error = %e, "Failed to load development language table");
                    None
                }
            }
        } else {
            None
        };

        if loaded.is_some() {
            return Some(loaded);
        }

        let message = format!("Invalid plist file '{}'", development_path.display());
        if config.strict_baseline_validation {
            run.fatal(message);
            return None;
        }
        run.advisory(message);
        Some(None)
    }

    /// The per-language loop. A failure here only ever skips the remaining
    /// checks for that language, never the run.
    fn check_languages(
        &self,
        config: &VerifyConfig,
        translations: &TranslationSet,
        baseline: Option<&TranslationTable>,
        run: &mut VerificationRun,
    ) {
        for (language, file_ref) in translations {
            let is_development = *language == config.development_language;

            let loaded;
            let table: &TranslationTable = if is_development {
                // Loaded at most once per run; reused as the baseline.
                match baseline {
                    Some(table) => table,
                    None => continue,
                }
            } else {
                if !self.codec.validate(&file_ref.path) {
                    run.advisory(format!("Invalid plist file '{}'", file_ref.path.display()));
                    continue;
                }
                match self.codec.load(&file_ref.path) {
                    Ok(table) => {
                        loaded = table;
                        &loaded
                    }
                    Err(e) => {
                        tracing::debug!(language = %language, error = %e, "Failed to load table");
                        run.advisory(format!("Invalid plist file '{}'", file_ref.path.display()));
                        continue;
                    }
                }
            };
            run.loaded_tables += 1;

            if !config.ignore_key_equals_value
                && !self.check_self_referential(config, language, table, run)
            {
                continue;
            }

            if !is_development
                && let Some(reference) = baseline
            {
                self.diff_against_baseline(config, language, reference, table, run);
            }
        }
    }

    /// Returns false when the language's remaining checks must be skipped.
    fn check_self_referential(
        &self,
        config: &VerifyConfig,
        language: &LanguageTag,
        table: &TranslationTable,
        run: &mut VerificationRun,
    ) -> bool {
        let keys = self_referential_keys(table);
        for key in &keys {
            run.fatal(format!(
                "String `{key}` value matches key in `{}.strings` for language `{language}`",
                config.base_name
            ));
        }
        keys.is_empty()
    }

    fn diff_against_baseline(
        &self,
        config: &VerifyConfig,
        language: &LanguageTag,
        reference: &TranslationTable,
        candidate: &TranslationTable,
        run: &mut VerificationRun,
    ) {
        let diff = diff_translations(reference, candidate);
        for key in &diff.missing_keys {
            run.advisory(format!(
                "Translation '{key}' in '{}.strings' is defined in development language but not \
                 for '{language}'",
                config.base_name
            ));
        }
        for key in &diff.extra_keys {
            run.advisory(format!(
                "Translation '{key}' in '{}.strings' is defined for '{language}' but not the \
                 development language",
                config.base_name
            ));
        }
    }
}

/// Convenience constructor for the production codec.
impl Verifier<plist::PlutilCodec> {
    #[must_use]
    pub fn with_plutil() -> Self {
        Self::new(plist::PlutilCodec::new())
    }
}
