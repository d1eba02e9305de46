//! End-to-end verification runs over on-disk bundle trees.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;

use lproj_lint::config::VerifyConfig;
use lproj_lint::plist::{
    PlistCodec,
    PlistError,
    table_from_json,
};
use lproj_lint::report::CollectingReporter;
use lproj_lint::types::{
    LanguageTag,
    TranslationTable,
};
use lproj_lint::verifier::Verifier;

/// Codec that reads fixture files as JSON dictionaries, standing in for the
/// plutil-backed converter.
#[derive(Debug, Clone, Copy)]
struct JsonCodec;

impl PlistCodec for JsonCodec {
    fn validate(&self, path: &Path) -> bool {
        fs::read_to_string(path)
            .ok()
            .and_then(|content| serde_json::from_str::<serde_json::Value>(&content).ok())
            .is_some_and(|json| json.is_object())
    }

    fn load(&self, path: &Path) -> Result<TranslationTable, PlistError> {
        let content = fs::read_to_string(path)
            .map_err(|source| PlistError::Io { path: path.display().to_string(), source })?;
        let json: serde_json::Value = serde_json::from_str(&content)
            .map_err(|source| PlistError::Parse { path: path.display().to_string(), source })?;
        table_from_json(&json)
            .ok_or_else(|| PlistError::NotADictionary { path: path.display().to_string() })
    }
}

fn write_bundle(root: &Path, tag: &str, base: &str, json: &str) {
    let dir = root.join(format!("{tag}.lproj"));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(format!("{base}.strings")), json).unwrap();
}

fn verify(config: &VerifyConfig) -> CollectingReporter {
    let mut reporter = CollectingReporter::new();
    Verifier::new(JsonCodec).verify(config, &mut reporter);
    reporter
}

fn config_for(root: &Path) -> VerifyConfig {
    let mut config = VerifyConfig::new("Localizable", LanguageTag::new("en"));
    config.search_path = root.to_path_buf();
    config
}

#[test]
fn verify_clean_bundle_family_reports_only_the_summary() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path(), "en", "Localizable", r#"{"greeting": "Hello", "farewell": "Bye"}"#);
    write_bundle(dir.path(), "es", "Localizable", r#"{"greeting": "Hola", "farewell": "Adiós"}"#);
    write_bundle(dir.path(), "fr", "Localizable", r#"{"greeting": "Salut", "farewell": "Salut"}"#);

    let report = verify(&config_for(dir.path()));

    assert_eq!(report.errors, Vec::<String>::new());
    assert_eq!(report.warnings, Vec::<String>::new());
    assert_eq!(report.messages, vec!["Successfully verified 2 strings across 3 languages"]);
}

#[test]
fn verify_surfaces_gaps_invalid_files_and_placeholders_together() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(
        dir.path(),
        "en",
        "Localizable",
        r#"{"greeting": "Hello", "farewell": "Bye", "title": "Title"}"#,
    );
    // Missing "farewell", extra "subtitle".
    write_bundle(
        dir.path(),
        "es",
        "Localizable",
        r#"{"greeting": "Hola", "title": "Título", "subtitle": "Subtítulo"}"#,
    );
    // Structurally invalid.
    write_bundle(dir.path(), "fr", "Localizable", "not json at all");
    // Untranslated placeholder.
    write_bundle(dir.path(), "de", "Localizable", r#"{"greeting": "greeting"}"#);

    let report = verify(&config_for(dir.path()));

    assert_eq!(
        report.errors,
        vec!["String `greeting` value matches key in `Localizable.strings` for language `de`"]
    );
    // Languages are visited in tag order: es is diffed before fr is skipped.
    let fr_path = dir.path().join("fr.lproj").join("Localizable.strings");
    assert_eq!(
        report.warnings,
        vec![
            "Translation 'farewell' in 'Localizable.strings' is defined in development language \
             but not for 'es'"
                .to_string(),
            "Translation 'subtitle' in 'Localizable.strings' is defined for 'es' but not the \
             development language"
                .to_string(),
            format!("Invalid plist file '{}'", fr_path.display()),
        ]
    );
    // Fatal placeholder finding suppresses the summary.
    assert_eq!(report.messages, Vec::<String>::new());
}

#[test]
fn verify_with_expected_languages_blocks_on_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path(), "en", "Localizable", r#"{"greeting": "Hello"}"#);
    write_bundle(dir.path(), "es", "Localizable", r#"{"greeting": "Hola"}"#);

    let mut config = config_for(dir.path());
    config.expected_languages =
        Some(vec![LanguageTag::new("en"), LanguageTag::new("es"), LanguageTag::new("ar")]);

    let report = verify(&config);

    assert_eq!(
        report.errors,
        vec!["Unable to find strings file named `Localizable.strings` for language `ar`"]
    );
    assert_eq!(report.warnings, Vec::<String>::new());
    assert_eq!(report.messages, Vec::<String>::new());
}

#[test]
fn verify_separate_bundle_families_do_not_interfere() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path(), "en", "Localizable", r#"{"greeting": "Hello"}"#);
    write_bundle(dir.path(), "en", "InfoPlist", r#"{"CFBundleName": "App"}"#);
    write_bundle(dir.path(), "es", "InfoPlist", r#"{"CFBundleName": "App ES"}"#);

    let localizable = verify(&config_for(dir.path()));
    let mut infoplist_config = config_for(dir.path());
    infoplist_config.base_name = "InfoPlist".to_string();
    let infoplist = verify(&infoplist_config);

    assert_eq!(localizable.messages, vec!["Successfully verified 1 strings across 1 languages"]);
    assert_eq!(infoplist.messages, vec!["Successfully verified 1 strings across 2 languages"]);
}

#[test]
fn verify_missing_development_bundle_is_the_only_finding() {
    let dir = tempfile::tempdir().unwrap();
    write_bundle(dir.path(), "es", "Localizable", r#"{"greeting": "Hola"}"#);

    let report = verify(&config_for(dir.path()));

    assert_eq!(
        report.errors,
        vec![
            "Unable to find strings file for development_language. Missing file \
             `en.lproj/Localizable.strings`"
        ]
    );
    assert_eq!(report.warnings, Vec::<String>::new());
    assert_eq!(report.messages, Vec::<String>::new());
}
