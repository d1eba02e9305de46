//! Command line entry point for review automation.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lproj_lint::config::VerifyConfig;
use lproj_lint::report::ConsoleReporter;
use lproj_lint::types::LanguageTag;
use lproj_lint::verifier::Verifier;
use tracing_subscriber::EnvFilter;

/// Validates `.lproj` localization bundles against a development language.
#[derive(Debug, Parser)]
#[command(name = "lproj-lint", version, about)]
struct Cli {
    /// Base file name of the bundle family, without extension
    /// (e.g. `Localizable`)
    base_name: String,

    /// Language every other language is diffed against
    #[arg(long)]
    development_language: String,

    /// Exact set of languages that must be present
    #[arg(long, value_delimiter = ',')]
    expected_languages: Option<Vec<String>>,

    /// Skip the key-equals-value check
    #[arg(long)]
    ignore_key_equals_value: bool,

    /// Directory searched for `.lproj` bundles
    #[arg(long, default_value = ".")]
    search_path: PathBuf,

    /// Report language set mismatches as warnings instead of failures
    #[arg(long)]
    lenient_language_set: bool,

    /// Report an invalid development-language file as a warning instead of
    /// a failure (diffing is skipped either way)
    #[arg(long)]
    lenient_baseline: bool,
}

impl Cli {
    fn into_config(self) -> VerifyConfig {
        let mut config =
            VerifyConfig::new(self.base_name, LanguageTag::new(self.development_language));
        config.expected_languages =
            self.expected_languages.map(|tags| tags.into_iter().map(LanguageTag::new).collect());
        config.ignore_key_equals_value = self.ignore_key_equals_value;
        config.search_path = self.search_path;
        config.strict_language_set = !self.lenient_language_set;
        config.strict_baseline_validation = !self.lenient_baseline;
        config
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Cli::parse().into_config();

    let stdout = std::io::stdout();
    let mut reporter = ConsoleReporter::new(stdout.lock());
    let summary = Verifier::with_plutil().verify(&config, &mut reporter);

    if summary.is_blocking() { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
