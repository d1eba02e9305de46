//! lproj-lint
//!
//! Validates `.lproj` localization bundles during code-review automation:
//! checks that a strings file exists for the declared development language,
//! optionally reconciles the discovered languages against an expected set,
//! and diffs every translation against the development language's keys.

pub mod checks;
pub mod config;
pub mod locator;
pub mod plist;
pub mod report;
mod test_utils;
pub mod types;
pub mod verifier;

pub use config::VerifyConfig;
pub use verifier::Verifier;
