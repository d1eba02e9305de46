//! Findings and the report sink seam.
//!
//! The verifier never talks to the host review tool directly. It accumulates
//! [`Finding`]s in discovery order and flushes them through a [`Reporter`],
//! so hosts can route them to whatever surface they have (Danger-style
//! fail/warn/message calls, a terminal, a test buffer).

use std::io::Write;

/// How a finding affects the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Blocks the review.
    Fatal,
    /// Worth surfacing, never blocking.
    Advisory,
    /// Success summary.
    Info,
}

/// One classified validation outcome with its rendered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    #[must_use]
    pub fn fatal(message: impl Into<String>) -> Self {
        Self { severity: Severity::Fatal, message: message.into() }
    }

    #[must_use]
    pub fn advisory(message: impl Into<String>) -> Self {
        Self { severity: Severity::Advisory, message: message.into() }
    }

    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self { severity: Severity::Info, message: message.into() }
    }
}

/// Host reporting surface.
///
/// `fail` blocks the review, `warn` does not, `message` carries the final
/// summary. Implementations must preserve call order.
pub trait Reporter {
    fn fail(&mut self, message: &str);
    fn warn(&mut self, message: &str);
    fn message(&mut self, message: &str);
}

/// Flushes findings to a reporter, in order.
pub fn flush<R: Reporter + ?Sized>(findings: &[Finding], reporter: &mut R) {
    for finding in findings {
        match finding.severity {
            Severity::Fatal => reporter.fail(&finding.message),
            Severity::Advisory => reporter.warn(&finding.message),
            Severity::Info => reporter.message(&finding.message),
        }
    }
}

/// Reporter that writes prefixed lines to any [`Write`] target.
///
/// The CLI hands it a stdout lock; write failures are logged and otherwise
/// ignored since there is nowhere left to report them.
#[derive(Debug)]
pub struct ConsoleReporter<W> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn write_line(&mut self, prefix: &str, message: &str) {
        if let Err(e) = writeln!(self.out, "{prefix}{message}") {
            tracing::warn!(error = %e, "Failed to write report line");
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn fail(&mut self, message: &str) {
        self.write_line("error: ", message);
    }

    fn warn(&mut self, message: &str) {
        self.write_line("warning: ", message);
    }

    fn message(&mut self, message: &str) {
        self.write_line("", message);
    }
}

/// Reporter that records every call, split by category.
///
/// Mirrors the status-report shape review hosts expose and keeps tests free
/// of any real output surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectingReporter {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub messages: Vec<String>,
}

impl CollectingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for CollectingReporter {
    fn fail(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;

    use super::*;

    #[googletest::test]
    fn test_flush_routes_by_severity() {
        let findings = vec![
            Finding::fatal("broken"),
            Finding::advisory("iffy"),
            Finding::info("done"),
        ];
        let mut reporter = CollectingReporter::new();

        flush(&findings, &mut reporter);

        expect_that!(reporter.errors, elements_are![eq("broken")]);
        expect_that!(reporter.warnings, elements_are![eq("iffy")]);
        expect_that!(reporter.messages, elements_are![eq("done")]);
    }

    #[googletest::test]
    fn test_console_reporter_prefixes() {
        let mut buf = Vec::new();
        {
            let mut reporter = ConsoleReporter::new(&mut buf);
            reporter.fail("broken");
            reporter.warn("iffy");
            reporter.message("done");
        }

        let output = String::from_utf8(buf).unwrap();
        assert_that!(output, eq("error: broken\nwarning: iffy\ndone\n"));
    }
}
