//! Run summaries and reporters.
//!
//! ## Reporter Trait
//!
//! The harness separates reporting from execution through [`Reporter`]. Two implementations
//! ship with the crate:
//!
//! - [`ConsoleReporter`]: the classic `Testing foo.cpp... passed!` output
//! - [`TracingReporter`]: emits `tracing` events only, for `--json` runs and embedding

use std::io::{self, Write};
use std::path::Path;

use serde_json::json;

use super::discovery::TestCase;
use super::golden::{ComparisonOutcome, line_diff};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Aggregate of every outcome in one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passing: Vec<String>,
    pub failing: Vec<String>,
}

impl RunSummary {
    pub fn record(&mut self, name: &str, outcome: &ComparisonOutcome) {
        if outcome.is_failure() {
            self.failing.push(name.to_string());
        } else {
            self.passing.push(name.to_string());
        }
    }

    pub fn total(&self) -> usize {
        self.passing.len() + self.failing.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failing.is_empty()
    }

    /// Process exit code: the failing count, clamped so it never wraps to zero.
    pub fn exit_code(&self) -> i32 {
        self.failing.len().min(255) as i32
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "total": self.total(),
            "passed": self.passing.len(),
            "failed": self.failing.len(),
            "passing": self.passing,
            "failing": self.failing,
        })
    }
}

/// Callbacks fired while a run progresses.
pub trait Reporter {
    /// Called once, before any case runs.
    fn on_run_start(&mut self, _tool: &Path) {}

    fn on_case_start(&mut self, case: &TestCase);

    fn on_case_complete(&mut self, case: &TestCase, outcome: &ComparisonOutcome);

    fn on_run_complete(&mut self, summary: &RunSummary);
}

/// Line-oriented console output.
pub struct ConsoleReporter<W: Write> {
    out: W,
    pub color: bool,
    /// Print a line diff under each mismatch.
    pub verbose: bool,
}

impl ConsoleReporter<io::Stdout> {
    pub fn stdout(color: bool, verbose: bool) -> Self {
        Self::new(io::stdout(), color, verbose)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, color: bool, verbose: bool) -> Self {
        Self { out, color, verbose }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }
}

// Write errors (e.g. a closed stdout pipe) are ignored so reporting never aborts a run.
impl<W: Write> Reporter for ConsoleReporter<W> {
    fn on_run_start(&mut self, tool: &Path) {
        let _ = writeln!(self.out, "Using {}...", tool.display());
    }

    fn on_case_start(&mut self, case: &TestCase) {
        let _ = write!(self.out, "Testing {}... ", case.input_file);
        let _ = self.out.flush();
    }

    fn on_case_complete(&mut self, _case: &TestCase, outcome: &ComparisonOutcome) {
        let Some(detail) = outcome.detail() else {
            let passed = self.paint("passed!", GREEN);
            let _ = writeln!(self.out, "{passed}");
            return;
        };

        let failed = self.paint("failed:", RED);
        let _ = writeln!(self.out, "{failed} {detail}");

        if let ComparisonOutcome::FailedMismatch { expected, actual } = outcome {
            if self.verbose {
                let _ = writeln!(self.out, "Diff:");
                let _ = write!(self.out, "{}", line_diff(expected, actual));
            }
        }
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        let tally = format!(
            "Ran {} tests: {} succeeded, {} failed",
            summary.total(),
            summary.passing.len(),
            summary.failing.len()
        );
        let tally = self.paint(&tally, BOLD);
        let _ = writeln!(self.out, "{tally}");
        for name in &summary.failing {
            let _ = writeln!(self.out, "    {name}");
        }
        let _ = self.out.flush();
    }
}

/// Reports through `tracing` only.
#[derive(Debug, Default)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn on_run_start(&mut self, tool: &Path) {
        tracing::info!(tool = %tool.display(), "Starting golden-file run");
    }

    fn on_case_start(&mut self, case: &TestCase) {
        tracing::debug!(case = %case.name, "Testing {}", case.input_file);
    }

    fn on_case_complete(&mut self, case: &TestCase, outcome: &ComparisonOutcome) {
        match outcome.detail() {
            None => tracing::info!(case = %case.name, "passed"),
            Some(detail) => tracing::warn!(case = %case.name, outcome = outcome.label(), "failed: {}", detail),
        }
    }

    fn on_run_complete(&mut self, summary: &RunSummary) {
        tracing::info!(
            total = summary.total(),
            passed = summary.passing.len(),
            failed = summary.failing.len(),
            "Run complete"
        );
    }
}
