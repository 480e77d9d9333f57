//! Baselines, comparison outcomes and artifact writes.

use std::fs;
use std::io;
use std::path::Path;

use super::error::CaseError;

/// Detail reported for a case without a baseline.
pub const NO_BASELINE_DETAIL: &str = "no expected file found";

/// State of a case's expected artifact.
#[derive(Debug)]
pub enum Baseline {
    Present(String),
    Absent,
    Unreadable(io::Error),
}

impl Baseline {
    /// Look up the expected artifact with an explicit existence check.
    pub fn load(path: &Path) -> Self {
        match path.try_exists() {
            Ok(false) => Baseline::Absent,
            Err(e) => Baseline::Unreadable(e),
            Ok(true) => match fs::read_to_string(path) {
                Ok(text) => Baseline::Present(text),
                Err(e) => Baseline::Unreadable(e),
            },
        }
    }
}

/// Verdict for one case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonOutcome {
    Passed,
    FailedNoBaseline,
    FailedMismatch { expected: String, actual: String },
    FailedExecution { detail: String },
}

impl ComparisonOutcome {
    pub fn is_failure(&self) -> bool {
        !matches!(self, ComparisonOutcome::Passed)
    }

    /// Short machine-friendly name of the outcome.
    pub fn label(&self) -> &'static str {
        match self {
            ComparisonOutcome::Passed => "passed",
            ComparisonOutcome::FailedNoBaseline => "no-baseline",
            ComparisonOutcome::FailedMismatch { .. } => "mismatch",
            ComparisonOutcome::FailedExecution { .. } => "execution-failed",
        }
    }

    /// Human-readable failure detail; `None` for a pass.
    pub fn detail(&self) -> Option<String> {
        match self {
            ComparisonOutcome::Passed => None,
            ComparisonOutcome::FailedNoBaseline => Some(NO_BASELINE_DETAIL.to_string()),
            ComparisonOutcome::FailedMismatch { expected, actual } => Some(format!(
                "expected and actual differed\nActual:\n{actual}Expected:\n{expected}"
            )),
            ComparisonOutcome::FailedExecution { detail } => Some(detail.clone()),
        }
    }
}

/// Overwrite an artifact in place.
pub fn write_artifact(path: &Path, text: &str) -> Result<(), CaseError> {
    fs::write(path, text).map_err(|source| CaseError::ArtifactWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Line-by-line diff of two normalized texts, `-` for expected and `+` for actual.
pub fn line_diff(expected: &str, actual: &str) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let max_lines = expected_lines.len().max(actual_lines.len());

    let mut diff = String::new();
    for i in 0..max_lines {
        let exp = expected_lines.get(i);
        let act = actual_lines.get(i);
        if exp == act {
            continue;
        }
        if let Some(exp) = exp {
            diff.push_str(&format!("-{:4} | {}\n", i + 1, exp));
        }
        if let Some(act) = act {
            diff.push_str(&format!("+{:4} | {}\n", i + 1, act));
        }
    }
    diff
}
