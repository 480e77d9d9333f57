//! Error types for the golden-file harness.
//!
//! Errors are split by how far they propagate:
//!
//! - [`ConfigError`]: invalid construction parameters. Aborts before any case runs.
//! - [`HarnessError`]: run-level failures (directory scan, duplicate case names, working
//!   directory). These are the only errors that escape `run()`.
//! - [`ExecError`]: the tool could not be launched or its output could not be read. Carried
//!   as the `error` detail of an `ExecutionResult`.
//! - [`CaseError`]: baseline and artifact I/O while judging a case.
//!
//! Per-case failures become `ComparisonOutcome::FailedExecution` and the run moves on.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Invalid harness construction parameters.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("test directory '{}' does not exist", path.display())]
    #[diagnostic(
        code(golden_harness::config::missing_test_directory),
        help("pass the directory containing the test inputs and their .txt baselines")
    )]
    MissingTestDirectory { path: PathBuf },

    #[error("test directory '{}' is not a directory", path.display())]
    #[diagnostic(code(golden_harness::config::not_a_directory))]
    NotADirectory { path: PathBuf },

    #[error("tool '{}' was not found", path.display())]
    #[diagnostic(
        code(golden_harness::config::tool_not_found),
        help("use an absolute path, or make sure the tool is on PATH")
    )]
    ToolNotFound { path: PathBuf },

    #[error("tool '{}' is not an executable file", path.display())]
    #[diagnostic(code(golden_harness::config::tool_not_executable))]
    ToolNotExecutable { path: PathBuf },

    #[error("tool identifier must not be empty")]
    #[diagnostic(
        code(golden_harness::config::empty_tool_identifier),
        help("pass the plugin name with --plugin")
    )]
    EmptyToolIdentifier,

    #[error("could not resolve '{}': {source}", path.display())]
    #[diagnostic(code(golden_harness::config::unresolvable_path))]
    Unresolvable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Run-level failures that abort the whole run.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("failed to scan '{}': {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("duplicate test case '{name}': '{}' and '{}'", first.display(), second.display())]
    DuplicateCase {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("failed to enter working directory '{}': {source}", path.display())]
    WorkingDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failures while launching the tool or capturing its output.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("could not execute {command} ({source})")]
    Launch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("could not capture output of {command} ({source})")]
    Capture {
        command: String,
        #[source]
        source: io::Error,
    },
}

/// Per-case failures. Never abort a run.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error("could not read expected file '{}' ({source})", path.display())]
    BaselineUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write '{}' ({source})", path.display())]
    ArtifactWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
