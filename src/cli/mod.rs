//! CLI module for the golden-file harness
//!
//! ## Usage
//!
//! ```text
//! golden-harness --tool /path/to/clang --plugin find-bad-constructs tests/
//! golden-harness --tool clang --plugin find-bad-constructs --reset-results tests/
//! ```
//!
//! ## Modules
//!
//! - `commands` - Command implementations (run, list, JSON summary)
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::harness::config::DEFAULT_LANGUAGE_STANDARD;
use crate::version::HARNESS_VERSION;

/// Process exit status returned by a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    /// Configuration and scan errors. Shares its value with a run that had one failing case.
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// A command that could not produce a run summary.
///
/// `run()` prints `message` to stderr and exits with `exit_code`.
#[derive(Debug)]
pub struct CliError {
    pub message: String,
    pub exit_code: ExitCode,
}

impl CliError {
    /// Error that exits with [`ExitCode::FAILURE`].
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::FAILURE,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

pub type CliResult<T> = Result<T, CliError>;

/// Golden-file regression harness for compiler plugins
#[derive(Parser, Debug)]
#[command(name = "golden-harness")]
#[command(version = HARNESS_VERSION)]
#[command(about = "Run a tool over test inputs and diff its diagnostics against golden files", long_about = None)]
pub struct Cli {
    /// Directory containing the test inputs and their .txt baselines
    #[arg(value_name = "TEST_DIR", default_value = ".")]
    pub test_dir: PathBuf,

    /// Tool under test (a path, or a name looked up on PATH)
    #[arg(short, long, value_name = "PATH")]
    pub tool: PathBuf,

    /// Name of the plugin under test
    #[arg(short, long, value_name = "NAME")]
    pub plugin: String,

    /// Overwrite the expected results with the actual output
    #[arg(long = "reset-results", visible_alias = "record")]
    pub reset_results: bool,

    /// Argument forwarded to the plugin (repeatable)
    #[arg(long = "plugin-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub plugin_args: Vec<String>,

    /// Extra argument for every tool invocation (repeatable)
    #[arg(long = "extra-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub extra_args: Vec<String>,

    /// Language standard passed as -std=<STD>
    #[arg(long = "std", value_name = "STD", default_value = DEFAULT_LANGUAGE_STANDARD)]
    pub std: String,

    /// Input file extension to pick up (repeatable, default: cpp and mm)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Do not probe the tool binary for diagnostics-format flags
    #[arg(long)]
    pub no_probe: bool,

    /// List discovered cases and their command lines without running them
    #[arg(long)]
    pub list: bool,

    /// Print a JSON summary instead of per-case lines
    #[arg(long, conflicts_with = "list")]
    pub json: bool,

    /// Show a line diff for mismatches
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    if cli.list {
        return commands::list_cases(&cli);
    }
    commands::run_tests(&cli)
}
