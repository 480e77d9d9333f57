#![forbid(unsafe_code)]
//! Golden-file regression harness
//!
//! Runs a diagnostic-emitting tool (typically clang with a plugin loaded) over a directory of
//! test inputs and compares the tool's combined output with recorded baselines. A reset mode
//! records the current output as the new baselines.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `harness` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Example
//!
//! ```rust,no_run
//! use golden_harness::{GoldenFileTestHarness, HarnessConfig};
//!
//! let config = HarnessConfig::new("tests/plugin", "/usr/bin/clang", "find-bad-constructs");
//! let harness = GoldenFileTestHarness::new(config)?;
//! let summary = harness.run()?;
//! std::process::exit(summary.exit_code());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod harness;
pub mod version;

pub use harness::{
    ComparisonOutcome, GoldenFileTestHarness, HarnessConfig, HarnessError, RunSummary, TestCase, ToolExecutor,
};
