//! Golden-file test harness
//!
//! Runs an external tool (typically clang with a plugin loaded) over every input artifact in
//! a test directory and compares the tool's diagnostics against a recorded `.txt` baseline.
//!
//! ## Pipeline
//!
//! 1. **Discovery**: scan the test directory for input artifacts (`discovery`)
//! 2. **Invocation**: base command + per-case `.flags` + input file (`invocation`)
//! 3. **Execution**: run the tool with stdout/stderr merged (`executor`)
//! 4. **Normalization**: line endings and path separators (`normalize`)
//! 5. **Comparison**: tri-state baseline lookup and artifact writes (`golden`)
//! 6. **Reporting**: per-case lines and a final tally (`report`)
//!
//! ## Modules
//!
//! - `config` - Construction parameters and validation
//! - `discovery` - `TestCase` and the lazy case scan
//! - `error` - Config, run-level and case-level errors
//! - `executor` - `ToolExecutor` boundary and the process executor
//! - `golden` - Baselines and `ComparisonOutcome`
//! - `invocation` - Command lines
//! - `normalize` - Platform normalization
//! - `report` - `RunSummary` and reporters
//! - `workdir` - Scoped working-directory guard
//!
//! ## Failure model
//!
//! A case can fail without stopping the run: no baseline, mismatched output, or a tool that
//! could not be launched. Configuration errors are caught when the harness is built; after
//! that only scan, duplicate-name and working-directory failures escape
//! [`GoldenFileTestHarness::run`]. A non-zero exit status from the tool is never a
//! failure by itself; the captured text is authoritative.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod golden;
pub mod invocation;
pub mod normalize;
pub mod report;
pub mod workdir;

use std::collections::HashMap;
use std::path::PathBuf;

pub use config::HarnessConfig;
pub use discovery::{CaseIter, TestCase};
pub use error::{CaseError, ConfigError, ExecError, HarnessError};
pub use executor::{CapturedOutput, ExecutionResult, ExitClass, ProcessExecutor, ToolExecutor};
pub use golden::{Baseline, ComparisonOutcome};
pub use invocation::{Invocation, InvocationTemplate};
pub use report::{ConsoleReporter, Reporter, RunSummary, TracingReporter};
pub use workdir::WorkingDirGuard;

use golden::write_artifact;
use normalize::normalize;

/// Discovers, runs and judges golden-file test cases.
#[derive(Debug)]
pub struct GoldenFileTestHarness<E: ToolExecutor = ProcessExecutor> {
    config: HarnessConfig,
    template: InvocationTemplate,
    executor: E,
}

impl GoldenFileTestHarness<ProcessExecutor> {
    /// Validate `config` and build a harness that spawns the real tool.
    pub fn new(config: HarnessConfig) -> Result<Self, ConfigError> {
        Self::with_executor(config, ProcessExecutor)
    }
}

impl<E: ToolExecutor> GoldenFileTestHarness<E> {
    /// Validate `config` and build a harness around a custom executor.
    pub fn with_executor(config: HarnessConfig, executor: E) -> Result<Self, ConfigError> {
        let config = config.validate()?;
        let template = InvocationTemplate::for_plugin(&config);
        Ok(Self {
            config,
            template,
            executor,
        })
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn template(&self) -> &InvocationTemplate {
        &self.template
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Start a fresh scan of the test directory.
    pub fn discover_cases(&self) -> Result<CaseIter, HarnessError> {
        CaseIter::new(&self.config.test_directory, &self.config.input_extensions)
    }

    /// Drain a scan, rejecting two inputs that derive the same case name.
    pub fn collect_cases(&self) -> Result<Vec<TestCase>, HarnessError> {
        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        let mut cases = Vec::new();

        for case in self.discover_cases()? {
            let case = case?;
            if let Some(first) = seen.get(&case.name) {
                return Err(HarnessError::DuplicateCase {
                    name: case.name.clone(),
                    first: first.clone(),
                    second: case.input_path.clone(),
                });
            }
            seen.insert(case.name.clone(), case.input_path.clone());
            cases.push(case);
        }

        Ok(cases)
    }

    pub fn invocation_for(&self, case: &TestCase) -> Invocation {
        self.template.invocation_for(case)
    }

    /// Run the tool for one case. Launch failures are folded into the result.
    pub fn execute_case(&self, case: &TestCase) -> ExecutionResult {
        let invocation = self.invocation_for(case);
        tracing::debug!(case = %case.name, "Running {}", invocation);

        match self.executor.execute(&invocation, &self.config.test_directory) {
            Ok(captured) => ExecutionResult::from_capture(&case.name, captured),
            Err(e) => ExecutionResult::from_error(&case.name, &e),
        }
    }

    /// Run and judge a single case.
    #[tracing::instrument(skip_all, fields(case = %case.name))]
    pub fn run_case(&self, case: &TestCase) -> ComparisonOutcome {
        let result = self.execute_case(case);

        if let Some(detail) = result.error {
            tracing::error!(case = %result.case_name, "{}", detail);
            return ComparisonOutcome::FailedExecution { detail };
        }
        if let ExitClass::ToolFailure { code } = result.exit {
            tracing::debug!(
                case = %result.case_name,
                ?code,
                "Tool exited unsuccessfully; comparing its output anyway"
            );
        }

        let outcome = self.judge(case, &result.output).unwrap_or_else(|e| {
            tracing::error!("{}", e);
            ComparisonOutcome::FailedExecution { detail: e.to_string() }
        });
        tracing::debug!(outcome = outcome.label(), "Case finished");
        outcome
    }

    fn judge(&self, case: &TestCase, output: &str) -> Result<ComparisonOutcome, CaseError> {
        let actual = normalize(output);

        if self.config.record_mode {
            write_artifact(&case.expected_path, &actual)?;
            return Ok(ComparisonOutcome::Passed);
        }

        match Baseline::load(&case.expected_path) {
            Baseline::Absent => {
                write_artifact(&case.actual_path, &actual)?;
                Ok(ComparisonOutcome::FailedNoBaseline)
            }
            Baseline::Unreadable(source) => Err(CaseError::BaselineUnreadable {
                path: case.expected_path.clone(),
                source,
            }),
            Baseline::Present(expected) => {
                let expected = normalize(&expected);
                if expected == actual {
                    return Ok(ComparisonOutcome::Passed);
                }
                write_artifact(&case.actual_path, &actual)?;
                Ok(ComparisonOutcome::FailedMismatch { expected, actual })
            }
        }
    }

    /// Run every case, printing progress to stdout.
    pub fn run(&self) -> Result<RunSummary, HarnessError> {
        self.run_with_reporter(&mut ConsoleReporter::stdout(false, false))
    }

    /// Run every case in discovery order, reporting through `reporter`.
    ///
    /// The working directory is the test directory for the whole run and is restored on
    /// return, error or panic.
    #[tracing::instrument(skip_all, fields(dir = %self.config.test_directory.display()))]
    pub fn run_with_reporter(&self, reporter: &mut dyn Reporter) -> Result<RunSummary, HarnessError> {
        let _cwd = WorkingDirGuard::change_to(&self.config.test_directory).map_err(|source| {
            HarnessError::WorkingDirectory {
                path: self.config.test_directory.clone(),
                source,
            }
        })?;

        let cases = self.collect_cases()?;
        reporter.on_run_start(&self.config.tool_path);

        let mut summary = RunSummary::default();
        for case in &cases {
            reporter.on_case_start(case);
            let outcome = self.run_case(case);
            reporter.on_case_complete(case, &outcome);
            summary.record(&case.name, &outcome);
        }

        reporter.on_run_complete(&summary);
        tracing::info!(
            total = summary.total(),
            failed = summary.failing.len(),
            "Golden-file run finished"
        );
        Ok(summary)
    }
}
