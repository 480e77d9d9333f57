//! Tool execution boundary.
//!
//! The harness never spawns processes directly; it goes through [`ToolExecutor`]. The
//! default [`ProcessExecutor`] runs the tool as a child process. Tests and dry runs can
//! plug in their own executor.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Command, Stdio};

use super::error::ExecError;
use super::invocation::Invocation;

/// How the tool run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitClass {
    /// Exit status zero.
    Success,
    /// Non-zero exit (or killed by a signal, `code: None`). Still usable output.
    ToolFailure { code: Option<i32> },
    /// The tool could not be launched or its output could not be captured.
    ExecutionFailure,
}

/// What the executor hands back for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Merged stdout and stderr, decoded lossily as UTF-8.
    pub text: String,
    pub exit: ExitClass,
}

/// Result of running the tool for one case.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub case_name: String,
    pub output: String,
    pub exit: ExitClass,
    /// Set only when `exit` is [`ExitClass::ExecutionFailure`].
    pub error: Option<String>,
}

impl ExecutionResult {
    pub fn from_capture(case_name: &str, captured: CapturedOutput) -> Self {
        Self {
            case_name: case_name.to_string(),
            output: captured.text,
            exit: captured.exit,
            error: None,
        }
    }

    pub fn from_error(case_name: &str, error: &ExecError) -> Self {
        Self {
            case_name: case_name.to_string(),
            output: String::new(),
            exit: ExitClass::ExecutionFailure,
            error: Some(error.to_string()),
        }
    }
}

/// Runs one invocation and captures its combined output.
///
/// A non-zero exit status is *not* an error: plugin tests routinely make the compiler fail
/// on purpose. Only a failure to launch the tool or read its output is.
pub trait ToolExecutor {
    fn execute(&self, invocation: &Invocation, work_dir: &Path) -> Result<CapturedOutput, ExecError>;
}

/// Child-process executor (current behavior).
///
/// stdout and stderr share one pipe so diagnostics keep the order the tool wrote them in.
/// There is no timeout: a hung tool hangs the run.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl ToolExecutor for ProcessExecutor {
    fn execute(&self, invocation: &Invocation, work_dir: &Path) -> Result<CapturedOutput, ExecError> {
        let launch_error = |source: io::Error| ExecError::Launch {
            command: invocation.to_string(),
            source,
        };
        let capture_error = |source: io::Error| ExecError::Capture {
            command: invocation.to_string(),
            source,
        };

        let (mut reader, writer) = io::pipe().map_err(launch_error)?;
        let stderr_writer = writer.try_clone().map_err(launch_error)?;

        // The Command (and its copies of the write end) is dropped at the end of this
        // statement, so the read below sees EOF once the child exits.
        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(work_dir)
            .stdin(Stdio::null())
            .stdout(writer)
            .stderr(stderr_writer)
            .spawn()
            .map_err(launch_error)?;

        let mut raw = Vec::new();
        if let Err(e) = reader.read_to_end(&mut raw) {
            let _ = child.kill();
            let _ = child.wait();
            return Err(capture_error(e));
        }
        let status = child.wait().map_err(capture_error)?;

        let exit = if status.success() {
            ExitClass::Success
        } else {
            ExitClass::ToolFailure { code: status.code() }
        };

        Ok(CapturedOutput {
            text: String::from_utf8_lossy(&raw).into_owned(),
            exit,
        })
    }
}
