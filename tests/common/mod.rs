//! Shared helpers for the harness integration tests.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use golden_harness::harness::{CapturedOutput, ExecError, ExitClass, Invocation, ToolExecutor};
use golden_harness::{GoldenFileTestHarness, HarnessConfig};

pub const PLUGIN: &str = "find-bad-constructs";

/// Write `contents` to `dir/name`.
pub fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

pub fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

/// An executable file that stands in for the tool.
///
/// Placed outside the test directory so it never shows up as a test input.
pub fn fake_tool(root: &Path) -> PathBuf {
    let path = write(root, "fake-clang", "#!/bin/sh\nexit 0\n");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
    path
}

/// Canned tool responses keyed by input file name.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: HashMap<String, Response>,
    pub calls: RefCell<Vec<Invocation>>,
}

#[derive(Clone)]
enum Response {
    Output(String, ExitClass),
    LaunchFailure,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `input` with `text` and exit status `code`.
    pub fn respond(mut self, input: &str, text: &str, code: i32) -> Self {
        let exit = if code == 0 {
            ExitClass::Success
        } else {
            ExitClass::ToolFailure { code: Some(code) }
        };
        self.responses
            .insert(input.to_string(), Response::Output(text.to_string(), exit));
        self
    }

    /// Fail to launch the tool for `input`.
    pub fn fail_launch(mut self, input: &str) -> Self {
        self.responses.insert(input.to_string(), Response::LaunchFailure);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl ToolExecutor for ScriptedExecutor {
    fn execute(&self, invocation: &Invocation, _work_dir: &Path) -> Result<CapturedOutput, ExecError> {
        self.calls.borrow_mut().push(invocation.clone());
        let input = invocation.args.last().cloned().unwrap_or_default();

        match self.responses.get(&input).cloned() {
            Some(Response::Output(text, exit)) => Ok(CapturedOutput { text, exit }),
            Some(Response::LaunchFailure) => Err(ExecError::Launch {
                command: invocation.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
            }),
            None => Ok(CapturedOutput {
                text: String::new(),
                exit: ExitClass::Success,
            }),
        }
    }
}

/// Scratch layout: `<root>/tests` is the test directory, the tool lives in `<root>`.
pub struct Workspace {
    pub root: tempfile::TempDir,
    pub tests: PathBuf,
    pub tool: PathBuf,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let tests = root.path().join("tests");
        fs::create_dir(&tests).unwrap();
        let tool = fake_tool(root.path());
        Self { root, tests, tool }
    }

    pub fn config(&self) -> HarnessConfig {
        let mut config = HarnessConfig::new(&self.tests, &self.tool, PLUGIN);
        config.probe_diagnostic_flags = false;
        config
    }

    pub fn harness<E: ToolExecutor>(&self, executor: E) -> GoldenFileTestHarness<E> {
        GoldenFileTestHarness::with_executor(self.config(), executor).unwrap()
    }

    pub fn recording_harness<E: ToolExecutor>(&self, executor: E) -> GoldenFileTestHarness<E> {
        GoldenFileTestHarness::with_executor(self.config().with_record_mode(true), executor).unwrap()
    }

    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        write(&self.tests, name, contents)
    }

    pub fn read(&self, name: &str) -> String {
        read(&self.tests, name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.tests.join(name).exists()
    }
}
