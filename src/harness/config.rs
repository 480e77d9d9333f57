//! Harness construction parameters.
//!
//! A [`HarnessConfig`] is plain data until [`HarnessConfig::validate`] checks it. Validation
//! resolves the tool (searching `PATH` for bare names) and canonicalizes both paths, so a
//! later working-directory change cannot make them dangle.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::error::ConfigError;

/// Input file types the harness picks up when none are configured.
pub const DEFAULT_INPUT_EXTENSIONS: &[&str] = &["cpp", "mm"];

/// Language standard passed as `-std=<value>` when none is configured.
pub const DEFAULT_LANGUAGE_STANDARD: &str = "c++14";

/// Configuration for a [`GoldenFileTestHarness`](super::GoldenFileTestHarness).
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Directory holding the inputs, `.flags` files and `.txt` baselines.
    pub test_directory: PathBuf,
    /// Executable under test.
    pub tool_path: PathBuf,
    /// Name of the plugin being exercised.
    pub tool_identifier: String,
    /// Write actual output as the new baseline instead of comparing.
    pub record_mode: bool,
    /// Extensions (without the dot) of input artifacts.
    pub input_extensions: Vec<String>,
    pub language_standard: String,
    /// Arguments forwarded to the plugin via `-plugin-arg-<id>`.
    pub plugin_args: Vec<String>,
    /// Extra arguments appended to the base invocation of every case.
    pub base_args: Vec<String>,
    /// Probe the tool binary for support of the traditional diagnostics format.
    pub probe_diagnostic_flags: bool,
}

impl HarnessConfig {
    pub fn new(
        test_directory: impl Into<PathBuf>,
        tool_path: impl Into<PathBuf>,
        tool_identifier: impl Into<String>,
    ) -> Self {
        Self {
            test_directory: test_directory.into(),
            tool_path: tool_path.into(),
            tool_identifier: tool_identifier.into(),
            record_mode: false,
            input_extensions: DEFAULT_INPUT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            language_standard: DEFAULT_LANGUAGE_STANDARD.to_string(),
            plugin_args: Vec::new(),
            base_args: Vec::new(),
            probe_diagnostic_flags: true,
        }
    }

    pub fn with_record_mode(mut self, record_mode: bool) -> Self {
        self.record_mode = record_mode;
        self
    }

    /// Check every parameter and return the config with canonical paths.
    ///
    /// ## Errors
    ///
    /// - [`ConfigError::MissingTestDirectory`] / [`ConfigError::NotADirectory`] for a bad
    ///   test directory
    /// - [`ConfigError::ToolNotFound`] / [`ConfigError::ToolNotExecutable`] for a bad tool
    /// - [`ConfigError::EmptyToolIdentifier`] when no plugin name was given
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.test_directory = validate_test_directory(&self.test_directory)?;
        self.tool_path = resolve_tool(&self.tool_path)?;

        if self.tool_identifier.trim().is_empty() {
            return Err(ConfigError::EmptyToolIdentifier);
        }
        Ok(self)
    }
}

fn validate_test_directory(path: &Path) -> Result<PathBuf, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::MissingTestDirectory { path: path.to_path_buf() });
    }
    if !path.is_dir() {
        return Err(ConfigError::NotADirectory { path: path.to_path_buf() });
    }
    path.canonicalize().map_err(|source| ConfigError::Unresolvable {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve the tool to a canonical path of an executable file.
///
/// Bare names (no separator) are looked up on `PATH`, like a shell would.
fn resolve_tool(path: &Path) -> Result<PathBuf, ConfigError> {
    let candidate = if path.components().count() == 1 && !path.exists() {
        search_path(path).ok_or_else(|| ConfigError::ToolNotFound { path: path.to_path_buf() })?
    } else {
        path.to_path_buf()
    };

    if !candidate.exists() {
        return Err(ConfigError::ToolNotFound { path: path.to_path_buf() });
    }
    if !is_executable(&candidate) {
        return Err(ConfigError::ToolNotExecutable { path: path.to_path_buf() });
    }
    candidate.canonicalize().map_err(|source| ConfigError::Unresolvable {
        path: path.to_path_buf(),
        source,
    })
}

fn search_path(name: &Path) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .flat_map(|dir| executable_names(name).into_iter().map(move |n| dir.join(n)))
        .find(|candidate| is_executable(candidate))
}

#[cfg(windows)]
fn executable_names(name: &Path) -> Vec<PathBuf> {
    vec![name.to_path_buf(), name.with_extension("exe")]
}

#[cfg(not(windows))]
fn executable_names(name: &Path) -> Vec<PathBuf> {
    vec![name.to_path_buf()]
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path).is_ok_and(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.is_file())
}
