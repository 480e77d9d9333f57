//! Tool invocations.
//!
//! Every case runs the same base command, built once per harness:
//!
//! ```text
//! <tool> -c -std=<std> [probe flags] -Xclang -add-plugin -Xclang <plugin>
//!        [-Xclang -plugin-arg-<plugin> -Xclang <arg>]... [base args]...
//! ```
//!
//! followed by the case's `.flags` tokens and the input file name.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::config::HarnessConfig;
use super::discovery::TestCase;

/// Marker string found in tool binaries that understand the flags below.
const LINE_NUMBERS_MARKER: &[u8] = b"diagnostics-show-line-numbers";

/// Flags that restore the traditional single-line diagnostics format.
const TRADITIONAL_DIAGNOSTICS_FLAGS: &[&str] = &[
    "-fno-diagnostics-show-line-numbers",
    "-fcaret-diagnostics-max-lines=1",
];

const PROBE_CHUNK: usize = 64 * 1024;

/// A fully-formed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// The base command shared by every case.
#[derive(Debug, Clone)]
pub struct InvocationTemplate {
    program: PathBuf,
    base_args: Vec<String>,
}

impl InvocationTemplate {
    pub fn from_parts(program: impl Into<PathBuf>, base_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            base_args,
        }
    }

    /// Build the base command for a validated config.
    ///
    /// When `probe_diagnostic_flags` is set the tool binary is scanned once; a binary that
    /// cannot be read is treated as not supporting the flags.
    pub fn for_plugin(config: &HarnessConfig) -> Self {
        let plugin = &config.tool_identifier;
        let mut args = vec!["-c".to_string(), format!("-std={}", config.language_standard)];

        if config.probe_diagnostic_flags && supports_traditional_diagnostics(&config.tool_path) {
            args.extend(TRADITIONAL_DIAGNOSTICS_FLAGS.iter().map(|f| f.to_string()));
        }

        args.extend(["-Xclang", "-add-plugin", "-Xclang"].map(String::from));
        args.push(plugin.clone());

        for plugin_arg in &config.plugin_args {
            args.push("-Xclang".to_string());
            args.push(format!("-plugin-arg-{plugin}"));
            args.push("-Xclang".to_string());
            args.push(plugin_arg.clone());
        }

        args.extend(config.base_args.iter().cloned());

        Self::from_parts(config.tool_path.clone(), args)
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn base_args(&self) -> &[String] {
        &self.base_args
    }

    /// Base command, then the case's extra arguments, then its input file.
    pub fn invocation_for(&self, case: &TestCase) -> Invocation {
        let mut args = Vec::with_capacity(self.base_args.len() + case.extra_args.len() + 1);
        args.extend(self.base_args.iter().cloned());
        args.extend(case.extra_args.iter().cloned());
        args.push(case.input_file.clone());

        Invocation {
            program: self.program.clone(),
            args,
        }
    }
}

fn supports_traditional_diagnostics(tool: &Path) -> bool {
    match binary_contains(tool, LINE_NUMBERS_MARKER) {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("Could not probe {} for diagnostics flags: {}", tool.display(), e);
            false
        }
    }
}

/// Stream `path` looking for `needle` without loading the whole file.
pub fn binary_contains(path: &Path, needle: &[u8]) -> io::Result<bool> {
    if needle.is_empty() {
        return Ok(true);
    }

    let mut file = File::open(path)?;
    let overlap = needle.len() - 1;
    let mut window: Vec<u8> = Vec::with_capacity(PROBE_CHUNK + overlap);
    let mut chunk = vec![0u8; PROBE_CHUNK];

    loop {
        let read = file.read(&mut chunk)?;
        if read == 0 {
            return Ok(false);
        }
        window.extend_from_slice(&chunk[..read]);
        if window.windows(needle.len()).any(|w| w == needle) {
            return Ok(true);
        }
        // Keep the tail so a match straddling two chunks is still found.
        let keep_from = window.len().saturating_sub(overlap);
        window.drain(..keep_from);
    }
}
